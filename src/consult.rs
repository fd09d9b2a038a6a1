//! Consultation request form and its spreadsheet endpoint.

use log::{debug, error, info};
use reqwest::{Client, multipart::Form};

use crate::error::{Result, SiteError};
use crate::types::Package;

/// Raw form values as typed by the visitor.
#[derive(Debug, Clone, Default)]
pub struct ConsultDraft {
    pub name: String,
    pub company: String,
    pub contact: String,
    pub package: String,
    pub details: String,
}

/// A validated, trimmed consultation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultRequest {
    pub name: String,
    pub company: String,
    pub contact: String,
    pub package: String,
    pub details: String,
}

impl ConsultDraft {
    /// Preselects the package, as the pricing buttons do.
    pub fn pick(&mut self, package: Package) {
        debug!("Package preselected: {package}");
        self.package = package.to_string();
    }

    /// Trims every field and checks the required ones.
    pub fn validate(&self) -> Result<ConsultRequest> {
        let request = ConsultRequest {
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            contact: self.contact.trim().to_string(),
            package: self.package.trim().to_string(),
            details: self.details.trim().to_string(),
        };

        let missing: Vec<&'static str> = [
            ("name", &request.name),
            ("contact", &request.contact),
            ("package", &request.package),
            ("details", &request.details),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            debug!("Missing fields: {}", missing.join(", "));
            return Err(SiteError::MissingFields(missing));
        }

        Ok(request)
    }
}

impl ConsultRequest {
    fn into_form(self) -> Form {
        Form::new()
            .text("name", self.name)
            .text("company", self.company)
            .text("contact", self.contact)
            .text("package", self.package)
            .text("details", self.details)
    }
}

/// Client for the consultation spreadsheet script.
#[derive(Debug, Clone)]
pub struct ConsultClient {
    client: Client,
    endpoint: String,
}

impl ConsultClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Posts the request as a multipart form.
    ///
    /// The script's reply is opaque: any completed exchange counts as
    /// accepted and only transport failures are errors.
    pub async fn submit(&self, request: ConsultRequest) -> Result<()> {
        info!(
            "Submitting consultation request for package '{}'",
            request.package
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(request.into_form())
            .send()
            .await
            .map_err(|e| {
                error!("Submit error: {e}");
                e
            })?;

        debug!("Consultation endpoint answered with {}", response.status());
        info!("Consultation request submitted");
        Ok(())
    }
}
