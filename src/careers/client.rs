//! Client for the careers script that files the resume and the sheet row.

use log::{debug, error, info};
use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::{Map, Value};
use url::Url;

use crate::config::Config;
use crate::error::{Result, SiteError};

use super::application::ApplicationPayload;

const SCRIPT_HOST: &str = "script.google.com";
const PLACEHOLDER_PREFIX: &str = "PASTE_";

/// Plain-text body avoids a CORS preflight on the script endpoint.
const PAYLOAD_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Endpoint and storage ids the careers script needs.
#[derive(Debug, Clone)]
pub struct CareersSettings {
    pub script_url: Url,
    pub sheet_id: String,
    pub drive_folder_id: String,
}

impl CareersSettings {
    /// Checks the careers configuration before anything is uploaded.
    pub fn from_config(config: &Config) -> Result<Self> {
        let script_url = config
            .careers_script_url
            .as_deref()
            .and_then(|raw| Url::parse(raw).ok())
            .filter(|url| url.scheme() == "https" && url.host_str() == Some(SCRIPT_HOST))
            .ok_or_else(|| {
                SiteError::Config(
                    "Missing CAREERS_SCRIPT_URL. Set your Apps Script /exec URL.".to_string(),
                )
            })?;

        let sheet_id = configured_id(config.careers_sheet_id.as_deref()).ok_or_else(|| {
            SiteError::Config("Missing CAREERS_SHEET_ID. Set your Google Sheet ID.".to_string())
        })?;

        let drive_folder_id = configured_id(config.careers_drive_folder_id.as_deref())
            .ok_or_else(|| {
                SiteError::Config(
                    "Missing CAREERS_DRIVE_FOLDER_ID. Set your Drive folder ID.".to_string(),
                )
            })?;

        Ok(Self {
            script_url,
            sheet_id,
            drive_folder_id,
        })
    }
}

fn configured_id(value: Option<&str>) -> Option<String> {
    value
        .filter(|id| !id.is_empty() && !id.starts_with(PLACEHOLDER_PREFIX))
        .map(str::to_string)
}

const LINK_FIELDS: [&str; 3] = ["resume_link", "resumeLink", "fileUrl"];

/// Truthiness of a JSON value as the browser script judged the reply.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads the script's reply field by field so one odd field cannot hide the outcome.
fn interpret_reply(text: &str) -> Result<ApplicationReceipt> {
    let reply: Value = serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Map::new()));

    if !reply.get("success").is_some_and(is_truthy) {
        let message = match reply.get("error") {
            Some(Value::String(error)) if !error.is_empty() => error.clone(),
            Some(error) if is_truthy(error) => error.to_string(),
            _ => "Submission failed".to_string(),
        };
        return Err(SiteError::Submission(message));
    }

    let resume_link = LINK_FIELDS
        .iter()
        .find_map(|field| reply.get(*field).and_then(Value::as_str))
        .filter(|link| !link.is_empty())
        .map(str::to_string);

    Ok(ApplicationReceipt { resume_link })
}

/// What the careers script reports back for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationReceipt {
    pub resume_link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CareersClient {
    client: Client,
    settings: CareersSettings,
}

impl CareersClient {
    pub fn new(settings: CareersSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Posts the application and interprets the script's JSON reply.
    pub async fn submit(&self, payload: &ApplicationPayload) -> Result<ApplicationReceipt> {
        info!(
            "Submitting application for role '{}' ({} base64 bytes)",
            payload.role,
            payload.file_base64.len()
        );

        let body = serde_json::to_string(payload)?;
        let response = self
            .client
            .post(self.settings.script_url.clone())
            .header(CONTENT_TYPE, PAYLOAD_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("Careers script answered {status}: {text}");

        let receipt = interpret_reply(&text).map_err(|e| {
            error!("Careers script rejected application: {e}");
            e
        })?;

        info!("Application accepted for role '{}'", payload.role);
        Ok(receipt)
    }
}
