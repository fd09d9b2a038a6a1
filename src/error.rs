use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Resume rejected: {0}")]
    Resume(String),

    #[error("Submission rejected: {0}")]
    Submission(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteError {
    /// Returns the status text shown to a visitor for this error
    pub fn user_message(&self) -> String {
        match self {
            SiteError::Config(message)
            | SiteError::Resume(message)
            | SiteError::Submission(message) => message.clone(),
            SiteError::MissingFields(fields) => {
                format!("Please fill in: {}.", fields.join(", "))
            }
            SiteError::Reqwest(_) => "Submit failed. Please try again in a moment.".to_string(),
            SiteError::Json(_) => "Submission failed".to_string(),
            SiteError::Io(_) => "Upload failed".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
