use std::env;
use std::time::Duration;

use log::{debug, error, info};

use crate::error::{Result, SiteError};

const DEFAULT_TYPING_DELAY_MS: u64 = 700;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub consult_script_url: Option<String>,
    pub careers_script_url: Option<String>,
    pub careers_sheet_id: Option<String>,
    pub careers_drive_folder_id: Option<String>,
    pub live_roles: Vec<String>,
    pub typing_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let consult_script_url = optional_var("CONSULT_SCRIPT_URL");
        let careers_script_url = optional_var("CAREERS_SCRIPT_URL");
        let careers_sheet_id = optional_var("CAREERS_SHEET_ID");
        let careers_drive_folder_id = optional_var("CAREERS_DRIVE_FOLDER_ID");
        let live_roles = optional_var("CAREERS_LIVE_ROLES")
            .map(|raw| role_list(&raw))
            .unwrap_or_default();

        let typing_delay_ms = match optional_var("TYPING_DELAY_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                error!("Failed to parse TYPING_DELAY_MS '{raw}': {e}");
                SiteError::Config(format!(
                    "TYPING_DELAY_MS must be a number of milliseconds, got '{raw}'"
                ))
            })?,
            None => DEFAULT_TYPING_DELAY_MS,
        };

        info!("Configuration loaded successfully");
        debug!("Consult script URL set: {}", consult_script_url.is_some());
        debug!("Careers script URL set: {}", careers_script_url.is_some());
        debug!(
            "Careers sheet id length: {} characters",
            careers_sheet_id.as_deref().map_or(0, str::len)
        );
        debug!(
            "Careers drive folder id length: {} characters",
            careers_drive_folder_id.as_deref().map_or(0, str::len)
        );
        debug!("Live roles: {}", live_roles.len());
        debug!("Typing delay: {typing_delay_ms}ms");

        Ok(Self {
            consult_script_url,
            careers_script_url,
            careers_sheet_id,
            careers_drive_folder_id,
            live_roles,
            typing_delay: Duration::from_millis(typing_delay_ms),
        })
    }

    /// Consultation endpoint, required once a visitor actually submits.
    pub fn consult_endpoint(&self) -> Result<&str> {
        self.consult_script_url.as_deref().ok_or_else(|| {
            SiteError::Config(
                "Missing CONSULT_SCRIPT_URL. Set the consultation script URL.".to_string(),
            )
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Comma-separated role titles, blanks dropped.
fn role_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_consult_endpoint_is_a_config_error() {
        let config = Config::default();
        let err = config.consult_endpoint().expect_err("expected config error");
        assert!(matches!(err, SiteError::Config(_)));
        assert!(err.user_message().contains("CONSULT_SCRIPT_URL"));
    }

    #[test]
    fn consult_endpoint_is_returned_when_set() {
        let config = Config {
            consult_script_url: Some("https://script.google.com/macros/s/abc/exec".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.consult_endpoint().ok(),
            Some("https://script.google.com/macros/s/abc/exec")
        );
    }

    #[test]
    fn live_roles_are_split_on_commas() {
        assert_eq!(
            role_list(" Frontend Engineer, ,Product Designer,"),
            vec!["Frontend Engineer".to_string(), "Product Designer".to_string()]
        );
        assert!(role_list(" , ").is_empty());
    }
}
