//! Apply modal state and the submission flow behind it.

use std::time::Duration;

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, SiteError};

use super::application::{ApplicationDraft, ApplicationPayload, DEFAULT_ROLE};
use super::client::{ApplicationReceipt, CareersClient, CareersSettings};

/// How long the success status stays visible before the modal closes.
pub const CLOSE_DELAY: Duration = Duration::from_millis(900);

pub const ESCAPE_KEY: &str = "Escape";

/// An overlay that can be dismissed with Escape or a click outside its panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modal {
    open: bool,
}

impl Modal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Closes on Escape. Returns true when the key closed the modal.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == ESCAPE_KEY && self.open {
            self.close();
            return true;
        }
        false
    }

    /// A click on the backdrop, outside the panel.
    pub fn backdrop_click(&mut self) {
        self.close();
    }
}

/// The live-roles overlay listing the openings a visitor can apply for.
#[derive(Debug, Clone, Default)]
pub struct RolesBoard {
    modal: Modal,
    roles: Vec<String>,
}

impl RolesBoard {
    pub fn new(roles: Vec<String>) -> Self {
        Self {
            modal: Modal::default(),
            roles,
        }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn open(&mut self) {
        info!("Showing {} live roles", self.roles.len());
        self.modal.open();
    }

    pub fn close(&mut self) {
        self.modal.close();
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        self.modal.handle_key(key)
    }

    pub fn backdrop_click(&mut self) {
        self.modal.backdrop_click();
    }

    /// Takes the role at a 1-based list position and closes the board.
    ///
    /// Only an open board hands out roles.
    pub fn pick(&mut self, number: usize) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        let role = self.roles.get(number.checked_sub(1)?)?.clone();
        debug!("Live role picked: '{role}'");
        self.modal.close();
        Some(role)
    }
}

/// An application that passed every local check and is ready to post.
#[derive(Debug, Clone)]
pub struct PendingApplication {
    client: CareersClient,
    payload: ApplicationPayload,
}

impl PendingApplication {
    pub fn payload(&self) -> &ApplicationPayload {
        &self.payload
    }

    pub async fn send(&self) -> Result<ApplicationReceipt> {
        self.client.submit(&self.payload).await
    }
}

#[derive(Debug, Clone)]
pub struct ApplyModal {
    modal: Modal,
    role: String,
    status: String,
}

impl Default for ApplyModal {
    fn default() -> Self {
        Self {
            modal: Modal::default(),
            role: DEFAULT_ROLE.to_string(),
            status: String::new(),
        }
    }
}

impl ApplyModal {
    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        debug!("Apply status: {}", self.status);
    }

    /// Opens the modal for the role carried by an apply button.
    pub fn open_for_role(&mut self, role: Option<&str>) {
        let role = role
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .unwrap_or(DEFAULT_ROLE);
        info!("Opening application form for '{role}'");
        self.role = role.to_string();
        self.status.clear();
        self.modal.open();
    }

    pub fn close(&mut self) {
        self.modal.close();
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        self.modal.handle_key(key)
    }

    pub fn backdrop_click(&mut self) {
        self.modal.backdrop_click();
    }

    /// Runs the whole submission, keeping the status line current.
    ///
    /// On success the status reads "Submitted ✅"; the caller closes the
    /// modal after [`CLOSE_DELAY`]. On failure the status carries the
    /// error's user message.
    pub async fn submit(
        &mut self,
        config: &Config,
        draft: &ApplicationDraft,
    ) -> Result<ApplicationReceipt> {
        let pending = self.prepare(config, draft)?;
        let outcome = pending.send().await;
        self.finish(outcome)
    }

    /// Checks configuration, resume and form fields, leaving the status at
    /// "Uploading resume..." when the application is ready to post.
    pub fn prepare(
        &mut self,
        config: &Config,
        draft: &ApplicationDraft,
    ) -> Result<PendingApplication> {
        match CareersSettings::from_config(config) {
            Ok(settings) => self.prepare_with(settings, draft),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Same as [`ApplyModal::prepare`] with settings that were already checked.
    pub fn prepare_with(
        &mut self,
        settings: CareersSettings,
        draft: &ApplicationDraft,
    ) -> Result<PendingApplication> {
        let resume = match draft.checked_resume() {
            Ok(resume) => resume,
            Err(e) => return Err(self.fail(e)),
        };

        self.set_status("Uploading resume...");
        let payload = match ApplicationPayload::build(
            &settings.sheet_id,
            &settings.drive_folder_id,
            &self.role,
            draft,
            resume,
        ) {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail(e)),
        };

        Ok(PendingApplication {
            client: CareersClient::new(settings),
            payload,
        })
    }

    /// Records the outcome of [`PendingApplication::send`] in the status line.
    pub fn finish(&mut self, outcome: Result<ApplicationReceipt>) -> Result<ApplicationReceipt> {
        match outcome {
            Ok(receipt) => {
                self.set_status("Submitted ✅");
                Ok(receipt)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Puts a failure on the status line and hands the error back.
    pub fn fail(&mut self, error: SiteError) -> SiteError {
        warn!("Application for '{}' not submitted: {error}", self.role);
        self.set_status(error.user_message());
        error
    }
}
