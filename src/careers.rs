//! Job applications: live roles, the apply modal, resume checks, and the careers client.

mod application;
mod client;
mod modal;

pub use application::{
    ApplicationDraft, ApplicationPayload, DEFAULT_ROLE, MAX_RESUME_BYTES, ResumeFile,
};
pub use client::{ApplicationReceipt, CareersClient, CareersSettings};
pub use modal::{
    ApplyModal, CLOSE_DELAY, ESCAPE_KEY, Modal, PendingApplication, RolesBoard,
};
