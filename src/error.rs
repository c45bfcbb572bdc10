//! The error vocabulary shared by both flows.
//!
//! Every failure the core can produce falls into one of five kinds.  Nothing
//! here is retried or recovered locally — the single identity-resolution
//! fallback lives in [`crate::resolve`], and everything else bubbles up to
//! `main` for reporting.

use thiserror::Error;

use crate::model::{BackupManagementType, WorkloadType};

/// All failures surfaced by the trigger and restore flows.
#[derive(Debug, Error)]
pub enum ArmError {
    /// A mandatory field was missing or malformed.  Raised before any
    /// network call is made.
    #[error("invalid value for {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// The HTTP request never produced a usable response (connection
    /// refused, DNS, timeout, malformed body).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status.  The body is carried
    /// verbatim — the service's own message is usually the most useful
    /// thing to show the operator.
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// Both storage-provider lookups failed.  Carries the error from each
    /// attempt; the classic-provider error would otherwise be lost.
    #[error(
        "storage account resolution failed for both provider namespaces \
         (classic: {classic}; current: {current})"
    )]
    ResolutionExhausted {
        classic: Box<ArmError>,
        current: Box<ArmError>,
    },

    /// No provider is registered for this workload/management pair.
    #[error("unsupported workload/provider combination: {workload}/{management}")]
    UnsupportedProvider {
        workload: WorkloadType,
        management: BackupManagementType,
    },

    /// The restore job submission itself failed, after identity resolution
    /// and provider selection both succeeded.
    #[error("restore job submission failed: {0}")]
    Submission(Box<ArmError>),
}

impl ArmError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for ArmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
