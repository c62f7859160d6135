//! Identity attached to a request once its access token is accepted.

use serde::{Deserialize, Serialize};

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: String,
    pub device_id: Option<String>,
}

impl Identity {
    pub fn new(subject_id: impl Into<String>, device_id: Option<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            device_id,
        }
    }
}

/// Device assigned when the caller supplies none
pub const DEFAULT_DEVICE_ID: &str = "default";
