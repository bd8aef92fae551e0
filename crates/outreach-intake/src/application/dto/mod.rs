//! Data Transfer Objects (DTOs)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::{SubmissionType, SubmitterIdentity};

/// Raw form-response payload from the public or authenticated surface.
///
/// Exactly one of `external_id` / `anonymous` must match what the owning
/// form's audience type demands: standard forms require the external id,
/// anonymous forms require the flag and forbid the id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptureSubmissionCommand {
    pub form_id: String,
    /// Field-id keyed answers, exactly as entered.
    pub content: HashMap<String, Value>,
    pub external_id: Option<String>,
    pub anonymous: bool,
}

/// Legacy/ad-hoc intake entry with fixed semantic content keys and no owning
/// form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordLegacyCommand {
    pub submission_type: SubmissionType,
    pub content: HashMap<String, Value>,
    pub submitted_by: SubmitterIdentity,
}
