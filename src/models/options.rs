use serde::{Deserialize, Serialize};

/// What to do with mask entries that no schema field accounts for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskPolicy {
    /// Validate the mask before applying and fail on unknown entries.
    #[default]
    Reject,
    /// Apply without validation; unknown entries are never consulted.
    Ignore,
}

/// What to do when a single field cannot be patched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorPolicy {
    /// Log the failure, record it in the report and continue with the next field.
    #[default]
    Skip,
    /// Stop at the first failure. Fields handled before it stay patched.
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOptions {
    pub mask_policy: MaskPolicy,
    pub field_errors: FieldErrorPolicy,
}

impl PatchOptions {
    pub fn new(mask_policy: MaskPolicy, field_errors: FieldErrorPolicy) -> Self {
        Self {
            mask_policy,
            field_errors,
        }
    }
}
