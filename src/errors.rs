use serde::Serialize;
use std::{borrow::Cow, fmt};
use thiserror::Error;
use validator::ValidationError;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error(transparent)]
    InvalidMask(#[from] MaskValidationError),

    #[error(transparent)]
    FieldAccess(#[from] FieldAccessError),

    #[error("Failed to convert patch document: {0:#}")]
    Conversion(anyhow::Error),
}

impl PatchError {
    pub fn conversion(err: impl Into<anyhow::Error>) -> Self {
        PatchError::Conversion(err.into())
    }

    /// Recovers a `PatchError` that travelled through an `anyhow` chain; anything
    /// else is treated as a conversion failure.
    pub fn from_service_error(err: anyhow::Error) -> Self {
        match err.downcast::<PatchError>() {
            Ok(patch_err) => patch_err,
            Err(other) => match other.downcast::<MaskValidationError>() {
                Ok(mask_err) => PatchError::InvalidMask(mask_err),
                Err(other) => PatchError::Conversion(other),
            },
        }
    }

    pub fn is_invalid_mask(&self) -> bool {
        matches!(self, PatchError::InvalidMask(_))
    }
}

/// Mask entries that are not covered by the legal path set of the patched type.
///
/// Both lists are sorted so the rendered message is stable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error(
    "Invalid masks [{}]. Allowed values: [{}]",
    .invalid_paths.join(","),
    .allowed_paths.join(",")
)]
pub struct MaskValidationError {
    pub invalid_paths: Vec<String>,
    pub allowed_paths: Vec<String>,
}

impl MaskValidationError {
    pub fn new(
        invalid_paths: impl IntoIterator<Item = String>,
        allowed_paths: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut invalid_paths: Vec<String> = invalid_paths.into_iter().collect();
        let mut allowed_paths: Vec<String> = allowed_paths.into_iter().collect();
        invalid_paths.sort();
        invalid_paths.dedup();
        allowed_paths.sort();
        allowed_paths.dedup();

        Self {
            invalid_paths,
            allowed_paths,
        }
    }
}

impl From<&MaskValidationError> for ValidationError {
    fn from(err: &MaskValidationError) -> Self {
        let mut error = ValidationError::new("invalid_field_mask");
        error.message = Some(Cow::from(err.to_string()));
        error.add_param(Cow::from("invalid"), &err.invalid_paths);
        error.add_param(Cow::from("allowed"), &err.allowed_paths);
        error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldAccessReason {
    /// The update holds a non-object where an object or document was declared.
    UpdateNotObject,
    /// The target holds a non-object where a nested object was expected.
    TargetNotObject,
    /// The target holds a non-object where an opaque document was expected.
    DocumentNotObject,
}

impl fmt::Display for FieldAccessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAccessReason::UpdateNotObject => write!(f, "update value is not an object"),
            FieldAccessReason::TargetNotObject => write!(f, "target value is not an object"),
            FieldAccessReason::DocumentNotObject => {
                write!(f, "target document is not a JSON object")
            }
        }
    }
}

/// A single field the applier could not process. The rest of the walk is not
/// affected by it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Error while processing patch field [{path}]: {reason}")]
pub struct FieldAccessError {
    pub path: String,
    pub reason: FieldAccessReason,
}

impl FieldAccessError {
    pub fn new(path: impl Into<String>, reason: FieldAccessReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
