use crate::{
    errors::MaskValidationError,
    models::{FieldMask, Patchable},
    services::introspection::{self, LegalPaths},
};

/// Checks every mask entry against the legal path set and reports all of the
/// entries it does not cover at once.
pub fn validate(mask: &FieldMask, legal_paths: &LegalPaths) -> Result<(), MaskValidationError> {
    let invalid: Vec<String> = mask
        .iter()
        .filter(|entry| !legal_paths.covers(entry))
        .map(str::to_string)
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    Err(MaskValidationError::new(
        invalid,
        legal_paths.iter().map(str::to_string),
    ))
}

pub fn validate_for<T: Patchable>(mask: &FieldMask) -> Result<(), MaskValidationError> {
    validate(mask, &introspection::legal_paths_for::<T>())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
