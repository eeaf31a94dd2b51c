use crate::{
    models::{mask::FieldMask, schema::Patchable},
    services::{introspection, validation},
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

pub const FIELD_MASK_PROPERTY: &str = "fieldMask";

/// Update payload together with the paths of it the caller wants applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchRequest<T> {
    pub data: T,
    #[serde(default)]
    pub field_mask: Vec<String>,
}

impl<T> PatchRequest<T> {
    pub fn new<I, S>(data: T, field_mask: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data,
            field_mask: field_mask.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mask(&self) -> FieldMask {
        FieldMask::from(self.field_mask.as_slice())
    }
}

/// Every mask entry must be a legal path of `T`; failures are reported on the
/// `fieldMask` property.
impl<T: Patchable> Validate for PatchRequest<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let legal_paths = introspection::legal_paths_for::<T>();
        match validation::validate(&self.mask(), &legal_paths) {
            Ok(()) => Ok(()),
            Err(err) => {
                let mut errors = ValidationErrors::new();
                errors.add(FIELD_MASK_PROPERTY, (&err).into());
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
