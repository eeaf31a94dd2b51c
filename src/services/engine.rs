use crate::{
    config::Config,
    errors::PatchError,
    models::{FieldMask, MaskPolicy, PatchOptions, PatchRequest, Patchable, Schema},
    services::{
        introspection::{self, LegalPaths},
        patch::{self, PatchReport},
        typed, validation,
    },
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Entry point that applies patches under configured mask and field error
/// policies. Holds no per-patch state and can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchEngine {
    options: PatchOptions,
}

impl PatchEngine {
    pub fn new(options: PatchOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.patch_options())
    }

    pub fn options(&self) -> PatchOptions {
        self.options
    }

    /// Applies a patch described by an ad-hoc schema. Legal paths are derived
    /// on every call.
    pub fn apply(
        &self,
        mask: &FieldMask,
        schema: &Schema,
        update: &JsonValue,
        target: &mut JsonValue,
    ) -> Result<PatchReport, PatchError> {
        if self.options.mask_policy == MaskPolicy::Reject {
            validation::validate(mask, &introspection::legal_paths(schema))?;
        }
        self.apply_unchecked(mask, schema, update, target)
    }

    /// Applies a patch for a registered type, validating against its cached
    /// legal paths.
    pub fn apply_to<T: Patchable>(
        &self,
        mask: &FieldMask,
        update: &JsonValue,
        target: &mut JsonValue,
    ) -> Result<PatchReport, PatchError> {
        if self.options.mask_policy == MaskPolicy::Reject {
            validation::validate(mask, &introspection::legal_paths_for::<T>())?;
        }
        self.apply_unchecked(mask, &T::patch_schema(), update, target)
    }

    /// Applies `update` onto a typed target through its JSON form. The target
    /// is only replaced once the patched document converts back.
    pub fn apply_typed<U, T>(
        &self,
        mask: &FieldMask,
        update: &U,
        target: &mut T,
    ) -> Result<PatchReport, PatchError>
    where
        U: Patchable + Serialize,
        T: Serialize + DeserializeOwned,
    {
        typed::apply_typed(self, mask, update, target).map_err(PatchError::from_service_error)
    }

    pub fn apply_request<U, T>(
        &self,
        request: &PatchRequest<U>,
        target: &mut T,
    ) -> Result<PatchReport, PatchError>
    where
        U: Patchable + Serialize,
        T: Serialize + DeserializeOwned,
    {
        self.apply_typed(&request.mask(), &request.data, target)
    }

    pub fn legal_paths<T: Patchable>(&self) -> Arc<LegalPaths> {
        introspection::legal_paths_for::<T>()
    }

    fn apply_unchecked(
        &self,
        mask: &FieldMask,
        schema: &Schema,
        update: &JsonValue,
        target: &mut JsonValue,
    ) -> Result<PatchReport, PatchError> {
        let report =
            patch::apply_with_policy(mask, schema, update, target, self.options.field_errors)?;
        debug!(
            applied = report.applied().len(),
            skipped = report.skipped().len(),
            "Patch applied"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
