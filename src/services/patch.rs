use crate::{
    errors::{FieldAccessError, FieldAccessReason},
    models::{
        mask::join_path, FieldDescriptor, FieldErrorPolicy, FieldKind, FieldMask, MaskNode,
        Schema,
    },
    utils::json_utils,
};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, error, warn};

/// Outcome of a patch: the paths written and the fields that were skipped
/// because they could not be accessed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    applied: Vec<String>,
    skipped: Vec<FieldAccessError>,
}

impl PatchReport {
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    pub fn skipped(&self) -> &[FieldAccessError] {
        &self.skipped
    }

    /// False when at least one masked field was left unpatched.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Applies the masked fields of `update` onto `target` in place.
///
/// The mask is not validated here: entries that match no schema field are
/// never consulted. Fields that cannot be accessed are logged, recorded in the
/// report and skipped.
pub fn apply(
    mask: &FieldMask,
    schema: &Schema,
    update: &JsonValue,
    target: &mut JsonValue,
) -> PatchReport {
    apply_with_policy(mask, schema, update, target, FieldErrorPolicy::Skip).unwrap_or_default()
}

/// Same as [`apply`] with an explicit policy for inaccessible fields.
///
/// Under [`FieldErrorPolicy::Abort`] the first failure is returned; fields
/// handled before it remain patched.
pub fn apply_with_policy(
    mask: &FieldMask,
    schema: &Schema,
    update: &JsonValue,
    target: &mut JsonValue,
    policy: FieldErrorPolicy,
) -> Result<PatchReport, FieldAccessError> {
    let mut walker = Walker::new(policy);
    walker.run(&mask.tree(), schema, update, target)?;
    Ok(walker.report)
}

struct Walker {
    policy: FieldErrorPolicy,
    report: PatchReport,
}

impl Walker {
    fn new(policy: FieldErrorPolicy) -> Self {
        Self {
            policy,
            report: PatchReport::default(),
        }
    }

    fn run(
        &mut self,
        mask: &MaskNode,
        schema: &Schema,
        update: &JsonValue,
        target: &mut JsonValue,
    ) -> Result<(), FieldAccessError> {
        let JsonValue::Object(update) = update else {
            return self.record(FieldAccessError::new("", FieldAccessReason::UpdateNotObject));
        };
        let JsonValue::Object(target) = target else {
            return self.record(FieldAccessError::new("", FieldAccessReason::TargetNotObject));
        };
        self.walk(mask, schema, update, target, "")
    }

    fn walk(
        &mut self,
        mask: &MaskNode,
        schema: &Schema,
        update: &Map<String, JsonValue>,
        target: &mut Map<String, JsonValue>,
        prefix: &str,
    ) -> Result<(), FieldAccessError> {
        for field in schema.fields() {
            let path = join_path(prefix, field.name());
            match field.kind() {
                FieldKind::Value => self.apply_value(field, mask, update, target, path),
                FieldKind::OpaqueDocument => {
                    self.apply_document(field, mask, update, target, path)?
                }
                FieldKind::NestedObject => self.apply_nested(field, mask, update, target, path)?,
            }
        }
        Ok(())
    }

    fn apply_value(
        &mut self,
        field: &FieldDescriptor,
        mask: &MaskNode,
        update: &Map<String, JsonValue>,
        target: &mut Map<String, JsonValue>,
        path: String,
    ) {
        let Some(target_name) = field.target_name() else {
            return;
        };
        if !mask.selects(field.name()) {
            return;
        }

        let value = update.get(field.name()).cloned().unwrap_or(JsonValue::Null);
        target.insert(target_name.to_string(), value);
        debug!(path = %path, target = target_name, "Applied patch field");
        self.report.applied.push(path);
    }

    fn apply_document(
        &mut self,
        field: &FieldDescriptor,
        mask: &MaskNode,
        update: &Map<String, JsonValue>,
        target: &mut Map<String, JsonValue>,
        path: String,
    ) -> Result<(), FieldAccessError> {
        let Some(target_name) = field.target_name() else {
            return Ok(());
        };
        let Some(sub_mask) = mask.child(field.name()).filter(|node| node.has_children()) else {
            return Ok(());
        };

        // Nothing to merge; the target document is left as is.
        let mut incoming = match update.get(field.name()) {
            None | Some(JsonValue::Null) => return Ok(()),
            Some(JsonValue::Object(doc)) => doc.clone(),
            Some(_) => {
                return self.record(FieldAccessError::new(
                    path,
                    FieldAccessReason::UpdateNotObject,
                ));
            }
        };

        let slot = target.entry(target_name).or_insert(JsonValue::Null);
        if slot.is_null() {
            *slot = JsonValue::Object(Map::new());
        }
        let JsonValue::Object(document) = slot else {
            return self.record(FieldAccessError::new(
                path,
                FieldAccessReason::DocumentNotObject,
            ));
        };

        json_utils::prune_to_mask_leaves(&mut incoming, sub_mask);
        json_utils::prune_target_masked_keys(document, sub_mask);
        json_utils::merge_maps(document, incoming);

        debug!(path = %path, target = target_name, "Merged patch document");
        self.report.applied.push(path);
        Ok(())
    }

    fn apply_nested(
        &mut self,
        field: &FieldDescriptor,
        mask: &MaskNode,
        update: &Map<String, JsonValue>,
        target: &mut Map<String, JsonValue>,
        path: String,
    ) -> Result<(), FieldAccessError> {
        let child_update = match update.get(field.name()) {
            None | Some(JsonValue::Null) => return Ok(()),
            Some(JsonValue::Object(child)) => child,
            Some(_) => {
                return self.record(FieldAccessError::new(
                    path,
                    FieldAccessReason::UpdateNotObject,
                ));
            }
        };
        let (Some(child_mask), Some(schema)) = (mask.child(field.name()), field.schema()) else {
            return Ok(());
        };

        if field.is_flattened() {
            return self.walk(child_mask, schema, child_update, target, &path);
        }
        let Some(target_name) = field.target_name() else {
            return Ok(());
        };

        // Only materialise a missing child object when something lands in it.
        if target.get(target_name).map_or(true, JsonValue::is_null) {
            let mut fresh = Map::new();
            let result = self.walk(child_mask, schema, child_update, &mut fresh, &path);
            if !fresh.is_empty() {
                target.insert(target_name.to_string(), JsonValue::Object(fresh));
            }
            return result;
        }

        match target.get_mut(target_name) {
            Some(JsonValue::Object(child_target)) => {
                self.walk(child_mask, schema, child_update, child_target, &path)
            }
            _ => self.record(FieldAccessError::new(
                path,
                FieldAccessReason::TargetNotObject,
            )),
        }
    }

    fn record(&mut self, err: FieldAccessError) -> Result<(), FieldAccessError> {
        match self.policy {
            FieldErrorPolicy::Skip => {
                warn!(path = %err.path, reason = %err.reason, "Skipping patch field");
                self.report.skipped.push(err);
                Ok(())
            }
            FieldErrorPolicy::Abort => {
                error!(path = %err.path, reason = %err.reason, "Aborting patch");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
