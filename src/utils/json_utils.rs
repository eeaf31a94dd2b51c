use crate::models::MaskNode;
use serde_json::{Map, Value as JsonValue};

/// Deep-merges `update` into `target`. Objects merge key by key; any other
/// pairing replaces the target value, `null` included.
pub fn merge_into(target: &mut JsonValue, update: JsonValue) {
    match (target, update) {
        (JsonValue::Object(target_map), JsonValue::Object(update_map)) => {
            merge_maps(target_map, update_map);
        }
        (target, update) => *target = update,
    }
}

pub fn merge_maps(target: &mut Map<String, JsonValue>, update: Map<String, JsonValue>) {
    for (key, value) in update {
        match target.get_mut(&key) {
            Some(existing) => merge_into(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

/// Keeps only the parts of an update document the mask selects.
///
/// A key named by the mask at this level is kept with its whole value, even
/// an object; a plain recursion into it would drop the masked subtree. Object
/// values of other keys are pruned against the next mask level and dropped
/// once nothing selected remains in them.
pub fn prune_to_mask_leaves(doc: &mut Map<String, JsonValue>, mask: &MaskNode) {
    doc.retain(|key, value| {
        let Some(child) = mask.child(key) else {
            return false;
        };
        if child.is_terminal() {
            return true;
        }
        match value {
            JsonValue::Object(nested) => {
                prune_to_mask_leaves(nested, child);
                !nested.is_empty()
            }
            _ => false,
        }
    });
}

/// Clears the keys of a target document the mask is about to rewrite.
///
/// Keys named at this level are removed. For deeper entries the existing
/// object is descended into, so its unmasked keys survive.
pub fn prune_target_masked_keys(doc: &mut Map<String, JsonValue>, mask: &MaskNode) {
    for (key, child) in mask.children() {
        if child.is_terminal() {
            doc.shift_remove(key);
        } else if let Some(JsonValue::Object(nested)) = doc.get_mut(key) {
            prune_target_masked_keys(nested, child);
        }
    }
}

#[cfg(test)]
#[path = "json_utils_tests.rs"]
mod tests;
