use crate::{
    models::{FieldMask, Patchable},
    services::{engine::PatchEngine, patch::PatchReport},
};
use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

pub fn apply_typed<U, T>(
    engine: &PatchEngine,
    mask: &FieldMask,
    update: &U,
    target: &mut T,
) -> Result<PatchReport>
where
    U: Patchable + Serialize,
    T: Serialize + DeserializeOwned,
{
    let update = serde_json::to_value(update).context("Failed to serialize patch update")?;
    let mut document =
        serde_json::to_value(&*target).context("Failed to serialize patch target")?;

    let report = engine.apply_to::<U>(mask, &update, &mut document)?;

    *target = serde_json::from_value(document).context("Failed to deserialize patched target")?;
    Ok(report)
}

#[cfg(test)]
#[path = "typed_tests.rs"]
mod tests;
