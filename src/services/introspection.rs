use crate::models::{
    mask::{join_path, PATH_SEPARATOR},
    FieldKind, Patchable, Schema,
};
use serde::Serialize;
use std::{
    any::TypeId,
    collections::{BTreeSet, HashMap},
    sync::{Arc, LazyLock, PoisonError, RwLock},
};
use tracing::debug;

pub const WILDCARD: &str = "*";

/// Every field path a schema accepts in a field mask. Opaque documents are
/// listed as `field.*`, covering the field and everything below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LegalPaths(BTreeSet<String>);

impl LegalPaths {
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `"f."` for every wildcard entry `"f.*"`.
    pub fn document_prefixes(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter_map(|path| path.strip_suffix(WILDCARD))
            .filter(|prefix| prefix.ends_with(PATH_SEPARATOR))
    }

    /// True when `path` is listed or lies below a wildcard entry.
    pub fn covers(&self, path: &str) -> bool {
        self.contains(path)
            || self
                .document_prefixes()
                .any(|prefix| path.starts_with(prefix))
    }
}

impl<S: Into<String>> FromIterator<S> for LegalPaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

pub fn legal_paths(schema: &Schema) -> LegalPaths {
    let mut paths = BTreeSet::new();
    collect(schema, "", &mut paths);
    LegalPaths(paths)
}

fn collect(schema: &Schema, prefix: &str, paths: &mut BTreeSet<String>) {
    for field in schema.fields() {
        let path = join_path(prefix, field.name());
        match field.kind() {
            FieldKind::Value => {
                paths.insert(path);
            }
            FieldKind::OpaqueDocument => {
                paths.insert(join_path(&path, WILDCARD));
            }
            FieldKind::NestedObject => {
                if let Some(nested) = field.schema() {
                    collect(nested, &path, paths);
                }
            }
        }
    }
}

static LEGAL_PATHS: LazyLock<RwLock<HashMap<TypeId, Arc<LegalPaths>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Legal paths of a registered type, computed once per process.
///
/// Concurrent first calls may each compute the set; the first one published
/// wins and all callers observe the same value.
pub fn legal_paths_for<T: Patchable>() -> Arc<LegalPaths> {
    let type_id = TypeId::of::<T>();
    if let Some(paths) = LEGAL_PATHS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
    {
        return Arc::clone(paths);
    }

    let computed = Arc::new(legal_paths(&T::patch_schema()));
    debug!(
        type_name = std::any::type_name::<T>(),
        paths = computed.len(),
        "Computed legal patch paths"
    );

    let mut cache = LEGAL_PATHS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(type_id).or_insert(computed))
}

#[cfg(test)]
#[path = "introspection_tests.rs"]
mod tests;
