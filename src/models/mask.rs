use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const PATH_SEPARATOR: char = '.';

/// Set of dotted field paths a caller wants to update. Order and duplicates
/// carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMask(BTreeSet<String>);

impl FieldMask {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

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

    /// Per-segment view of the mask used while walking a document.
    pub fn tree(&self) -> MaskNode {
        MaskNode::from_paths(self.iter())
    }
}

impl<S: Into<String>> FromIterator<S> for FieldMask {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<String>> for FieldMask {
    fn from(paths: Vec<String>) -> Self {
        Self::new(paths)
    }
}

impl From<&[String]> for FieldMask {
    fn from(paths: &[String]) -> Self {
        Self::new(paths.iter().cloned())
    }
}

/// One level of a field mask. A node is terminal when a mask entry ends at it;
/// its children are the entries that continue below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskNode {
    children: BTreeMap<String, MaskNode>,
    terminal: bool,
}

impl MaskNode {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = MaskNode::default();
        for path in paths {
            root.insert(path.as_ref());
        }
        root
    }

    fn insert(&mut self, path: &str) {
        let mut current = self;
        for segment in path.split(PATH_SEPARATOR) {
            current = current.children.entry(segment.to_string()).or_default();
        }
        current.terminal = true;
    }

    pub fn child(&self, name: &str) -> Option<&MaskNode> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &MaskNode)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// True when a mask entry names this exact path.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// True when `name` is named by a mask entry at this level.
    pub fn selects(&self, name: &str) -> bool {
        self.child(name).is_some_and(MaskNode::is_terminal)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Joins a path prefix and a field name with the path separator.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{name}")
    }
}

#[cfg(test)]
#[path = "mask_tests.rs"]
mod tests;
