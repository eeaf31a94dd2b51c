//! Field-mask driven partial updates.
//!
//! A [`Schema`] declares which fields of a type may be patched. A
//! [`FieldMask`] lists the dotted paths a caller wants changed, and the
//! applier copies exactly those paths from an update document onto a target,
//! descending into nested objects and merging opaque JSON documents key by key.

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;

pub use errors::{FieldAccessError, FieldAccessReason, MaskValidationError, PatchError};
pub use models::{
    FieldDescriptor, FieldErrorPolicy, FieldKind, FieldMask, MaskPolicy, PatchOptions,
    PatchRequest, Patchable, Schema,
};
pub use services::{
    apply, legal_paths, legal_paths_for, validate, LegalPaths, PatchEngine, PatchReport,
};
