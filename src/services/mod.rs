pub mod engine;
pub mod introspection;
pub mod patch;
pub mod typed;
pub mod validation;

pub use engine::PatchEngine;
pub use introspection::{legal_paths, legal_paths_for, LegalPaths};
pub use patch::{apply, apply_with_policy, PatchReport};
pub use validation::{validate, validate_for};
