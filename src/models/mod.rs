pub mod mask;
pub mod options;
pub mod request;
pub mod schema;

pub use mask::{FieldMask, MaskNode};
pub use options::{FieldErrorPolicy, MaskPolicy, PatchOptions};
pub use request::PatchRequest;
pub use schema::{FieldDescriptor, FieldKind, FieldType, Patchable, Schema, TargetMapping};
