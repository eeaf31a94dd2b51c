use serde::{Deserialize, Deserializer, Serialize};

/// How the applier treats a field, derived from its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Value,
    NestedObject,
    OpaqueDocument,
}

/// Declared type of a patchable field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Scalars, strings, lists and anything else copied as a whole.
    Value,
    /// Free-form JSON object patched key by key.
    Document,
    /// Structured object described by its own schema.
    Object(Box<Schema>),
}

/// Where a field's value lands on the target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetMapping {
    #[default]
    SameName,
    Renamed(String),
    /// The field is patchable but never written.
    Unmapped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldDescriptor", into = "RawFieldDescriptor")]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    mapping: TargetMapping,
    force_value: bool,
    flatten: bool,
}

impl FieldDescriptor {
    fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            mapping: TargetMapping::SameName,
            force_value: false,
            flatten: false,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Value)
    }

    pub fn document(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Document)
    }

    pub fn object(name: impl Into<String>, schema: Schema) -> Self {
        Self::new(name, FieldType::Object(Box::new(schema)))
    }

    /// Nested field whose schema comes from a registered [`Patchable`] type.
    pub fn nested<T: Patchable>(name: impl Into<String>) -> Self {
        Self::object(name, T::patch_schema())
    }

    pub fn map_to(mut self, target: impl Into<String>) -> Self {
        self.mapping = TargetMapping::Renamed(target.into());
        self
    }

    pub fn unmapped(mut self) -> Self {
        self.mapping = TargetMapping::Unmapped;
        self
    }

    /// Treat the field as a plain value whatever its declared type, so it is
    /// copied wholesale instead of merged.
    pub fn force_value(mut self) -> Self {
        self.force_value = true;
        self
    }

    /// Patch a nested object's fields onto the enclosing target instead of a
    /// child object of the same name.
    pub fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn mapping(&self) -> &TargetMapping {
        &self.mapping
    }

    pub fn kind(&self) -> FieldKind {
        if self.force_value {
            return FieldKind::Value;
        }
        match self.field_type {
            FieldType::Value => FieldKind::Value,
            FieldType::Document => FieldKind::OpaqueDocument,
            FieldType::Object(_) => FieldKind::NestedObject,
        }
    }

    /// Name of the target field, or `None` when the field is not mapped.
    pub fn target_name(&self) -> Option<&str> {
        match &self.mapping {
            TargetMapping::SameName => Some(&self.name),
            TargetMapping::Renamed(target) => Some(target),
            TargetMapping::Unmapped => None,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        self.mapping == TargetMapping::Unmapped
    }

    pub fn is_flattened(&self) -> bool {
        self.flatten
    }

    pub fn schema(&self) -> Option<&Schema> {
        match &self.field_type {
            FieldType::Object(schema) => Some(schema.as_ref()),
            _ => None,
        }
    }
}

/// Ordered list of the patchable fields of one type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldDescriptor> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Types that declare a patch schema. The schema must be a pure function of
/// the type; legal paths derived from it are cached per type.
pub trait Patchable: 'static {
    fn patch_schema() -> Schema;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawFieldType {
    Value,
    Document,
    Object,
}

#[derive(Serialize, Deserialize)]
struct RawFieldDescriptor {
    name: String,
    field_type: RawFieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<Schema>,
    /// Absent: same name. `null`: do not map. String: rename.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    map_to: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "is_false")]
    force_value: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    flatten: bool,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl TryFrom<RawFieldDescriptor> for FieldDescriptor {
    type Error = String;

    fn try_from(raw: RawFieldDescriptor) -> Result<Self, Self::Error> {
        let field_type = match (raw.field_type, raw.schema) {
            (RawFieldType::Value, None) => FieldType::Value,
            (RawFieldType::Document, None) => FieldType::Document,
            (RawFieldType::Object, Some(schema)) => FieldType::Object(Box::new(schema)),
            (RawFieldType::Object, None) => {
                return Err(format!("object field '{}' requires a schema", raw.name));
            }
            (_, Some(_)) => {
                return Err(format!(
                    "field '{}' declares a schema but is not an object",
                    raw.name
                ));
            }
        };
        if raw.flatten && raw.field_type != RawFieldType::Object {
            return Err(format!(
                "field '{}' is flattened but is not an object",
                raw.name
            ));
        }
        let mapping = match raw.map_to {
            None => TargetMapping::SameName,
            Some(None) => TargetMapping::Unmapped,
            Some(Some(target)) if target.is_empty() => TargetMapping::SameName,
            Some(Some(target)) => TargetMapping::Renamed(target),
        };

        Ok(FieldDescriptor {
            name: raw.name,
            field_type,
            mapping,
            force_value: raw.force_value,
            flatten: raw.flatten,
        })
    }
}

impl From<FieldDescriptor> for RawFieldDescriptor {
    fn from(field: FieldDescriptor) -> Self {
        let (field_type, schema) = match field.field_type {
            FieldType::Value => (RawFieldType::Value, None),
            FieldType::Document => (RawFieldType::Document, None),
            FieldType::Object(schema) => (RawFieldType::Object, Some(*schema)),
        };
        let map_to = match field.mapping {
            TargetMapping::SameName => None,
            TargetMapping::Renamed(target) => Some(Some(target)),
            TargetMapping::Unmapped => Some(None),
        };

        RawFieldDescriptor {
            name: field.name,
            field_type,
            schema,
            map_to,
            force_value: field.force_value,
            flatten: field.flatten,
        }
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
