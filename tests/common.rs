#![allow(dead_code)]

use maskpatch::{FieldDescriptor, Patchable, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// `{a: Value, b: OpaqueDocument, c: NestedObject{d: Value, e: Value}}`
pub struct Sample;

impl Patchable for Sample {
    fn patch_schema() -> Schema {
        Schema::new()
            .field(FieldDescriptor::value("a"))
            .field(FieldDescriptor::document("b"))
            .field(FieldDescriptor::nested::<SampleChild>("c"))
    }
}

pub struct SampleChild;

impl Patchable for SampleChild {
    fn patch_schema() -> Schema {
        Schema::new()
            .field(FieldDescriptor::value("d"))
            .field(FieldDescriptor::value("e"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email_address: Option<String>,
    pub internal_note: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub extra_info: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub street: Option<String>,
    pub city: Option<String>,
}

impl Patchable for AddressUpdate {
    fn patch_schema() -> Schema {
        Schema::new()
            .field(FieldDescriptor::value("street"))
            .field(FieldDescriptor::value("city"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub phone: Option<String>,
}

impl Patchable for ContactUpdate {
    fn patch_schema() -> Schema {
        Schema::new().field(FieldDescriptor::value("phone"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub internal_note: Option<String>,
    pub contact: Option<ContactUpdate>,
    pub address: Option<AddressUpdate>,
    pub extra_info: Option<JsonValue>,
}

impl Patchable for CustomerUpdate {
    fn patch_schema() -> Schema {
        Schema::new()
            .field(FieldDescriptor::value("name"))
            .field(FieldDescriptor::value("email").map_to("email_address"))
            .field(FieldDescriptor::value("internal_note").unmapped())
            .field(FieldDescriptor::nested::<ContactUpdate>("contact").flatten())
            .field(FieldDescriptor::nested::<AddressUpdate>("address"))
            .field(FieldDescriptor::document("extra_info"))
    }
}

pub fn customer() -> Customer {
    Customer {
        name: "Ada".to_string(),
        email_address: Some("ada@example.com".to_string()),
        internal_note: Some("vip".to_string()),
        phone: Some("+385 1 000".to_string()),
        address: Some(Address {
            street: Some("Ilica 1".to_string()),
            city: Some("Zagreb".to_string()),
        }),
        extra_info: Some(json!({
            "preferences": {"newsletter": true, "language": "hr"},
            "source": "web"
        })),
    }
}
