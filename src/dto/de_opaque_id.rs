//!
//! Identifiers are owned by the database and may arrive as uuid strings
//! or as numeric keys. Both are kept as opaque strings.
//!

use serde::{Deserialize, Deserializer};
use serde_json::Number;

#[derive(Deserialize)]
#[serde(untagged)]
enum OpaqueId {
    String(String),
    Number(Number),
}

impl From<OpaqueId> for String {
    fn from(value: OpaqueId) -> Self {
        match value {
            OpaqueId::String(string) => string,
            OpaqueId::Number(number) => number.to_string(),
        }
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(OpaqueId::deserialize(d)?.into())
}

pub fn deserialize_option<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<OpaqueId>::deserialize(d)?.map(String::from))
}
