//! Request types and JSON parsing

use crate::{FillError, Result};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Cover heading text
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

impl Metadata {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Both title and subtitle must contain something other than whitespace
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(FillError::InvalidRequest("meta.title must not be empty".to_string()));
        }
        if self.subtitle.trim().is_empty() {
            return Err(FillError::InvalidRequest(
                "meta.subtitle must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One row of the cover table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    pub label: String,
    #[serde(deserialize_with = "scalar_string")]
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ordered fields, in display order
///
/// Deserializes from either a JSON object (member order kept, duplicate
/// labels kept as separate rows) or an array of `{ "label", "value" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(pub Vec<Field>);

impl Fields {
    pub fn into_vec(self) -> Vec<Field> {
        self.0
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Self(fields)
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Fields;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object of label/value pairs or an array of fields")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, value)) = map.next_entry::<String, serde_json::Value>()? {
                    fields.push(Field {
                        label,
                        value: value_to_string(&value).map_err(de::Error::custom)?,
                    });
                }
                Ok(Fields(fields))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut fields = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(field) = seq.next_element::<Field>()? {
                    fields.push(field);
                }
                Ok(Fields(fields))
            }
        }

        deserializer.deserialize_any(FieldsVisitor)
    }
}

/// Body of a generate request
///
/// Both members are optional at the JSON level so a missing one is reported
/// as an invalid request rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FillRequest {
    #[serde(default)]
    pub meta: Option<Metadata>,
    #[serde(default)]
    pub data: Option<Fields>,
}

impl FillRequest {
    /// Check the request and split it into validated parts
    pub fn into_parts(self) -> Result<(Metadata, Vec<Field>)> {
        let meta = self
            .meta
            .ok_or_else(|| FillError::InvalidRequest("missing `meta`".to_string()))?;
        let data = self
            .data
            .ok_or_else(|| FillError::InvalidRequest("missing `data`".to_string()))?;

        meta.validate()?;
        Ok((meta, data.into_vec()))
    }
}

/// Parse a request from a JSON string
pub fn parse_request(json: &str) -> Result<FillRequest> {
    serde_json::from_str(json).map_err(|e| FillError::InvalidRequest(e.to_string()))
}

/// Render a scalar JSON value as field text
fn value_to_string(value: &serde_json::Value) -> std::result::Result<String, String> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err("field values must be strings, numbers, booleans or null".to_string())
        }
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    value_to_string(&value).map_err(de::Error::custom)
}
