//! Post record model

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Text form of a scalar metadata value
fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Custom deserializer that handles both a single value and a list of values,
/// keeping numbers and booleans as their text form
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![Value::from(value).to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Value>()? {
                if !item.is_null() {
                    vec.push(scalar_to_string(item));
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Optional text field that also accepts numbers and booleans
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
            Ok(Some(scalar_to_string(value)))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

/// One entry of the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Source filename without extension
    pub id: String,

    /// Path of the full document, relative to the site root
    pub url: String,

    pub title: String,

    pub excerpt: String,

    /// Publication date as written in the metadata block
    pub date: String,

    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,

    #[serde(
        default,
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    /// Any other metadata fields, kept in the order they were written
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl PostRecord {
    /// Build a record from a parsed metadata payload.
    ///
    /// `id` and `url` always come from the document location; keys of the
    /// same name in the payload are dropped.
    pub fn from_meta(id: &str, url: &str, meta: Map<String, Value>) -> serde_json::Result<Self> {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(id.to_string()));
        fields.insert("url".to_string(), Value::String(url.to_string()));

        for (key, value) in meta {
            if key == "id" || key == "url" {
                tracing::debug!("Ignoring `{}` in metadata of {}", key, id);
                continue;
            }
            fields.insert(key, value);
        }

        serde_json::from_value(Value::Object(fields))
    }
}
