//! Declaration maps and their CSS text form
//!
//! A declaration map is the object form of a rule body: camelCase property
//! names mapped to values, serialized in insertion order as
//! `kebab-name:value;` segments.

use std::fmt;

use serde::Deserialize;
use serde::de::{MapAccess, Visitor};
use serde_json::Value;

use crate::error::{Result, StyleError};

/// A single declaration value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeclarationValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for DeclarationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl From<&str> for DeclarationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DeclarationValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for DeclarationValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DeclarationValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for DeclarationValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

/// Format a number the way script hosts stringify them (`10`, `1.5`, `1e+21`)
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// Insertion-ordered property map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationMap {
    entries: Vec<(String, DeclarationValue)>,
}

impl DeclarationMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property. An existing key keeps its position.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<DeclarationValue>) {
        let property = property.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, property: impl Into<String>, value: impl Into<DeclarationValue>) -> Self {
        self.insert(property, value);
        self
    }

    /// Value set for `property`, if any
    pub fn get(&self, property: &str) -> Option<&DeclarationValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value)
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no declarations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declarations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeclarationValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Serialize to declaration text, see [`serialize`]
    pub fn to_css(&self) -> String {
        serialize(self)
    }
}

impl<K, V> FromIterator<(K, V)> for DeclarationMap
where
    K: Into<String>,
    V: Into<DeclarationValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'de> Deserialize<'de> for DeclarationMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = DeclarationMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property names to strings or numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut map = DeclarationMap::new();
                while let Some((key, value)) = access.next_entry::<String, DeclarationValue>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

/// Body of a rule passed to `add`
#[derive(Debug, Clone, PartialEq)]
pub enum StyleBody {
    /// Pre-formatted declaration text, used verbatim
    Text(String),
    /// Declarations serialized on insertion
    Map(DeclarationMap),
}

impl StyleBody {
    /// Declaration text placed between the rule's braces
    pub fn to_css(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Map(map) => serialize(map),
        }
    }
}

impl From<&str> for StyleBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for StyleBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<DeclarationMap> for StyleBody {
    fn from(map: DeclarationMap) -> Self {
        Self::Map(map)
    }
}

impl TryFrom<Value> for StyleBody {
    type Error = StyleError;

    /// Accept a dynamically typed style: a string or a flat object
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Object(object) => {
                let mut map = DeclarationMap::new();
                for (key, value) in object {
                    let value = match value {
                        Value::String(text) => DeclarationValue::Text(text),
                        Value::Number(n) => match n.as_f64() {
                            Some(n) => DeclarationValue::Number(n),
                            None => DeclarationValue::Text(n.to_string()),
                        },
                        other => {
                            return Err(StyleError::TypeMismatch {
                                expected: "a string or number value",
                                found: format!("{} for `{}`", json_kind(&other), key),
                            });
                        }
                    };
                    map.insert(key, value);
                }
                Ok(Self::Map(map))
            }
            other => Err(StyleError::TypeMismatch {
                expected: "declaration text or a declaration map",
                found: json_kind(&other).to_string(),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert a camelCase property name to its hyphenated form.
///
/// A hyphen goes between an ASCII lowercase letter or digit and a following
/// ASCII uppercase letter, then the whole name is lowercased. Runs of capitals
/// are not split: `borderURLColor` becomes `border-urlcolor`.
pub fn to_kebab_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if let Some(p) = prev {
                if p.is_ascii_lowercase() || p.is_ascii_digit() {
                    result.push('-');
                }
            }
        }
        result.push(c);
        prev = Some(c);
    }

    result.to_lowercase()
}

/// Serialize a declaration map to `name:value;` segments, no whitespace
pub fn serialize(map: &DeclarationMap) -> String {
    let mut css = String::new();
    for (property, value) in map.iter() {
        css.push_str(&to_kebab_case(property));
        css.push(':');
        css.push_str(&value.to_string());
        css.push(';');
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("backgroundColor"), "background-color");
        assert_eq!(to_kebab_case("border"), "border");
        assert_eq!(to_kebab_case("zIndex2"), "z-index2");
        assert_eq!(to_kebab_case("marginTop2X"), "margin-top2-x");
    }

    #[test]
    fn test_kebab_case_capital_runs() {
        assert_eq!(to_kebab_case("borderURLColor"), "border-urlcolor");
        assert_eq!(to_kebab_case("WebkitTransition"), "webkit-transition");
        assert_eq!(to_kebab_case("URL"), "url");
        assert_eq!(to_kebab_case(""), "");
    }

    #[test]
    fn test_kebab_case_keeps_existing_hyphens() {
        assert_eq!(to_kebab_case("--mainColor"), "--main-color");
        assert_eq!(to_kebab_case("font-size"), "font-size");
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize(&DeclarationMap::new()), "");
    }

    #[test]
    fn test_serialize_order() {
        let map = DeclarationMap::new()
            .with("backgroundColor", "yellow")
            .with("zIndex", 10)
            .with("opacity", 0.5);

        assert_eq!(serialize(&map), "background-color:yellow;z-index:10;opacity:0.5;");
    }

    #[test]
    fn test_insert_existing_key_keeps_position() {
        let mut map = DeclarationMap::new().with("color", "red").with("margin", 0);
        map.insert("color", "blue");

        assert_eq!(map.len(), 2);
        assert_eq!(serialize(&map), "color:blue;margin:0;");
    }

    #[test]
    fn test_values_not_escaped() {
        let map = DeclarationMap::new().with("content", "\"}; x");
        assert_eq!(serialize(&map), "content:\"}; x;");
    }

    #[test]
    fn test_number_format() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.25), "1.25");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_style_body_from_json() {
        let value = serde_json::json!({ "backgroundColor": "green", "zIndex": 3 });
        let body = StyleBody::try_from(value).unwrap();
        assert_eq!(body.to_css(), "background-color:green;z-index:3;");

        let body = StyleBody::try_from(serde_json::json!("color: red;")).unwrap();
        assert_eq!(body, StyleBody::Text("color: red;".into()));
    }

    #[test]
    fn test_style_body_type_mismatch() {
        let err = StyleBody::try_from(serde_json::json!([1, 2])).unwrap_err();
        assert!(matches!(err, StyleError::TypeMismatch { .. }));

        let err = StyleBody::try_from(serde_json::json!({ "color": true })).unwrap_err();
        match err {
            StyleError::TypeMismatch { found, .. } => assert!(found.contains("color")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let map: DeclarationMap =
            serde_json::from_str(r#"{ "zIndex": 1, "color": "red", "alignItems": "center" }"#).unwrap();
        assert_eq!(serialize(&map), "z-index:1;color:red;align-items:center;");
    }
}
