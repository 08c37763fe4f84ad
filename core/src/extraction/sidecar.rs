//! Sidecar metadata records
//!
//! A sidecar is a DICOM JSON model document (PS3.18 Annex F) describing a
//! reduced attribute set for data that has no native DICOM file next to it,
//! e.g. a converted volume. Keys are 8-digit hexadecimal tags and each
//! attribute carries a `vr` and an optional `Value` array:
//!
//! ```json
//! {
//!   "0008103E": { "vr": "LO", "Value": ["T1_MPRAGE"] },
//!   "00180080": { "vr": "DS", "Value": [2300] },
//!   "00100010": { "vr": "PN", "Value": [{ "Alphabetic": "Doe^Jane" }] }
//! }
//! ```

use crate::error::{DicomcheckError, Result};
use crate::extraction::source::{clean_component, AttributeValue, MetadataSource};
use dicom_core::dictionary::DataDictionary;
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// One attribute of a sidecar record
#[derive(Debug, Clone, PartialEq)]
pub enum SidecarElement {
    Values(Vec<String>),
    Items(Vec<SidecarRecord>),
}

/// Metadata record parsed from a DICOM JSON sidecar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidecarRecord {
    elements: BTreeMap<Tag, SidecarElement>,
}

impl SidecarRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primitive attribute
    pub fn with_values<I, S>(mut self, tag: Tag, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements.insert(
            tag,
            SidecarElement::Values(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Adds a sequence attribute
    pub fn with_items(mut self, tag: Tag, items: Vec<SidecarRecord>) -> Self {
        self.elements.insert(tag, SidecarElement::Items(items));
        self
    }

    /// Number of attributes at the top level
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Reads a sidecar from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a sidecar from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Interprets an already-parsed JSON document
    ///
    /// # Errors
    ///
    /// Returns [`DicomcheckError::SidecarError`] if the document is not an
    /// object, a key is not an 8-digit hexadecimal tag, or a sequence item is
    /// not an object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| DicomcheckError::SidecarError("expected a JSON object".into()))?;

        let mut elements = BTreeMap::new();
        for (key, attribute) in object {
            let tag = parse_tag_key(key)?;
            if let Some(element) = parse_attribute(tag, attribute)? {
                elements.insert(tag, element);
            }
        }

        Ok(Self { elements })
    }
}

impl MetadataSource for SidecarRecord {
    fn lookup_by_name(&self, name: &str) -> Option<AttributeValue> {
        StandardDataDictionary
            .parse_tag(name)
            .and_then(|tag| self.lookup_by_tag(tag))
    }

    fn lookup_by_tag(&self, tag: Tag) -> Option<AttributeValue> {
        match self.elements.get(&tag)? {
            SidecarElement::Values(values) => {
                if values.iter().all(|v| v.is_empty()) {
                    None
                } else {
                    Some(AttributeValue::Primitive(values.clone()))
                }
            }
            SidecarElement::Items(items) => Some(AttributeValue::Sequence(items.len())),
        }
    }

    fn children(&self) -> Vec<&Self> {
        self.elements
            .values()
            .filter_map(|element| match element {
                SidecarElement::Items(items) => Some(items),
                SidecarElement::Values(_) => None,
            })
            .flatten()
            .collect()
    }
}

/// Parses an 8-digit hexadecimal tag key such as `"0020000D"`
fn parse_tag_key(key: &str) -> Result<Tag> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(r"^[0-9A-Fa-f]{8}$").expect("Failed to compile regex"));

    if !re.is_match(key) {
        return Err(DicomcheckError::SidecarError(format!(
            "invalid tag key '{}'",
            key
        )));
    }

    let group = u16::from_str_radix(&key[..4], 16)
        .map_err(|e| DicomcheckError::SidecarError(format!("invalid group in '{}': {}", key, e)))?;
    let element = u16::from_str_radix(&key[4..], 16)
        .map_err(|e| DicomcheckError::SidecarError(format!("invalid element in '{}': {}", key, e)))?;

    Ok(Tag(group, element))
}

/// Interprets one attribute object; attributes without a `Value` are dropped
fn parse_attribute(tag: Tag, attribute: &Value) -> Result<Option<SidecarElement>> {
    let values = match attribute.get("Value").and_then(Value::as_array) {
        Some(values) => values,
        None => return Ok(None),
    };

    let is_sequence = attribute.get("vr").and_then(Value::as_str) == Some("SQ");
    if is_sequence {
        let items = values
            .iter()
            .map(SidecarRecord::from_json)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| DicomcheckError::SidecarError(format!("in sequence {}: {}", tag, e)))?;
        return Ok(Some(SidecarElement::Items(items)));
    }

    Ok(Some(SidecarElement::Values(
        values.iter().map(json_component).collect(),
    )))
}

/// Renders one JSON value component as DICOM text
fn json_component(value: &Value) -> String {
    match value {
        Value::String(s) => clean_component(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Person names carry their alphabetic representation
        Value::Object(map) => map
            .get("Alphabetic")
            .and_then(Value::as_str)
            .map(clean_component)
            .unwrap_or_default(),
        Value::Null | Value::Array(_) => String::new(),
    }
}
