use dicom_core::Tag;
use dicom_object::mem::InMemElement;
use dicom_object::InMemDicomObject;
use std::fmt;

/// Key identifying an attribute in a metadata record
///
/// Either a DICOM keyword (e.g. `"SeriesDescription"`) or a
/// `(group, element)` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKey<'a> {
    Name(&'a str),
    Tag(Tag),
}

impl<'a> From<&'a str> for AttributeKey<'a> {
    fn from(name: &'a str) -> Self {
        AttributeKey::Name(name)
    }
}

impl From<Tag> for AttributeKey<'_> {
    fn from(tag: Tag) -> Self {
        AttributeKey::Tag(tag)
    }
}

impl fmt::Display for AttributeKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKey::Name(name) => write!(f, "{}", name),
            AttributeKey::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// Raw attribute value as seen by the extraction layer
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// One or more textual components (multi-valued attributes keep each value)
    Primitive(Vec<String>),
    /// A sequence holding the given number of nested items
    Sequence(usize),
}

impl AttributeValue {
    /// Builds a single-valued primitive
    pub fn single(value: impl Into<String>) -> Self {
        AttributeValue::Primitive(vec![value.into()])
    }

    /// Returns the textual components, or `None` for sequences
    pub fn components(&self) -> Option<&[String]> {
        match self {
            AttributeValue::Primitive(values) => Some(values),
            AttributeValue::Sequence(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Primitive(values) => write!(f, "{}", values.join("\\")),
            AttributeValue::Sequence(n) => write!(f, "<sequence of {} items>", n),
        }
    }
}

/// Read access to one metadata record
///
/// Implemented for native DICOM datasets and for the sidecar
/// representation so that entity construction and attribute extraction
/// work uniformly over both.
pub trait MetadataSource {
    /// Looks up an attribute by its DICOM keyword
    fn lookup_by_name(&self, name: &str) -> Option<AttributeValue>;

    /// Looks up an attribute by tag
    fn lookup_by_tag(&self, tag: Tag) -> Option<AttributeValue>;

    /// Nested records held by sequence attributes, in element order
    fn children(&self) -> Vec<&Self>;

    /// Looks up an attribute by either kind of key
    fn lookup(&self, key: AttributeKey<'_>) -> Option<AttributeValue> {
        match key {
            AttributeKey::Name(name) => self.lookup_by_name(name),
            AttributeKey::Tag(tag) => self.lookup_by_tag(tag),
        }
    }
}

impl MetadataSource for InMemDicomObject {
    fn lookup_by_name(&self, name: &str) -> Option<AttributeValue> {
        self.element_by_name(name).ok().and_then(element_value)
    }

    fn lookup_by_tag(&self, tag: Tag) -> Option<AttributeValue> {
        self.element(tag).ok().and_then(element_value)
    }

    fn children(&self) -> Vec<&Self> {
        self.iter()
            .filter_map(|elem| elem.items())
            .flat_map(|items| items.iter())
            .collect()
    }
}

/// Converts a data element into an attribute value
///
/// Empty elements are treated as absent.
fn element_value(elem: &InMemElement) -> Option<AttributeValue> {
    if let Some(items) = elem.items() {
        return Some(AttributeValue::Sequence(items.len()));
    }

    let values: Vec<String> = elem
        .to_multi_str()
        .ok()?
        .iter()
        .map(|s| clean_component(s))
        .collect();

    if values.iter().all(|v| v.is_empty()) {
        None
    } else {
        Some(AttributeValue::Primitive(values))
    }
}

/// Strips DICOM padding (trailing NUL and spaces) and surrounding whitespace
pub(crate) fn clean_component(s: &str) -> String {
    s.trim_end_matches('\0').trim().to_string()
}
