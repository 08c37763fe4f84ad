use crate::error::{DicomcheckError, Result};
use crate::extraction::source::{AttributeKey, AttributeValue, MetadataSource};
use dicom_core::Tag;

/// Delimiter joining the distinct values found by a deep search
pub const DEEP_SEARCH_DELIMITER: &str = ", ";

/// Coercion from a raw attribute value to a typed field
pub type Converter<T> = fn(&AttributeValue) -> Result<T>;

/// Converts to a string, joining multiple values with a backslash
pub fn to_string(value: &AttributeValue) -> Result<String> {
    match value {
        AttributeValue::Primitive(values) => Ok(values.join("\\")),
        AttributeValue::Sequence(_) => Err(DicomcheckError::parse_failure(
            "string",
            "value is a sequence",
        )),
    }
}

/// Converts a single-valued attribute to an integer
pub fn to_int(value: &AttributeValue) -> Result<i32> {
    let text = single_component(value)?;
    text.trim_start_matches('+')
        .parse::<i32>()
        .map_err(|e| DicomcheckError::parse_failure("integer", format!("'{}': {}", text, e)))
}

/// Converts a single-valued attribute to a float
pub fn to_float(value: &AttributeValue) -> Result<f64> {
    let text = single_component(value)?;
    parse_float(text)
}

/// Converts a multi-valued attribute to a list of floats
pub fn to_floats(value: &AttributeValue) -> Result<Vec<f64>> {
    value
        .components()
        .ok_or_else(|| DicomcheckError::parse_failure("float list", "value is a sequence"))?
        .iter()
        .map(|c| parse_float(c))
        .collect()
}

fn single_component(value: &AttributeValue) -> Result<&str> {
    match value.components() {
        Some([single]) => Ok(single.as_str()),
        Some(values) => Err(DicomcheckError::parse_failure(
            "single value",
            format!("found {} values", values.len()),
        )),
        None => Err(DicomcheckError::parse_failure(
            "single value",
            "value is a sequence",
        )),
    }
}

fn parse_float(text: &str) -> Result<f64> {
    let parsed = text
        .trim()
        .parse::<f64>()
        .map_err(|e| DicomcheckError::parse_failure("float", format!("'{}': {}", text, e)))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(DicomcheckError::parse_failure(
            "float",
            format!("'{}' is not finite", text),
        ))
    }
}

/// Extracts typed attribute values from a metadata record
///
/// Reads never fail: an absent key or a value the converter rejects is
/// reported as `None`. With deep search enabled, [`read_or_search`] falls
/// back to scanning nested sequences when the top level has nothing.
///
/// [`read_or_search`]: AttributeReader::read_or_search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeReader {
    deep_search: bool,
}

impl AttributeReader {
    /// Creates a reader that only performs direct lookups
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the nested-sequence fallback
    pub fn with_deep_search(mut self, deep_search: bool) -> Self {
        self.deep_search = deep_search;
        self
    }

    pub fn deep_search_enabled(&self) -> bool {
        self.deep_search
    }

    /// Direct lookup, then deep search if enabled and nothing was found
    pub fn read_or_search<S, T>(&self, source: &S, tag: Tag, converter: Converter<T>) -> Option<T>
    where
        S: MetadataSource,
    {
        if source.lookup_by_tag(tag).is_some() {
            return read(source, tag, converter);
        }
        if !self.deep_search {
            return None;
        }
        deep_search(source, tag).and_then(|joined| converter(&AttributeValue::single(joined)).ok())
    }
}

/// Looks up `key` in `source` and converts it; absent or unconvertible is `None`
pub fn read<'k, S, T>(
    source: &S,
    key: impl Into<AttributeKey<'k>>,
    converter: Converter<T>,
) -> Option<T>
where
    S: MetadataSource + ?Sized,
{
    source
        .lookup(key.into())
        .and_then(|value| converter(&value).ok())
}

/// Collects every occurrence of `tag` in `source` and its nested sequences
///
/// Distinct values are kept in first-occurrence order and joined with
/// [`DEEP_SEARCH_DELIMITER`]. Returns `None` if the tag occurs nowhere.
pub fn deep_search<S: MetadataSource>(source: &S, tag: Tag) -> Option<String> {
    let mut found = Vec::new();
    collect_occurrences(source, tag, &mut found);

    let mut unique: Vec<String> = Vec::with_capacity(found.len());
    for value in found {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }

    if unique.is_empty() {
        None
    } else {
        Some(unique.join(DEEP_SEARCH_DELIMITER))
    }
}

fn collect_occurrences<S: MetadataSource>(source: &S, tag: Tag, found: &mut Vec<String>) {
    if let Some(value @ AttributeValue::Primitive(_)) = source.lookup_by_tag(tag) {
        found.push(value.to_string());
    }
    for child in source.children() {
        collect_occurrences(child, tag, found);
    }
}
