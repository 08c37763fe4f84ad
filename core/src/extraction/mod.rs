pub mod geometry;
pub mod reader;
pub mod sidecar;
pub mod source;
pub mod tags;

pub use geometry::{classify_direction_cosines, extract_slice_plane, slice_normal};
pub use reader::{deep_search, read, AttributeReader, Converter, DEEP_SEARCH_DELIMITER};
pub use sidecar::SidecarRecord;
pub use source::{AttributeKey, AttributeValue, MetadataSource};
