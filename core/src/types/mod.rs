//! Entity model for protocol comparison
//!
//! This module provides the value records built from per-image metadata:
//! - [`Patient`]: identity and demographics
//! - [`Study`]: one imaging session, including scanner identity
//! - [`Series`]: one acquisition protocol and its scan parameters
//! - [`SlicePlane`]: anatomical plane derived from image orientation
//!
//! All entities are immutable, compare structurally and are usable as map keys.

pub(crate) mod datetime;
mod enums;
mod patient;
mod series;
mod study;

pub use datetime::{parse_date, parse_time};
pub use enums::SlicePlane;
pub use patient::Patient;
pub use series::Series;
pub use study::Study;
