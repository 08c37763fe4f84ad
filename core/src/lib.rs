//! Protocol compliance checking for DICOM sessions
//!
//! Groups the files of a session into a patient, study and series hierarchy
//! and compares each series' acquisition parameters against a reference
//! session.

pub mod cli;
pub mod collection;
pub mod compare;
pub mod error;
pub mod extraction;
pub mod types;

pub use cli::report::TextReport;
pub use collection::{load_directory, Collection, SeriesEntry, SourceFile};
pub use compare::{
    compare_series, compare_sessions, CompareConfig, FieldComparison, SeriesComparison,
    SessionComparison,
};
pub use error::{DicomcheckError, HierarchyLevel, Result};
pub use extraction::{AttributeReader, MetadataSource, SidecarRecord};
pub use types::*;
