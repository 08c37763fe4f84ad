use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dicomcheck operations
pub type Result<T> = std::result::Result<T, DicomcheckError>;

/// Level of the patient/study/series hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum HierarchyLevel {
    Patient,
    Study,
    Series,
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HierarchyLevel::Patient => "patient",
            HierarchyLevel::Study => "study",
            HierarchyLevel::Series => "series",
        };
        write!(f, "{}", name)
    }
}

/// Error types for dicomcheck operations
#[derive(Error, Debug)]
pub enum DicomcheckError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// A required attribute is missing or malformed
    #[error("Failed to parse {attribute}: {reason}")]
    ParseFailure { attribute: String, reason: String },

    /// A record does not belong to any entry of a collection
    #[error("No matching {0} in collection")]
    NotFound(HierarchyLevel),

    /// Session directory does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Sidecar document could not be interpreted
    #[error("Sidecar error: {0}")]
    SidecarError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DicomcheckError {
    /// Builds a parse failure for the named attribute
    pub fn parse_failure(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        DicomcheckError::ParseFailure {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Returns whether this is a lookup miss rather than a hard failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, DicomcheckError::NotFound(_))
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for DicomcheckError {
    fn from(e: dicom_object::ReadError) -> Self {
        DicomcheckError::DicomError(format!("{}", e))
    }
}

impl From<serde_json::Error> for DicomcheckError {
    fn from(e: serde_json::Error) -> Self {
        DicomcheckError::SidecarError(format!("{}", e))
    }
}
