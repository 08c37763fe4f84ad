use std::fmt;

/// Anatomical plane of an image slice
///
/// Derived from the slice normal: the dominant axis of the normal in
/// patient coordinates selects the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum SlicePlane {
    #[default]
    Unknown,
    Sagittal,
    Coronal,
    Axial,
}

impl SlicePlane {
    /// Returns whether this plane is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, SlicePlane::Unknown)
    }

    /// Maps the dominant patient axis (0 = x, 1 = y, 2 = z) to a plane
    pub fn from_axis(axis: usize) -> Self {
        match axis {
            0 => SlicePlane::Sagittal,
            1 => SlicePlane::Coronal,
            2 => SlicePlane::Axial,
            _ => SlicePlane::Unknown,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            SlicePlane::Unknown => "unknown",
            SlicePlane::Sagittal => "sagittal",
            SlicePlane::Coronal => "coronal",
            SlicePlane::Axial => "axial",
        }
    }
}

impl fmt::Display for SlicePlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_axis() {
        assert_eq!(SlicePlane::from_axis(0), SlicePlane::Sagittal);
        assert_eq!(SlicePlane::from_axis(1), SlicePlane::Coronal);
        assert_eq!(SlicePlane::from_axis(2), SlicePlane::Axial);
        assert_eq!(SlicePlane::from_axis(3), SlicePlane::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(SlicePlane::Axial.to_string(), "axial");
        assert!(SlicePlane::default().is_unknown());
    }
}
