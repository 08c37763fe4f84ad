use crate::extraction::reader::{read, to_floats};
use crate::extraction::source::MetadataSource;
use crate::extraction::tags::IMAGE_ORIENTATION_PATIENT;
use crate::types::SlicePlane;

/// Extracts the slice plane from ImageOrientationPatient
///
/// # Algorithm
///
/// 1. Read the six direction cosines (row x,y,z then column x,y,z)
/// 2. Cross row with column to get the slice normal
/// 3. The largest absolute component of the normal picks the plane:
///    x → sagittal, y → coronal, z → axial
///
/// Absent or malformed orientation yields [`SlicePlane::Unknown`].
pub fn extract_slice_plane<S: MetadataSource + ?Sized>(source: &S) -> SlicePlane {
    read(source, IMAGE_ORIENTATION_PATIENT, to_floats)
        .map(|cosines| classify_direction_cosines(&cosines))
        .unwrap_or(SlicePlane::Unknown)
}

/// Classifies a 6-element direction-cosine vector
pub fn classify_direction_cosines(cosines: &[f64]) -> SlicePlane {
    if cosines.len() != 6 || cosines.iter().any(|c| !c.is_finite()) {
        return SlicePlane::Unknown;
    }

    let row = [cosines[0], cosines[1], cosines[2]];
    let col = [cosines[3], cosines[4], cosines[5]];
    let normal = slice_normal(row, col);

    match dominant_axis(normal) {
        Some(axis) => SlicePlane::from_axis(axis),
        None => SlicePlane::Unknown,
    }
}

/// Cross product of the row and column direction vectors
pub fn slice_normal(row: [f64; 3], col: [f64; 3]) -> [f64; 3] {
    [
        row[1] * col[2] - row[2] * col[1],
        row[2] * col[0] - row[0] * col[2],
        row[0] * col[1] - row[1] * col[0],
    ]
}

/// Index of the largest absolute component; the first index wins ties
///
/// Returns `None` for the zero vector (parallel row and column axes).
fn dominant_axis(v: [f64; 3]) -> Option<usize> {
    let mut best = 0;
    for axis in 1..3 {
        if v[axis].abs() > v[best].abs() {
            best = axis;
        }
    }
    if v[best] == 0.0 {
        None
    } else {
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::sidecar::SidecarRecord;
    use rstest::rstest;

    #[rstest]
    #[case(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0], SlicePlane::Axial)]
    #[case(&[0.0, 1.0, 0.0, 0.0, 0.0, 1.0], SlicePlane::Sagittal)]
    #[case(&[1.0, 0.0, 0.0, 0.0, 0.0, -1.0], SlicePlane::Coronal)]
    // Slightly oblique axial acquisition
    #[case(&[0.999, 0.0, 0.044, -0.005, 0.995, 0.1], SlicePlane::Axial)]
    #[case(&[1.0, 0.0, 0.0, 1.0, 0.0, 0.0], SlicePlane::Unknown)]
    #[case(&[1.0, 0.0, 0.0, 0.0, 1.0], SlicePlane::Unknown)]
    #[case(&[], SlicePlane::Unknown)]
    #[case(&[1.0, 0.0, 0.0, 0.0, f64::NAN, 0.0], SlicePlane::Unknown)]
    fn test_classify_direction_cosines(#[case] cosines: &[f64], #[case] expected: SlicePlane) {
        assert_eq!(classify_direction_cosines(cosines), expected);
    }

    #[test]
    fn test_slice_normal_right_hand_rule() {
        assert_eq!(
            slice_normal([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            [0.0, 0.0, 1.0]
        );
        assert_eq!(
            slice_normal([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            [1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_extract_slice_plane_from_source() {
        let record = SidecarRecord::new()
            .with_values(IMAGE_ORIENTATION_PATIENT, ["0", "1", "0", "0", "0", "-1"]);
        assert_eq!(extract_slice_plane(&record), SlicePlane::Sagittal);
    }

    #[test]
    fn test_extract_slice_plane_missing_or_malformed() {
        assert_eq!(extract_slice_plane(&SidecarRecord::new()), SlicePlane::Unknown);

        let malformed = SidecarRecord::new()
            .with_values(IMAGE_ORIENTATION_PATIENT, ["1", "0", "x", "0", "1", "0"]);
        assert_eq!(extract_slice_plane(&malformed), SlicePlane::Unknown);
    }
}
