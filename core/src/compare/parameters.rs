use crate::collection::SourceFile;
use crate::extraction::reader::{to_string, AttributeReader, DEEP_SEARCH_DELIMITER};
use crate::extraction::source::MetadataSource;
use crate::extraction::tags::{
    COLUMNS, FLIP_ANGLE, NUMBER_OF_AVERAGES, NUMBER_OF_FREQUENCY_ENCODING_STEPS,
    NUMBER_OF_PHASE_ENCODING_STEPS, PIXEL_SPACING, RECEIVE_COIL_NAME, ROWS, SIEMENS_B_VALUE,
    SIEMENS_NUMBER_OF_B0, SIEMENS_REAL_DWELL_TIME, TRANSMIT_COIL_NAME, TRIGGER_TIME,
};
use dicom_core::Tag;

/// Acquisition parameters reported in addition to the series fields
///
/// These vary per file within a series (e.g. diffusion b-values), so each is
/// gathered across all files of the series.
pub const SCAN_PARAMETERS: &[(Tag, &str)] = &[
    (ROWS, "Rows"),
    (COLUMNS, "Columns"),
    (PIXEL_SPACING, "Reconstruction pixel size"),
    (NUMBER_OF_FREQUENCY_ENCODING_STEPS, "Frequency encoding"),
    (NUMBER_OF_PHASE_ENCODING_STEPS, "Phase encoding"),
    (NUMBER_OF_AVERAGES, "Number of averages"),
    (FLIP_ANGLE, "Flip angle (degrees)"),
    (RECEIVE_COIL_NAME, "Receive coil name"),
    (TRANSMIT_COIL_NAME, "Transmit coil name"),
    (TRIGGER_TIME, "Trigger time"),
    (SIEMENS_NUMBER_OF_B0, "Number of B0"),
    (SIEMENS_B_VALUE, "B value"),
    (SIEMENS_REAL_DWELL_TIME, "Real dwell time"),
];

/// Distinct values of `tag` across the files of a series
///
/// Values keep first-occurrence order and are joined with `", "`.
/// Returns `None` if no file carries the attribute.
pub fn collect_parameter<R: MetadataSource>(
    files: &[SourceFile<R>],
    tag: Tag,
    reader: &AttributeReader,
) -> Option<String> {
    let mut values: Vec<String> = Vec::new();
    for file in files {
        if let Some(value) = reader.read_or_search(&file.record, tag, to_string) {
            if !value.is_empty() && !values.contains(&value) {
                values.push(value);
            }
        }
    }

    if values.is_empty() {
        None
    } else {
        Some(values.join(DEEP_SEARCH_DELIMITER))
    }
}
