use dicom_core::Tag;

// Patient Tags
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);

// Study Tags
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);
pub const STUDY_ID: Tag = Tag(0x0020, 0x0010);
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);
pub const REFERRING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x0090);

// Device/Manufacturer Tags
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);
pub const MAGNETIC_FIELD_STRENGTH: Tag = Tag(0x0018, 0x0087);
pub const DEVICE_SERIAL_NUMBER: Tag = Tag(0x0018, 0x1000);

// Series Tags
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);
pub const SERIES_DATE: Tag = Tag(0x0008, 0x0021);
pub const SERIES_TIME: Tag = Tag(0x0008, 0x0031);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);

// MR Acquisition Tags
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
pub const REPETITION_TIME: Tag = Tag(0x0018, 0x0080);
pub const ECHO_TIME: Tag = Tag(0x0018, 0x0081);
pub const INVERSION_TIME: Tag = Tag(0x0018, 0x0082);
pub const NUMBER_OF_AVERAGES: Tag = Tag(0x0018, 0x0083);
pub const SPACING_BETWEEN_SLICES: Tag = Tag(0x0018, 0x0088);
pub const ECHO_TRAIN_LENGTH: Tag = Tag(0x0018, 0x0091);
pub const PERCENT_PHASE_FIELD_OF_VIEW: Tag = Tag(0x0018, 0x0094);
pub const TRIGGER_TIME: Tag = Tag(0x0018, 0x1060);
pub const RECEIVE_COIL_NAME: Tag = Tag(0x0018, 0x1250);
pub const TRANSMIT_COIL_NAME: Tag = Tag(0x0018, 0x1251);
pub const FLIP_ANGLE: Tag = Tag(0x0018, 0x1314);
pub const NUMBER_OF_FREQUENCY_ENCODING_STEPS: Tag = Tag(0x0018, 0x9058);
pub const NUMBER_OF_PHASE_ENCODING_STEPS: Tag = Tag(0x0018, 0x9231);

// Image Geometry Tags
pub const IMAGE_ORIENTATION_PATIENT: Tag = Tag(0x0020, 0x0037);
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

// Siemens private diffusion Tags (CSA group 0019)
pub const SIEMENS_NUMBER_OF_B0: Tag = Tag(0x0019, 0x100A);
pub const SIEMENS_B_VALUE: Tag = Tag(0x0019, 0x100C);
pub const SIEMENS_REAL_DWELL_TIME: Tag = Tag(0x0019, 0x1018);

// Attribute keywords used for name-based lookups
pub const KW_STUDY_INSTANCE_UID: &str = "StudyInstanceUID";
pub const KW_STUDY_DATE: &str = "StudyDate";
pub const KW_STUDY_TIME: &str = "StudyTime";
pub const KW_STUDY_ID: &str = "StudyID";
pub const KW_STUDY_DESCRIPTION: &str = "StudyDescription";
pub const KW_REFERRING_PHYSICIAN_NAME: &str = "ReferringPhysicianName";
pub const KW_ACCESSION_NUMBER: &str = "AccessionNumber";
pub const KW_MANUFACTURER: &str = "Manufacturer";
pub const KW_MANUFACTURER_MODEL_NAME: &str = "ManufacturerModelName";
pub const KW_MAGNETIC_FIELD_STRENGTH: &str = "MagneticFieldStrength";
pub const KW_DEVICE_SERIAL_NUMBER: &str = "DeviceSerialNumber";
pub const KW_SERIES_INSTANCE_UID: &str = "SeriesInstanceUID";
pub const KW_SERIES_NUMBER: &str = "SeriesNumber";
pub const KW_SERIES_DATE: &str = "SeriesDate";
pub const KW_SERIES_TIME: &str = "SeriesTime";
pub const KW_SERIES_DESCRIPTION: &str = "SeriesDescription";
pub const KW_MODALITY: &str = "Modality";

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::dictionary::DataDictionary;
    use dicom_dictionary_std::StandardDataDictionary;

    #[test]
    fn test_tag_values() {
        // Just ensure tags are correctly defined
        assert_eq!(REPETITION_TIME, Tag(0x0018, 0x0080));
        assert_eq!(ECHO_TIME, Tag(0x0018, 0x0081));
        assert_eq!(SERIES_DESCRIPTION, Tag(0x0008, 0x103E));
        assert_eq!(IMAGE_ORIENTATION_PATIENT, Tag(0x0020, 0x0037));
    }

    #[test]
    fn test_keywords_resolve_to_tags() {
        let dict = StandardDataDictionary;
        assert_eq!(dict.parse_tag(KW_STUDY_INSTANCE_UID), Some(STUDY_INSTANCE_UID));
        assert_eq!(dict.parse_tag(KW_SERIES_DESCRIPTION), Some(SERIES_DESCRIPTION));
        assert_eq!(dict.parse_tag(KW_MODALITY), Some(MODALITY));
        assert_eq!(dict.parse_tag(KW_MAGNETIC_FIELD_STRENGTH), Some(MAGNETIC_FIELD_STRENGTH));
    }
}
