use crate::error::Result;
use crate::extraction::reader::{read, to_float, to_string};
use crate::extraction::sidecar::SidecarRecord;
use crate::extraction::source::MetadataSource;
use crate::extraction::tags::{
    KW_ACCESSION_NUMBER, KW_DEVICE_SERIAL_NUMBER, KW_MAGNETIC_FIELD_STRENGTH, KW_MANUFACTURER,
    KW_MANUFACTURER_MODEL_NAME, KW_REFERRING_PHYSICIAN_NAME, KW_STUDY_DATE, KW_STUDY_DESCRIPTION,
    KW_STUDY_ID, KW_STUDY_INSTANCE_UID, KW_STUDY_TIME,
};
use crate::types::datetime::{read_date, read_time, require};
use chrono::{NaiveDate, NaiveTime};
use dicom_object::InMemDicomObject;
use ordered_float::OrderedFloat;
use std::fmt;

/// One imaging session of one patient, including the scanner that ran it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Study {
    pub uid: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub id: Option<String>,
    pub description: Option<String>,
    pub referring_physician: Option<String>,
    pub accession_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    /// Magnetic field strength in Tesla
    pub field_strength: Option<OrderedFloat<f64>>,
    pub device_serial_number: Option<String>,
}

impl Study {
    /// Builds the study from a DICOM dataset
    ///
    /// # Errors
    ///
    /// Returns a parse failure if StudyInstanceUID, StudyDate or StudyTime
    /// is absent or malformed.
    pub fn from_dicom(dcm: &InMemDicomObject) -> Result<Self> {
        Self::from_source(dcm)
    }

    /// Builds the study from a sidecar record
    ///
    /// Sidecar writers may append extra tokens after the UID; only the first
    /// whitespace-separated token is kept (for either source).
    pub fn from_sidecar(sidecar: &SidecarRecord) -> Result<Self> {
        Self::from_source(sidecar)
    }

    pub(crate) fn from_source<S: MetadataSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            uid: first_token(&require(source, KW_STUDY_INSTANCE_UID.into())?),
            date: read_date(source, KW_STUDY_DATE.into())?,
            time: read_time(source, KW_STUDY_TIME.into())?,
            id: read(source, KW_STUDY_ID, to_string),
            description: read(source, KW_STUDY_DESCRIPTION, to_string),
            referring_physician: read(source, KW_REFERRING_PHYSICIAN_NAME, to_string),
            accession_number: read(source, KW_ACCESSION_NUMBER, to_string),
            manufacturer: read(source, KW_MANUFACTURER, to_string),
            model: read(source, KW_MANUFACTURER_MODEL_NAME, to_string),
            field_strength: read(source, KW_MAGNETIC_FIELD_STRENGTH, to_float).map(OrderedFloat),
            device_serial_number: read(source, KW_DEVICE_SERIAL_NUMBER, to_string),
        })
    }
}

pub(crate) fn first_token(s: &str) -> String {
    s.split_whitespace().next().unwrap_or_default().to_string()
}

impl fmt::Display for Study {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Study {} on {} {}", self.uid, self.date, self.time)?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DicomcheckError;
    use crate::extraction::tags::{
        MAGNETIC_FIELD_STRENGTH, MANUFACTURER, STUDY_DATE, STUDY_INSTANCE_UID, STUDY_TIME,
    };
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{DataElement, VR};

    fn study_dicom() -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(STUDY_INSTANCE_UID, VR::UI, PrimitiveValue::from("1.2.826.0.1.1")),
            DataElement::new(STUDY_DATE, VR::DA, PrimitiveValue::from("20190321")),
            DataElement::new(STUDY_TIME, VR::TM, PrimitiveValue::from("093000.000000")),
            DataElement::new(MANUFACTURER, VR::LO, PrimitiveValue::from("SIEMENS")),
            DataElement::new(MAGNETIC_FIELD_STRENGTH, VR::DS, PrimitiveValue::from("3")),
        ])
    }

    #[test]
    fn test_from_dicom() {
        let study = Study::from_dicom(&study_dicom()).unwrap();
        assert_eq!(study.uid, "1.2.826.0.1.1");
        assert_eq!(study.date, NaiveDate::from_ymd_opt(2019, 3, 21).unwrap());
        assert_eq!(study.time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(study.manufacturer.as_deref(), Some("SIEMENS"));
        assert_eq!(study.field_strength, Some(OrderedFloat(3.0)));
        assert_eq!(study.model, None);
    }

    #[test]
    fn test_missing_uid_fails() {
        let mut dcm = study_dicom();
        dcm.remove_element(STUDY_INSTANCE_UID);
        assert!(matches!(
            Study::from_dicom(&dcm),
            Err(DicomcheckError::ParseFailure { .. })
        ));
    }

    #[test]
    fn test_sidecar_keeps_first_uid_token() {
        let sidecar = SidecarRecord::new()
            .with_values(STUDY_INSTANCE_UID, ["1.2.826.0.1.1 extra"])
            .with_values(STUDY_DATE, ["20190321"])
            .with_values(STUDY_TIME, ["093000"]);
        let study = Study::from_sidecar(&sidecar).unwrap();
        assert_eq!(study.uid, "1.2.826.0.1.1");
        assert_eq!(study.field_strength, None);
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("  1.2.3  4.5"), "1.2.3");
        assert_eq!(first_token(""), "");
    }
}
