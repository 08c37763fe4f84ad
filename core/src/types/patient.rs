use crate::error::Result;
use crate::extraction::reader::{read, to_string};
use crate::extraction::sidecar::SidecarRecord;
use crate::extraction::source::MetadataSource;
use crate::extraction::tags::{PATIENT_BIRTH_DATE, PATIENT_ID, PATIENT_NAME, PATIENT_SEX};
use crate::types::datetime::read_date;
use chrono::NaiveDate;
use dicom_object::InMemDicomObject;
use std::fmt;

/// Patient identity and demographics
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Patient {
    pub name: Option<String>,
    pub id: Option<String>,
    pub birth_date: NaiveDate,
    /// Raw DICOM sex code (M, F, O)
    pub sex: Option<String>,
}

impl Patient {
    /// Builds the patient from a DICOM dataset
    ///
    /// # Errors
    ///
    /// Returns a parse failure if PatientBirthDate is absent or malformed.
    pub fn from_dicom(dcm: &InMemDicomObject) -> Result<Self> {
        Self::from_source(dcm)
    }

    /// Builds the patient from a sidecar record
    pub fn from_sidecar(sidecar: &SidecarRecord) -> Result<Self> {
        Self::from_source(sidecar)
    }

    pub(crate) fn from_source<S: MetadataSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            name: read(source, PATIENT_NAME, to_string),
            id: read(source, PATIENT_ID, to_string),
            birth_date: read_date(source, PATIENT_BIRTH_DATE.into())?,
            sex: read(source, PATIENT_SEX, to_string),
        })
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient {} ({}), born {}",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.id.as_deref().unwrap_or("no id"),
            self.birth_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DicomcheckError;
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{DataElement, VR};

    fn patient_dicom() -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(PATIENT_NAME, VR::PN, PrimitiveValue::from("Doe^Jane")),
            DataElement::new(PATIENT_ID, VR::LO, PrimitiveValue::from("MS-0042")),
            DataElement::new(PATIENT_BIRTH_DATE, VR::DA, PrimitiveValue::from("19800101")),
            DataElement::new(PATIENT_SEX, VR::CS, PrimitiveValue::from("F")),
        ])
    }

    #[test]
    fn test_from_dicom() {
        let patient = Patient::from_dicom(&patient_dicom()).unwrap();
        assert_eq!(patient.name.as_deref(), Some("Doe^Jane"));
        assert_eq!(patient.id.as_deref(), Some("MS-0042"));
        assert_eq!(patient.birth_date, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap());
        assert_eq!(patient.sex.as_deref(), Some("F"));
    }

    #[test]
    fn test_missing_birth_date_fails() {
        let dcm = InMemDicomObject::from_element_iter([DataElement::new(
            PATIENT_ID,
            VR::LO,
            PrimitiveValue::from("MS-0042"),
        )]);
        let err = Patient::from_dicom(&dcm).unwrap_err();
        assert!(matches!(err, DicomcheckError::ParseFailure { .. }));
    }

    #[test]
    fn test_dicom_and_sidecar_agree() {
        let sidecar = SidecarRecord::new()
            .with_values(PATIENT_NAME, ["Doe^Jane"])
            .with_values(PATIENT_ID, ["MS-0042"])
            .with_values(PATIENT_BIRTH_DATE, ["19800101"])
            .with_values(PATIENT_SEX, ["F"]);
        assert_eq!(
            Patient::from_sidecar(&sidecar).unwrap(),
            Patient::from_dicom(&patient_dicom()).unwrap()
        );
    }

    #[test]
    fn test_optional_fields_absent() {
        let sidecar = SidecarRecord::new().with_values(PATIENT_BIRTH_DATE, ["19800101"]);
        let patient = Patient::from_sidecar(&sidecar).unwrap();
        assert_eq!(patient.name, None);
        assert_eq!(patient.sex, None);
    }
}
