use crate::error::Result;
use crate::extraction::geometry::extract_slice_plane;
use crate::extraction::reader::{read, to_float, to_int, to_string, AttributeReader};
use crate::extraction::sidecar::SidecarRecord;
use crate::extraction::source::MetadataSource;
use crate::extraction::tags::{
    ECHO_TIME, ECHO_TRAIN_LENGTH, INVERSION_TIME, KW_MODALITY, KW_SERIES_DATE,
    KW_SERIES_DESCRIPTION, KW_SERIES_INSTANCE_UID, KW_SERIES_NUMBER, KW_SERIES_TIME,
    PERCENT_PHASE_FIELD_OF_VIEW, REPETITION_TIME, SLICE_THICKNESS, SPACING_BETWEEN_SLICES,
};
use crate::types::datetime::{read_date, read_time, require};
use crate::types::study::first_token;
use crate::types::SlicePlane;
use chrono::{NaiveDate, NaiveTime};
use dicom_core::Tag;
use dicom_object::InMemDicomObject;
use ordered_float::OrderedFloat;
use std::fmt;

/// One acquisition protocol within a study
///
/// Equality covers every field. Matching across sessions uses the looser
/// [`Series::fuzzy_match`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Series {
    pub uid: String,
    pub number: Option<i32>,
    /// Protocol name, e.g. "T1_MPRAGE"
    pub description: Option<String>,
    pub modality: Option<String>,
    pub slice_plane: SlicePlane,
    /// Repetition time (ms)
    pub tr: Option<OrderedFloat<f64>>,
    /// Echo time (ms)
    pub te: Option<OrderedFloat<f64>>,
    /// Inversion time (ms)
    pub ti: Option<OrderedFloat<f64>>,
    pub slice_thickness: Option<OrderedFloat<f64>>,
    pub slice_gap: Option<OrderedFloat<f64>>,
    pub echo_train_length: Option<OrderedFloat<f64>>,
    pub field_of_view: Option<OrderedFloat<f64>>,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Series {
    /// Builds the series from a DICOM dataset
    ///
    /// # Errors
    ///
    /// Returns a parse failure if SeriesInstanceUID, SeriesDate or
    /// SeriesTime is absent or malformed. Scan parameters that are absent or
    /// not numeric are left as `None`.
    pub fn from_dicom(dcm: &InMemDicomObject) -> Result<Self> {
        Self::from_source(dcm)
    }

    /// Builds the series from a sidecar record
    pub fn from_sidecar(sidecar: &SidecarRecord) -> Result<Self> {
        Self::from_source(sidecar)
    }

    pub(crate) fn from_source<S: MetadataSource + ?Sized>(source: &S) -> Result<Self> {
        let param = |tag: Tag| read(source, tag, to_float).map(OrderedFloat);

        Ok(Self {
            uid: first_token(&require(source, KW_SERIES_INSTANCE_UID.into())?),
            number: read(source, KW_SERIES_NUMBER, to_int),
            description: read(source, KW_SERIES_DESCRIPTION, to_string),
            modality: read(source, KW_MODALITY, to_string),
            slice_plane: extract_slice_plane(source),
            tr: param(REPETITION_TIME),
            te: param(ECHO_TIME),
            ti: param(INVERSION_TIME),
            slice_thickness: param(SLICE_THICKNESS),
            slice_gap: param(SPACING_BETWEEN_SLICES),
            echo_train_length: param(ECHO_TRAIN_LENGTH),
            field_of_view: param(PERCENT_PHASE_FIELD_OF_VIEW),
            date: read_date(source, KW_SERIES_DATE.into())?,
            time: read_time(source, KW_SERIES_TIME.into())?,
        })
    }

    /// Whether two series are the same protocol across sessions
    ///
    /// Protocol names are taken as stable identifiers: descriptions must be
    /// equal (case-sensitive). A series without a description matches nothing.
    pub fn fuzzy_match(&self, other: &Series) -> bool {
        match (&self.description, &other.description) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Fills scan parameters absent at top level from `source`'s nested sequences
    ///
    /// Enhanced multi-frame images keep TR, TE and related values inside
    /// functional group sequences. Values already present are kept; nothing
    /// changes unless `reader` has deep search enabled.
    pub fn with_nested_parameters<S: MetadataSource>(
        &self,
        source: &S,
        reader: &AttributeReader,
    ) -> Series {
        let fill = |current: Option<OrderedFloat<f64>>, tag: Tag| {
            current.or_else(|| reader.read_or_search(source, tag, to_float).map(OrderedFloat))
        };

        Series {
            tr: fill(self.tr, REPETITION_TIME),
            te: fill(self.te, ECHO_TIME),
            ti: fill(self.ti, INVERSION_TIME),
            slice_thickness: fill(self.slice_thickness, SLICE_THICKNESS),
            slice_gap: fill(self.slice_gap, SPACING_BETWEEN_SLICES),
            echo_train_length: fill(self.echo_train_length, ECHO_TRAIN_LENGTH),
            field_of_view: fill(self.field_of_view, PERCENT_PHASE_FIELD_OF_VIEW),
            ..self.clone()
        }
    }

    /// Whether the series has the given modality code
    pub fn is_modality(&self, modality: &str) -> bool {
        self.modality.as_deref() == Some(modality)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Series {} '{}' [{}]",
            self.number.map(|n| n.to_string()).unwrap_or_else(|| "?".into()),
            self.description.as_deref().unwrap_or(""),
            self.modality.as_deref().unwrap_or("?")
        )
    }
}
