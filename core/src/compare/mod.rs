//! Field-by-field comparison of two sessions
//!
//! Walks the new session, pairs each comparable series with its reference
//! counterpart (see [`Collection::get_series`]) and lists the reference and
//! new value of every compared field. Rendering is left to
//! [`crate::cli::report::TextReport`] or JSON serialization.

mod config;
mod parameters;

pub use config::{CompareConfig, DEFAULT_MODALITY};
pub use parameters::{collect_parameter, SCAN_PARAMETERS};

use crate::collection::{Collection, SeriesEntry};
use crate::extraction::reader::AttributeReader;
use crate::extraction::source::MetadataSource;
use crate::types::Series;
use log::{debug, info};
use ordered_float::OrderedFloat;

/// Reference and new value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FieldComparison {
    pub label: &'static str,
    pub reference: Option<String>,
    pub new: Option<String>,
}

impl FieldComparison {
    pub fn new(label: &'static str, reference: Option<String>, new: Option<String>) -> Self {
        Self {
            label,
            reference,
            new,
        }
    }

    /// Whether the two sides differ (absent counts as a value)
    pub fn differs(&self) -> bool {
        self.reference != self.new
    }
}

/// Comparison of one new-session series against its reference match
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SeriesComparison {
    pub description: Option<String>,
    pub new_uid: String,
    /// UID of the matched reference series, if any
    pub reference_uid: Option<String>,
    /// Series fields in report order
    pub fields: Vec<FieldComparison>,
    /// File count and supplementary acquisition parameters
    pub parameters: Vec<FieldComparison>,
}

impl SeriesComparison {
    pub fn has_reference(&self) -> bool {
        self.reference_uid.is_some()
    }

    /// Compared lines whose values differ
    pub fn differences(&self) -> impl Iterator<Item = &FieldComparison> + '_ {
        self.fields
            .iter()
            .chain(self.parameters.iter())
            .filter(|field| field.differs())
    }
}

/// Full comparison of two sessions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SessionComparison {
    pub patient: Vec<FieldComparison>,
    pub scanner: Vec<FieldComparison>,
    pub series: Vec<SeriesComparison>,
}

impl SessionComparison {
    /// Number of differing lines across the whole report
    pub fn difference_count(&self) -> usize {
        let header = self
            .patient
            .iter()
            .chain(self.scanner.iter())
            .filter(|field| field.differs())
            .count();
        header
            + self
                .series
                .iter()
                .map(|series| series.differences().count())
                .sum::<usize>()
    }
}

/// Compares every comparable series of `new` against `reference`
///
/// Series excluded by [`CompareConfig::is_comparable`] are skipped. A series
/// with no reference match is still reported, with every reference value
/// absent.
pub fn compare_sessions<R1, R2>(
    reference: &Collection<R1>,
    new: &Collection<R2>,
    config: &CompareConfig,
) -> SessionComparison
where
    R1: MetadataSource,
    R2: MetadataSource,
{
    let reader = AttributeReader::new().with_deep_search(config.deep_search);
    let reference_first = reference.first_entry();
    let new_first = new.first_entry();

    let mut series = Vec::new();
    for entry in new.series() {
        let new_series = resolve_series(&entry, &reader);
        if !config.is_comparable(&new_series) {
            debug!("Skipping {} (not comparable)", entry.series);
            continue;
        }

        let matched = reference.get_series(entry.series);
        match &matched {
            Some(m) => debug!("Matched {} to reference {}", entry.series, m.series.uid),
            None => info!("No reference series matches {}", entry.series),
        }

        let parameters = if config.include_parameters {
            compare_parameters(matched.as_ref(), &entry, &reader)
        } else {
            Vec::new()
        };

        series.push(SeriesComparison {
            description: entry.series.description.clone(),
            new_uid: entry.series.uid.clone(),
            reference_uid: matched.as_ref().map(|m| m.series.uid.clone()),
            fields: compare_series(
                matched.as_ref().map(|m| resolve_series(m, &reader)).as_ref(),
                &new_series,
            ),
            parameters,
        });
    }

    SessionComparison {
        patient: compare_patient(reference_first.as_ref(), new_first.as_ref()),
        scanner: compare_scanner(reference_first.as_ref(), new_first.as_ref()),
        series,
    }
}

/// Compares the series fields in report order
pub fn compare_series(reference: Option<&Series>, new: &Series) -> Vec<FieldComparison> {
    let field = |label: &'static str, get: fn(&Series) -> Option<String>| {
        FieldComparison::new(label, reference.and_then(get), get(new))
    };

    vec![
        field("Series number", |s| s.number.map(|n| n.to_string())),
        field("Date", |s| Some(s.date.to_string())),
        field("Time", |s| Some(s.time.to_string())),
        field("Modality", |s| s.modality.clone()),
        field("Slice orientation", |s| Some(s.slice_plane.to_string())),
        field("TR", |s| format_float(s.tr)),
        field("TE", |s| format_float(s.te)),
        field("TI", |s| format_float(s.ti)),
        field("Slice thickness", |s| format_float(s.slice_thickness)),
        field("Slice gap", |s| format_float(s.slice_gap)),
        field("Echo train length", |s| format_float(s.echo_train_length)),
        field("Field of view", |s| format_float(s.field_of_view)),
    ]
}

/// Series fields, with nested-sequence fallback when deep search is enabled
///
/// The first file of the series stands in for the whole series.
fn resolve_series<R: MetadataSource>(
    entry: &SeriesEntry<'_, R>,
    reader: &AttributeReader,
) -> Series {
    match entry.files.first() {
        Some(file) if reader.deep_search_enabled() => {
            entry.series.with_nested_parameters(&file.record, reader)
        }
        _ => entry.series.clone(),
    }
}

fn compare_parameters<R1, R2>(
    reference: Option<&SeriesEntry<'_, R1>>,
    new: &SeriesEntry<'_, R2>,
    reader: &AttributeReader,
) -> Vec<FieldComparison>
where
    R1: MetadataSource,
    R2: MetadataSource,
{
    let mut lines = vec![FieldComparison::new(
        "Number of files",
        reference.map(|r| r.files.len().to_string()),
        Some(new.files.len().to_string()),
    )];

    for &(tag, label) in SCAN_PARAMETERS {
        lines.push(FieldComparison::new(
            label,
            reference.and_then(|r| collect_parameter(r.files, tag, reader)),
            collect_parameter(new.files, tag, reader),
        ));
    }
    lines
}

fn compare_patient<R1, R2>(
    reference: Option<&SeriesEntry<'_, R1>>,
    new: Option<&SeriesEntry<'_, R2>>,
) -> Vec<FieldComparison> {
    vec![
        FieldComparison::new(
            "Patient name",
            reference.and_then(|e| e.patient.name.clone()),
            new.and_then(|e| e.patient.name.clone()),
        ),
        FieldComparison::new(
            "Patient ID",
            reference.and_then(|e| e.patient.id.clone()),
            new.and_then(|e| e.patient.id.clone()),
        ),
        FieldComparison::new(
            "Patient DoB",
            reference.map(|e| e.patient.birth_date.to_string()),
            new.map(|e| e.patient.birth_date.to_string()),
        ),
        FieldComparison::new(
            "Scan date",
            reference.map(|e| e.study.date.to_string()),
            new.map(|e| e.study.date.to_string()),
        ),
    ]
}

fn compare_scanner<R1, R2>(
    reference: Option<&SeriesEntry<'_, R1>>,
    new: Option<&SeriesEntry<'_, R2>>,
) -> Vec<FieldComparison> {
    vec![
        FieldComparison::new(
            "Scanner manufacturer",
            reference.and_then(|e| e.study.manufacturer.clone()),
            new.and_then(|e| e.study.manufacturer.clone()),
        ),
        FieldComparison::new(
            "Scanner model name",
            reference.and_then(|e| e.study.model.clone()),
            new.and_then(|e| e.study.model.clone()),
        ),
        FieldComparison::new(
            "Field strength",
            reference.and_then(|e| format_float(e.study.field_strength)),
            new.and_then(|e| format_float(e.study.field_strength)),
        ),
        FieldComparison::new(
            "Device serial number",
            reference.and_then(|e| e.study.device_serial_number.clone()),
            new.and_then(|e| e.study.device_serial_number.clone()),
        ),
    ]
}

fn format_float(value: Option<OrderedFloat<f64>>) -> Option<String> {
    value.map(|v| v.0.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::tests::mr_record;
    use crate::extraction::sidecar::SidecarRecord;
    use crate::extraction::tags::{
        ECHO_TIME, MANUFACTURER, MODALITY, REPETITION_TIME, SIEMENS_B_VALUE,
    };
    use dicom_core::Tag;

    fn field<'a>(fields: &'a [FieldComparison], label: &str) -> &'a FieldComparison {
        fields.iter().find(|f| f.label == label).unwrap()
    }

    fn session(records: Vec<SidecarRecord>) -> Collection<SidecarRecord> {
        let mut collection = Collection::new();
        for (i, record) in records.into_iter().enumerate() {
            collection.add(format!("im{:04}", i), record).unwrap();
        }
        collection
    }

    #[test]
    fn test_tr_differs_te_matches() {
        let reference = session(vec![mr_record("1.1", "1.1.1", "T1", Some("500"), Some("10"))]);
        let new = session(vec![mr_record("2.1", "2.1.1", "T1", Some("600"), Some("10"))]);

        let report = compare_sessions(&reference, &new, &CompareConfig::default());
        assert_eq!(report.series.len(), 1);

        let series = &report.series[0];
        assert!(series.has_reference());
        let tr = field(&series.fields, "TR");
        assert_eq!(tr.reference.as_deref(), Some("500"));
        assert_eq!(tr.new.as_deref(), Some("600"));
        assert!(tr.differs());

        let te = field(&series.fields, "TE");
        assert_eq!(te.reference.as_deref(), Some("10"));
        assert!(!te.differs());
    }

    #[test]
    fn test_field_order() {
        let new = session(vec![mr_record("2.1", "2.1.1", "T1", Some("600"), None)]);
        let report = compare_sessions(&Collection::<SidecarRecord>::new(), &new, &CompareConfig::default());
        let labels: Vec<_> = report.series[0].fields.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec![
                "Series number",
                "Date",
                "Time",
                "Modality",
                "Slice orientation",
                "TR",
                "TE",
                "TI",
                "Slice thickness",
                "Slice gap",
                "Echo train length",
                "Field of view",
            ]
        );
    }

    #[test]
    fn test_series_without_tr_is_excluded() {
        let reference = session(vec![mr_record("1.1", "1.1.1", "T1", Some("500"), None)]);
        let new = session(vec![
            mr_record("2.1", "2.1.1", "T1", Some("500"), None),
            mr_record("2.1", "2.1.2", "Localizer", None, None),
        ]);

        let report = compare_sessions(&reference, &new, &CompareConfig::default());
        assert_eq!(report.series.len(), 1);
        assert_eq!(report.series[0].description.as_deref(), Some("T1"));
    }

    #[test]
    fn test_non_mr_series_is_excluded_by_default() {
        let new = session(vec![
            mr_record("2.1", "2.1.1", "T1", Some("500"), None).with_values(MODALITY, ["CT"])
        ]);
        let reference = Collection::<SidecarRecord>::new();

        assert!(compare_sessions(&reference, &new, &CompareConfig::default())
            .series
            .is_empty());
        assert_eq!(
            compare_sessions(&reference, &new, &CompareConfig::permissive())
                .series
                .len(),
            1
        );
    }

    #[test]
    fn test_unmatched_series_has_absent_reference() {
        let reference = session(vec![mr_record("1.1", "1.1.1", "T2_FLAIR", Some("9000"), None)]);
        let new = session(vec![mr_record("2.1", "2.1.1", "T1_MPRAGE", Some("2300"), None)]);

        let report = compare_sessions(&reference, &new, &CompareConfig::default());
        let series = &report.series[0];
        assert!(!series.has_reference());
        assert!(series.fields.iter().all(|f| f.reference.is_none()));
        assert_eq!(field(&series.fields, "TR").new.as_deref(), Some("2300"));
    }

    #[test]
    fn test_header_and_parameters() {
        let reference = session(vec![
            mr_record("1.1", "1.1.1", "DTI", Some("8000"), None)
                .with_values(MANUFACTURER, ["SIEMENS"])
                .with_values(SIEMENS_B_VALUE, ["0"]),
            mr_record("1.1", "1.1.1", "DTI", Some("8000"), None)
                .with_values(MANUFACTURER, ["SIEMENS"])
                .with_values(SIEMENS_B_VALUE, ["1000"]),
        ]);
        let new = session(vec![mr_record("2.1", "2.1.1", "DTI", Some("8000"), None)
            .with_values(MANUFACTURER, ["SIEMENS"])
            .with_values(SIEMENS_B_VALUE, ["0"])]);

        let report = compare_sessions(&reference, &new, &CompareConfig::default());
        assert!(!field(&report.scanner, "Scanner manufacturer").differs());
        assert!(!field(&report.patient, "Patient ID").differs());

        let parameters = &report.series[0].parameters;
        let files = field(parameters, "Number of files");
        assert_eq!(files.reference.as_deref(), Some("2"));
        assert_eq!(files.new.as_deref(), Some("1"));
        let b_value = field(parameters, "B value");
        assert_eq!(b_value.reference.as_deref(), Some("0, 1000"));
        assert_eq!(b_value.new.as_deref(), Some("0"));

        // Number of files and B value
        assert_eq!(report.difference_count(), 2);
    }

    fn enhanced_record(study_uid: &str, series_uid: &str, tr: &str, te: &str) -> SidecarRecord {
        let timing = SidecarRecord::new()
            .with_values(REPETITION_TIME, [tr])
            .with_values(ECHO_TIME, [te]);
        let shared = SidecarRecord::new().with_items(Tag(0x0018, 0x9112), vec![timing]);
        mr_record(study_uid, series_uid, "T1", None, None)
            .with_items(Tag(0x5200, 0x9229), vec![shared])
    }

    #[test]
    fn test_nested_scan_fields_need_deep_search() {
        let reference = session(vec![mr_record("1.1", "1.1.1", "T1", Some("500"), Some("10"))]);
        let new = session(vec![enhanced_record("2.1", "2.1.1", "600", "10")]);

        let shallow = compare_sessions(&reference, &new, &CompareConfig::default());
        assert!(shallow.series.is_empty());

        let config = CompareConfig::default().deep_search(true);
        let report = compare_sessions(&reference, &new, &config);
        assert_eq!(report.series.len(), 1);

        let fields = &report.series[0].fields;
        let tr = field(fields, "TR");
        assert_eq!(tr.reference.as_deref(), Some("500"));
        assert_eq!(tr.new.as_deref(), Some("600"));
        assert!(tr.differs());
        assert!(!field(fields, "TE").differs());
    }

    #[test]
    fn test_nested_reference_fields_resolved() {
        let reference = session(vec![enhanced_record("1.1", "1.1.1", "500", "10")]);
        let new = session(vec![mr_record("2.1", "2.1.1", "T1", Some("500"), Some("10"))]);

        let config = CompareConfig::default().deep_search(true);
        let report = compare_sessions(&reference, &new, &config);
        assert!(!field(&report.series[0].fields, "TR").differs());
        assert!(!field(&report.series[0].fields, "TE").differs());
    }

    #[test]
    fn test_parameters_can_be_disabled() {
        let new = session(vec![mr_record("2.1", "2.1.1", "T1", Some("500"), None)]);
        let config = CompareConfig::default().include_parameters(false);
        let report = compare_sessions(&Collection::<SidecarRecord>::new(), &new, &config);
        assert!(report.series[0].parameters.is_empty());
    }
}
