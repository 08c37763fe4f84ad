//! Patient → study → series index of a session's files
//!
//! A [`Collection`] groups every ingested file under the structurally equal
//! (patient, study, series) triple it belongs to. Levels are ordered maps,
//! so iteration follows the entities' ordering (UID first for studies and
//! series) regardless of the order files were added in.

pub mod loader;

use crate::error::{DicomcheckError, HierarchyLevel, Result};
use crate::extraction::source::MetadataSource;
use crate::types::{Patient, Series, Study};
use chrono::NaiveDate;
use dicom_object::InMemDicomObject;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub use loader::load_directory;

type SeriesMap<R> = BTreeMap<Series, Vec<SourceFile<R>>>;
type StudyMap<R> = BTreeMap<Study, SeriesMap<R>>;

/// A file that contributed to a series, with its parsed record
#[derive(Debug, Clone)]
pub struct SourceFile<R> {
    pub path: PathBuf,
    pub record: R,
}

/// Borrowed view of one series and the files grouped under it
#[derive(Debug)]
pub struct SeriesEntry<'a, R> {
    pub patient: &'a Patient,
    pub study: &'a Study,
    pub series: &'a Series,
    pub files: &'a [SourceFile<R>],
}

impl<R> Clone for SeriesEntry<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SeriesEntry<'_, R> {}

/// Hierarchical index of one session
#[derive(Debug, Clone)]
pub struct Collection<R = InMemDicomObject> {
    patients: BTreeMap<Patient, StudyMap<R>>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Collection<R> {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self {
            patients: BTreeMap::new(),
        }
    }

    /// Ingests one record under the triple it derives
    ///
    /// # Errors
    ///
    /// Returns the construction error if the record lacks a required
    /// identity field; the collection is left unchanged.
    pub fn add(&mut self, path: impl Into<PathBuf>, record: R) -> Result<()>
    where
        R: MetadataSource,
    {
        let patient = Patient::from_source(&record)?;
        let study = Study::from_source(&record)?;
        let series = Series::from_source(&record)?;
        let path = path.into();

        debug!("Adding {}: {}, {}, {}", path.display(), patient, study, series);

        self.patients
            .entry(patient)
            .or_default()
            .entry(study)
            .or_default()
            .entry(series)
            .or_default()
            .push(SourceFile { path, record });
        Ok(())
    }

    /// Locates the series an external record belongs to
    ///
    /// Each level matches by full structural equality, so the record must
    /// carry every attribute the stored entities were built from. A reduced
    /// sidecar that omits, for example, the manufacturer or TR will not
    /// match and reports the first level whose entity differs.
    ///
    /// # Errors
    ///
    /// - [`DicomcheckError::NotFound`] naming the first hierarchy level with
    ///   no structurally equal entry
    /// - a parse failure if the record itself lacks required fields
    pub fn identify<S>(&self, record: &S) -> Result<SeriesEntry<'_, R>>
    where
        S: MetadataSource + ?Sized,
    {
        let patient = Patient::from_source(record)?;
        let study = Study::from_source(record)?;
        let series = Series::from_source(record)?;

        let (patient, studies) = self
            .patients
            .get_key_value(&patient)
            .ok_or(DicomcheckError::NotFound(HierarchyLevel::Patient))?;
        let (study, series_map) = studies
            .get_key_value(&study)
            .ok_or(DicomcheckError::NotFound(HierarchyLevel::Study))?;
        let (series, files) = series_map
            .get_key_value(&series)
            .ok_or(DicomcheckError::NotFound(HierarchyLevel::Series))?;

        Ok(SeriesEntry {
            patient,
            study,
            series,
            files,
        })
    }

    /// Finds the counterpart of a series from another collection
    ///
    /// Returns the first entry, in iteration order, whose series
    /// [fuzzy-matches](Series::fuzzy_match) `query`. When several series
    /// share a description the lowest (patient, study, series UID) wins.
    pub fn get_series(&self, query: &Series) -> Option<SeriesEntry<'_, R>> {
        self.series().find(|entry| entry.series.fuzzy_match(query))
    }

    /// Iterates over every series entry in hierarchy order
    pub fn series(&self) -> impl Iterator<Item = SeriesEntry<'_, R>> + '_ {
        self.patients.iter().flat_map(|(patient, studies)| {
            studies.iter().flat_map(move |(study, series_map)| {
                series_map.iter().map(move |(series, files)| SeriesEntry {
                    patient,
                    study,
                    series,
                    files,
                })
            })
        })
    }

    /// Iterates over the distinct patients
    pub fn patients(&self) -> impl Iterator<Item = &Patient> + '_ {
        self.patients.keys()
    }

    /// First series entry; the session header is taken from it
    pub fn first_entry(&self) -> Option<SeriesEntry<'_, R>> {
        self.series().next()
    }

    /// Date of the first study in the collection
    pub fn session_date(&self) -> Option<NaiveDate> {
        self.first_entry().map(|entry| entry.study.date)
    }

    /// Number of distinct series
    pub fn len(&self) -> usize {
        self.series().count()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Number of files across all series
    pub fn file_count(&self) -> usize {
        self.series().map(|entry| entry.files.len()).sum()
    }
}

impl<R> fmt::Display for Collection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (patient, studies) in &self.patients {
            writeln!(f, "{}", patient)?;
            for (study, series_map) in studies {
                writeln!(f, "\t{}", study)?;
                for (series, files) in series_map {
                    writeln!(f, "\t\t{}", series)?;
                    writeln!(f, "\t\t\t{} files", files.len())?;
                }
            }
        }
        Ok(())
    }
}
