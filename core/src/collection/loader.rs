use crate::collection::Collection;
use crate::error::{DicomcheckError, Result};
use crate::extraction::tags::PIXEL_DATA;
use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Builds the collection for one session directory
///
/// Every regular file below `dir` is tried as DICOM. Files are read in
/// parallel and inserted in path order by a single writer. Unreadable files
/// and records missing identity fields are logged and skipped.
///
/// # Errors
///
/// Returns [`DicomcheckError::DirectoryNotFound`] if `dir` is not a directory.
pub fn load_directory(dir: &Path) -> Result<Collection> {
    if !dir.is_dir() {
        return Err(DicomcheckError::DirectoryNotFound(dir.to_path_buf()));
    }

    let files = collect_files(dir);
    info!("Found {} files in {}", files.len(), dir.display());

    let records: Vec<(PathBuf, Result<InMemDicomObject>)> = files
        .into_par_iter()
        .map(|path| {
            let record = read_record(&path);
            (path, record)
        })
        .collect();

    let mut collection = Collection::new();
    let mut skipped = 0usize;
    for (path, record) in records {
        let outcome = record.and_then(|record| collection.add(path.clone(), record));
        if let Err(e) = outcome {
            warn!("Skipping {}: {}", path.display(), e);
            skipped += 1;
        }
    }

    info!(
        "Loaded {} series from {} files in {} ({} skipped)",
        collection.len(),
        collection.file_count(),
        dir.display(),
        skipped
    );
    Ok(collection)
}

/// Lists regular files below `dir`, sorted by name, hidden entries excluded
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => warn!("Error accessing entry: {}", e),
        }
    }
    files
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Reads the dataset of one file, stopping before pixel data
fn read_record(path: &Path) -> Result<InMemDicomObject> {
    debug!("Reading {}", path.display());
    let obj = OpenFileOptions::new().read_until(PIXEL_DATA).open_file(path)?;
    Ok(obj.into_inner())
}
