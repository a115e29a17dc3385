//! Product catalog model and JSONL snapshot I/O.
//!
//! Snapshots are record-per-line JSON. Reads skip malformed lines (each one
//! is reported, never silently dropped); writes replace the previous
//! snapshot atomically so an aborted run cannot leave a torn file behind.

pub mod error;
mod record;


pub use error::CatalogError;
pub use record::{CatalogRecord, RecordSource, ReferenceRecord};

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const TEMP_EXTENSION: &str = "jsonl.tmp";

/// Loads a catalog snapshot, returning the records plus the count of
/// malformed lines that were skipped.
pub fn read_catalog(path: &Path) -> Result<(Vec<CatalogRecord>, usize), CatalogError> {
    read_jsonl(path)
}

/// Loads a reference snapshot, returning the records plus the count of
/// malformed lines that were skipped.
pub fn read_references(path: &Path) -> Result<(Vec<ReferenceRecord>, usize), CatalogError> {
    read_jsonl(path)
}

/// Writes the merged catalog as a complete atomic replacement.
pub fn write_catalog(path: &Path, records: &[CatalogRecord]) -> Result<(), CatalogError> {
    let temp_path = path.with_extension(TEMP_EXTENSION);

    {
        let file = File::create(&temp_path).map_err(|source| CatalogError::Write {
            path: temp_path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        for record in records {
            let line =
                serde_json::to_string(record).map_err(|e| CatalogError::Serialize {
                    product_id: record.product_id.clone(),
                    reason: e.to_string(),
                })?;
            writeln!(writer, "{line}").map_err(|source| CatalogError::Write {
                path: temp_path.clone(),
                source,
            })?;
        }

        let file = writer.into_inner().map_err(|e| CatalogError::Write {
            path: temp_path.clone(),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(|source| CatalogError::Write {
            path: temp_path.clone(),
            source,
        })?;
    }

    fs::rename(&temp_path, path).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), records = records.len(), "Catalog snapshot committed");
    Ok(())
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, usize), CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!(
                    path = %path.display(),
                    line = line_no + 1,
                    error = %e,
                    "Skipping malformed record"
                );
            }
        }
    }

    Ok((records, skipped))
}

/// Serializes any report type next to the pipeline artifacts (atomic, pretty).
pub fn write_report<T: Serialize>(path: &Path, report: &T) -> Result<(), CatalogError> {
    let temp_path = path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(report).map_err(|e| CatalogError::SerializeReport {
        reason: e.to_string(),
    })?;

    fs::write(&temp_path, json).map_err(|source| CatalogError::Write {
        path: temp_path.clone(),
        source,
    })?;
    fs::rename(&temp_path, path).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
