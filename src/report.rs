//! Ranked report output.
//!
//! Each dimension's counter becomes a semicolon-delimited table with a
//! header row and up to [`TOP_LIMIT`] data rows in rank order. Reports are
//! staged in a temporary file in the destination directory and renamed
//! into place only on full success, so a failed run never leaves a
//! valid-looking truncated report behind.

use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::aggregate::DimensionCounts;
use crate::error::{ReportError, ReportResult};

/// Number of entries reported per dimension.
pub const TOP_LIMIT: usize = 10;

/// Column header for the certified-application count.
const COUNT_HEADER: &str = "NUMBER_CERTIFIED_APPLICATIONS";
/// Column header for the percentage-of-total figure.
const PERCENTAGE_HEADER: &str = "PERCENTAGE";

/// One row of a ranked report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// Dimension value, e.g. a state code or occupation name.
    pub value: String,
    /// Number of certified applications with this value.
    pub count: u64,
    /// Share of all certified applications, one decimal, trailing `%`.
    pub percentage: String,
}

/// Rank a dimension counter into report rows.
///
/// Entries are ordered by descending count, ties broken by ascending
/// value. An empty counter ranks to no rows, so a report for it carries
/// only its header.
pub fn rank(counts: &DimensionCounts, limit: usize) -> Vec<RankedEntry> {
    let total = counts.total();
    counts
        .top(limit)
        .into_iter()
        .map(|(value, count)| {
            let percentage = 100.0 * count as f64 / total as f64;
            RankedEntry {
                value,
                count,
                percentage: format!("{percentage:.1}%"),
            }
        })
        .collect()
}

/// Directory that will hold `path`, validated to exist.
///
/// A bare file name resolves to the current directory.
pub fn output_dir(path: &Path) -> ReportResult<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if parent.is_dir() {
        Ok(parent.to_path_buf())
    } else {
        Err(ReportError::InvalidPath(path.to_path_buf()))
    }
}

/// Write one dimension's ranked report to `path`.
///
/// The table is semicolon-delimited with header
/// `<dimension_name>;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE`.
pub fn write_report(
    path: &Path,
    dimension_name: &str,
    counts: &DimensionCounts,
) -> ReportResult<()> {
    let dir = output_dir(path)?;
    let tmp = NamedTempFile::new_in(dir)?;

    {
        let mut writer = WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_writer(tmp.as_file());
        writer.write_record([dimension_name, COUNT_HEADER, PERCENTAGE_HEADER])?;
        for entry in rank(counts, TOP_LIMIT) {
            writer.serialize(&entry)?;
        }
        writer.flush()?;
    }

    tmp.persist(path)?;
    Ok(())
}
