//! CSV export of the filtered record set.
//!
//! The output is UTF-8 text with a fixed header row and one line per
//! record. Only the location field is double-quoted; the other fields are
//! written verbatim, so a comma inside a name corrupts its row. That
//! matches the stored collection's export contract and is not fixed here.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use crate::error::Result;
use crate::record::AttendanceRecord;

/// Fixed header row of every export.
pub const CSV_HEADER: &str = "ID,Employee Name,Work Option,Date,Time,Location";

/// Flatten a filtered record set into CSV text.
///
/// Produces exactly `records.len() + 1` lines: the header plus one row per
/// record, joined with `\n` and no trailing newline.
#[must_use]
pub fn to_csv(records: &[&AttendanceRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for record in records {
        lines.push(format!(
            "{},{},{},{},{},\"{}\"",
            record.id.as_deref().unwrap_or(""),
            record.employee_name,
            record.work_option,
            record.date,
            record.time,
            record.location,
        ));
    }
    lines.join("\n")
}

/// File name for an export created on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("attendance_{date}.csv")
}

/// Write the CSV for `records` into `dir`, named with the current date.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn write_csv(dir: &Path, records: &[&AttendanceRecord]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(Utc::now().date_naive()));
    fs::write(&path, to_csv(records))?;
    Ok(path)
}
