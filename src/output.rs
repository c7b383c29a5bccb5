//! CSV output of the aggregated odds table.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::types::RaceOdds;

pub const TITLE_COLUMN: &str = "Title";
pub const REPUBLICAN_COLUMN: &str = "Republican Votes";
pub const DEMOCRATIC_COLUMN: &str = "Democratic Votes";

/// `<dir>/<prefix>_<YYYY-MM-DD_HH-MM>.csv` for a run started at `started`
pub fn output_path(dir: &Path, prefix: &str, started: &DateTime<Local>) -> PathBuf {
    dir.join(format!("{}_{}.csv", prefix, started.format("%Y-%m-%d_%H-%M")))
}

/// Flatten records into a three-column frame; failed figures become nulls
pub fn to_dataframe(records: &[RaceOdds]) -> Result<DataFrame> {
    let titles: Vec<String> = records.iter().map(|r| r.title.clone()).collect();
    let republican: Vec<Option<String>> = records.iter().map(|r| r.republican_pct.clone()).collect();
    let democratic: Vec<Option<String>> = records.iter().map(|r| r.democrat_pct.clone()).collect();

    let df = df!(
        TITLE_COLUMN => titles,
        REPUBLICAN_COLUMN => republican,
        DEMOCRATIC_COLUMN => democratic
    )?;
    Ok(df)
}

/// Write records to `path`, creating the parent directory if needed
pub fn write_csv(records: &[RaceOdds], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut df = to_dataframe(records)?;
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
