//! Static JSON export: one `week-<N>.json` per week
//!
//! Weeks are fetched and written strictly one after another. Each file is
//! complete on its own, so a failure part-way leaves valid files for the
//! weeks before it.

use crate::error::CliError;
use chrono::{DateTime, TimeZone};
use std::io::Write;
use std::path::{Path, PathBuf};
use wt_workspace::{RecordFetcher, WorkspaceApi};

/// File name for week `weeks_ago`
#[must_use]
pub fn week_file_name(weeks_ago: u32) -> String {
    format!("week-{weeks_ago}.json")
}

/// Write weeks `0..weeks` under `dir`, creating it if needed
///
/// Progress lines go to `progress`.
///
/// # Errors
/// The first search, serialization or file failure; earlier files remain.
pub async fn export_weeks<A, Tz, W>(
    fetcher: &RecordFetcher<A>,
    now: &DateTime<Tz>,
    weeks: u32,
    dir: &Path,
    progress: &mut W,
) -> Result<Vec<PathBuf>, CliError>
where
    A: WorkspaceApi,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    W: Write,
{
    tokio::fs::create_dir_all(dir).await.map_err(|source| CliError::File {
        path: dir.to_path_buf(),
        source,
    })?;
    writeln!(progress, "Generating data for last {weeks} weeks...")?;

    let mut written = Vec::with_capacity(weeks as usize);
    for week in 0..weeks {
        writeln!(progress, "Processing week {week}...")?;
        let report = fetcher.collect_week(now, week).await?;

        let path = dir.join(week_file_name(week));
        let body = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(&path, body).await.map_err(|source| CliError::File {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Wrote {} ({} pages)", path.display(), report.pages.len());

        writeln!(progress, "✅ {}: {} pages", report.week_label, report.pages.len())?;
        written.push(path);
    }

    writeln!(progress)?;
    writeln!(progress, "🎉 Data generation complete!")?;
    writeln!(progress, "Files generated in {}", dir.display())?;
    Ok(written)
}
