mod csv;
mod json;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::domain::{ClassificationResult, EmailItem};

pub use csv::render_csv;
pub use json::render_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// One queued item joined with its result, if it has one.
#[derive(Debug, Clone, Copy)]
pub struct ExportRow<'a> {
    pub item: &'a EmailItem,
    pub result: Option<&'a ClassificationResult>,
}

pub fn rows<'a>(
    items: &'a [EmailItem],
    results: &'a [ClassificationResult],
) -> Vec<ExportRow<'a>> {
    items
        .iter()
        .map(|item| ExportRow {
            item,
            result: results.iter().find(|r| r.id == item.id),
        })
        .collect()
}

pub fn render(
    format: ExportFormat,
    rows: &[ExportRow<'_>],
    generated_at: DateTime<Utc>,
) -> Result<String> {
    match format {
        ExportFormat::Json => {
            render_json(rows, generated_at).context("failed to encode JSON export")
        }
        ExportFormat::Csv => Ok(render_csv(rows)),
    }
}

pub async fn write_export(
    dir: &Path,
    format: ExportFormat,
    rows: &[ExportRow<'_>],
    generated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let contents = render(format, rows, generated_at)?;
    let path = dir.join(format!(
        "classificacao-emails-{}.{}",
        generated_at.timestamp_millis(),
        format.extension()
    ));
    tokio::fs::write(&path, contents)
        .await
        .with_context(|| format!("failed to write export {}", path.display()))?;
    tracing::info!(target: "export", path = %path.display(), rows = rows.len(), "export written");
    Ok(path)
}
