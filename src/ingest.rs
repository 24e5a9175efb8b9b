use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::future::join_all;

use crate::{
    domain::{EmailItem, ItemSource},
    tasks::ItemQueue,
};

pub const PDF_PLACEHOLDER: &str = "[PDF enviado – o backend fará a extração de texto]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unsupported,
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unsupported => f.write_str("only .txt and .pdf files are accepted"),
            SkipReason::Unreadable(err) => write!(f, "could not read file: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub accepted: Vec<EmailItem>,
    pub skipped: Vec<SkippedFile>,
}

pub fn file_kind(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "txt" => Some(FileKind::Text),
        "pdf" => Some(FileKind::Pdf),
        _ => None,
    }
}

/// Queues every acceptable file; the rest are reported back, not failed.
pub async fn ingest_files(queue: &ItemQueue, paths: &[PathBuf]) -> IngestReport {
    let loaded = join_all(paths.iter().map(|path| load_file(path))).await;

    let mut report = IngestReport::default();
    for (path, outcome) in paths.iter().zip(loaded) {
        match outcome {
            Ok(text) => {
                let item = queue.add_item(ItemSource::File, display_name(path), text);
                tracing::debug!(target: "ingest", id = %item.id, file = %path.display(), "file queued");
                report.accepted.push(item);
            }
            Err(reason) => {
                tracing::warn!(
                    target: "ingest",
                    file = %path.display(),
                    reason = %reason,
                    "file skipped"
                );
                report.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason,
                });
            }
        }
    }
    report
}

async fn load_file(path: &Path) -> Result<String, SkipReason> {
    match file_kind(path) {
        Some(FileKind::Text) => tokio::fs::read(path)
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|err| SkipReason::Unreadable(err.to_string())),
        Some(FileKind::Pdf) => Ok(PDF_PLACEHOLDER.to_string()),
        None => Err(SkipReason::Unsupported),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Blank pastes are ignored.
pub fn ingest_paste(
    queue: &ItemQueue,
    text: &str,
    tz: Tz,
    now: DateTime<Utc>,
) -> Option<EmailItem> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(queue.add_item(ItemSource::Paste, paste_name(tz, now), trimmed))
}

pub fn paste_name(tz: Tz, now: DateTime<Utc>) -> String {
    format!(
        "Texto colado ({})",
        now.with_timezone(&tz).format("%d/%m/%Y %H:%M:%S")
    )
}
