use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::Category;

use super::ExportRow;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    generated_at: String,
    data: Vec<JsonRow<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    name: &'a str,
    text: &'a str,
    category: Option<Category>,
    reply: Option<&'a str>,
    confidence: Option<f64>,
}

pub fn render_json(
    rows: &[ExportRow<'_>],
    generated_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let export = JsonExport {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        data: rows
            .iter()
            .map(|row| JsonRow {
                name: &row.item.name,
                text: &row.item.text,
                category: row.result.map(|r| r.category),
                reply: row.result.map(|r| r.reply.as_str()),
                confidence: row.result.map(|r| r.confidence),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&export)
}
