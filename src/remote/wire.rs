use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Category, ClassificationResult, EmailItem};

use super::RemoteError;

pub const DEFAULT_REMOTE_CONFIDENCE: f64 = 0.75;
const MAX_EXPECTED_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Serialize)]
pub struct ClassifyRequest<'a> {
    pub emails: Vec<OutboundEmail<'a>>,
}

#[derive(Debug, Serialize)]
pub struct OutboundEmail<'a> {
    pub id: &'a str,
    pub text: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default)]
    pub results: Vec<RemoteResult>,
}

#[derive(Debug, Deserialize)]
pub struct RemoteResult {
    pub id: String,
    pub category: Category,
    pub reply: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

pub fn build_request(items: &[EmailItem]) -> ClassifyRequest<'_> {
    ClassifyRequest {
        emails: items
            .iter()
            .map(|item| OutboundEmail {
                id: &item.id,
                text: &item.text,
                name: &item.name,
            })
            .collect(),
    }
}

/// Decodes a success body and lines the results up with `items`.
///
/// Every requested id must come back exactly once; anything else is a
/// [`RemoteError::Mismatch`] so the caller can fall back for the whole batch.
pub fn parse_response(
    body: &[u8],
    items: &[EmailItem],
) -> Result<Vec<ClassificationResult>, RemoteError> {
    let response: ClassifyResponse = serde_json::from_slice(body)?;

    let mut by_id: HashMap<String, RemoteResult> = HashMap::with_capacity(response.results.len());
    for result in response.results {
        if by_id.contains_key(&result.id) {
            return Err(RemoteError::Mismatch(format!("duplicate id {}", result.id)));
        }
        by_id.insert(result.id.clone(), result);
    }

    let requested: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
    if let Some(unknown) = by_id.keys().find(|id| !requested.contains(id.as_str())) {
        return Err(RemoteError::Mismatch(format!("unknown id {unknown}")));
    }

    items
        .iter()
        .map(|item| {
            let result = by_id
                .remove(&item.id)
                .ok_or_else(|| RemoteError::Mismatch(format!("missing id {}", item.id)))?;
            let confidence = result.confidence.unwrap_or(DEFAULT_REMOTE_CONFIDENCE);
            if !confidence_in_range(confidence) {
                tracing::warn!(
                    target: "remote",
                    id = %result.id,
                    confidence,
                    "remote confidence outside [0, 0.95]; kept as received"
                );
            }
            Ok(ClassificationResult {
                id: result.id,
                category: result.category,
                reply: result.reply,
                confidence,
            })
        })
        .collect()
}

fn confidence_in_range(confidence: f64) -> bool {
    (0.0..=MAX_EXPECTED_CONFIDENCE).contains(&confidence)
}
