use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Produtivo")]
    Productive,
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

impl Category {
    /// Label used on the wire and in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Productive => "Produtivo",
            Category::Unproductive => "Improdutivo",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub id: String,
    pub category: Category,
    pub reply: String,
    pub confidence: f64,
}

/// Output of the local classifier before it is tied to an item id.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVerdict {
    pub category: Category,
    pub reply: String,
    pub confidence: f64,
}

impl LocalVerdict {
    pub fn into_result(self, id: impl Into<String>) -> ClassificationResult {
        ClassificationResult {
            id: id.into(),
            category: self.category,
            reply: self.reply,
            confidence: self.confidence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    Remote,
    Local,
}

impl fmt::Display for ResultOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultOrigin::Remote => f.write_str("remote"),
            ResultOrigin::Local => f.write_str("local"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub result: ClassificationResult,
    pub name: String,
    pub text: String,
    pub origin: ResultOrigin,
    pub recorded_at: DateTime<Utc>,
}
