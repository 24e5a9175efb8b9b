use crate::domain::{ClassificationResult, EmailItem, LocalVerdict};

use super::{reply::suggest_reply, scorer::score};

/// Rule-based classifier used whenever the remote service is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClassifier;

impl LocalClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> LocalVerdict {
        let hints = score(text);
        let category = hints.category();
        LocalVerdict {
            category,
            reply: suggest_reply(category, text).to_string(),
            confidence: hints.confidence(),
        }
    }

    pub fn classify_all(&self, items: &[EmailItem]) -> Vec<ClassificationResult> {
        items
            .iter()
            .map(|item| self.classify(&item.text).into_result(item.id.clone()))
            .collect()
    }
}
