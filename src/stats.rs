use crate::domain::{Category, ClassificationResult};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchStats {
    pub total: usize,
    pub productive: usize,
    pub unproductive: usize,
    pub average_confidence: f64,
}

pub fn summarize(results: &[ClassificationResult]) -> BatchStats {
    if results.is_empty() {
        return BatchStats::default();
    }

    let productive = results
        .iter()
        .filter(|r| r.category == Category::Productive)
        .count();
    let confidence_sum: f64 = results.iter().map(|r| r.confidence).sum();

    BatchStats {
        total: results.len(),
        productive,
        unproductive: results.len() - productive,
        average_confidence: confidence_sum / results.len() as f64,
    }
}
