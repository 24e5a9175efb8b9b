pub mod item;
pub mod types;

pub use item::{EmailItem, ItemSource};
pub use types::{Category, ClassificationResult, HistoryEntry, LocalVerdict, ResultOrigin};
