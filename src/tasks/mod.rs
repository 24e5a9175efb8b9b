pub mod dispatcher;
pub mod queue;

pub use dispatcher::{BatchReport, ClassificationDispatcher};
pub use queue::{IdGenerator, ItemQueue, SequentialIds, TimestampIds};
