pub mod local;
pub mod reply;
pub mod scorer;

pub use local::LocalClassifier;
