pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, RemoteConfig};
pub use loader::{load_config, DEFAULT_TIMEZONE};
