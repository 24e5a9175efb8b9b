pub mod app;
pub mod config;
pub mod domain;
pub mod export;
pub mod heuristics;
pub mod infrastructure;
pub mod ingest;
pub mod remote;
pub mod session;
pub mod stats;
pub mod tasks;
