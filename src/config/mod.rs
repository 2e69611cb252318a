/// Optional `hangar.toml` provider and try-on configuration
pub mod app;

/// Local store connection and schema management
pub mod database;

/// Tracing subscriber setup
pub mod logging;

pub use app::{AppConfig, load_default_config};
