pub mod config;
pub mod paths;

pub use config::{vcap_database_uri, Config, DatabaseConfig, LoggingConfig, ServerConfig, TmdbConfig, API_KEY_PLACEHOLDER};
pub use paths::{container_base_path, PathManager};
