use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

/// Placeholder written into freshly generated config files
pub const API_KEY_PLACEHOLDER: &str = "YOUR_TMDB_API_KEY";

const MASK: &str = "********";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub tmdb: TmdbConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbConfig {
    pub api_key: String,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// ISO 639-1 language sent with every metadata request (e.g. "en-US")
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Base URI of the CouchDB/Cloudant service, credentials may be embedded
    pub uri: String,
    #[serde(default = "default_database_name")]
    pub name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON output on or off; detected from the terminal when unset
    #[serde(default)]
    pub json: Option<bool>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_timeout_secs() -> u64 {
    6
}

fn default_database_name() -> String {
    "watchlist".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            tmdb: TmdbConfig {
                api_key: API_KEY_PLACEHOLDER.to_string(),
                base_url: default_tmdb_base_url(),
                timeout_secs: default_timeout_secs(),
                language: None,
                accept_invalid_certs: false,
            },
            database: DatabaseConfig {
                uri: "http://127.0.0.1:5984".to_string(),
                name: default_database_name(),
                timeout_secs: default_timeout_secs(),
                accept_invalid_certs: false,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config file (falling back to defaults when it does not exist)
    /// and apply overrides from the process environment.
    pub fn load(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// `VCAP_SERVICES` (Cloud Foundry service bindings) supplies the database
    /// URI from the first `cloudantNoSQLDB` binding. The more specific
    /// `WATCHLIST_*` variables win over it.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(services) = lookup("VCAP_SERVICES") {
            if let Some(uri) = vcap_database_uri(&services)? {
                self.database.uri = uri;
            }
        }
        if let Some(uri) = lookup("WATCHLIST_DATABASE_URI") {
            self.database.uri = uri;
        }
        if let Some(name) = lookup("WATCHLIST_DATABASE_NAME") {
            self.database.name = name;
        }
        if let Some(key) = lookup("WATCHLIST_TMDB_API_KEY") {
            self.tmdb.api_key = key;
        }
        // Platforms that assign a port expect the app to listen on all interfaces
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got '{}'", port))?;
            self.server.listen_addr = format!("0.0.0.0:{}", port);
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.api_key.trim().is_empty() || self.tmdb.api_key == API_KEY_PLACEHOLDER {
            return Err(anyhow::anyhow!("tmdb.api_key is not configured"));
        }
        Url::parse(&self.tmdb.base_url)
            .map_err(|e| anyhow::anyhow!("tmdb.base_url is not a valid URL: {}", e))?;
        Url::parse(&self.database.uri)
            .map_err(|e| anyhow::anyhow!("database.uri is not a valid URL: {}", e))?;
        if self.database.name.trim().is_empty() {
            return Err(anyhow::anyhow!("database.name cannot be empty"));
        }
        if self.tmdb.timeout_secs == 0 || self.database.timeout_secs == 0 {
            return Err(anyhow::anyhow!("timeouts must be at least one second"));
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .listen_addr
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid listen address: {}", self.server.listen_addr))
    }

    /// Copy of the config safe to print: API key and database password hidden
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        if !masked.tmdb.api_key.is_empty() && masked.tmdb.api_key != API_KEY_PLACEHOLDER {
            masked.tmdb.api_key = MASK.to_string();
        }
        if let Ok(mut uri) = Url::parse(&masked.database.uri) {
            if uri.password().is_some() && uri.set_password(Some(MASK)).is_ok() {
                masked.database.uri = uri.to_string();
            }
        }
        masked
    }
}

/// Extract the Cloudant URL from a `VCAP_SERVICES` JSON document
pub fn vcap_database_uri(services: &str) -> anyhow::Result<Option<String>> {
    let services: serde_json::Value = serde_json::from_str(services)
        .map_err(|e| anyhow::anyhow!("VCAP_SERVICES is not valid JSON: {}", e))?;

    Ok(services["cloudantNoSQLDB"][0]["credentials"]["url"]
        .as_str()
        .map(|s| s.to_string()))
}
