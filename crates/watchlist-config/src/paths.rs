use anyhow::Result;
use std::path::PathBuf;

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("WATCHLIST_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchlist");

        Ok(Self { config_dir })
    }

    /// Config file sits directly in the base path
    pub fn from_base(base: PathBuf) -> Self {
        Self { config_dir: base }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The base directory only exists inside the container image
        let base = container_base_path();
        if base.exists() {
            return Self::from_base(base);
        }

        Self::new().unwrap_or_else(|_| Self::from_base(container_base_path()))
    }
}
