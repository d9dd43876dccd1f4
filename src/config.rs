use crate::error::{CampusError, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "campus.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampusConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| CampusError::Config(format!("Invalid listen host: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Ordered in-process collections, lost on exit
    #[default]
    Memory,
    /// JSON documents under the data directory
    Document,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_store_path")]
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

fn default_store_path() -> String {
    ".campus".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            seed: None,
        }
    }
}

impl CampusConfig {
    /// Load the nearest `campus.yml` at or above `start_path`.
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        Self::load_file(&config_path)
    }

    pub fn load_file(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: CampusConfig = serde_yaml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| CampusError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    /// Like [`CampusConfig::load`], falling back to defaults rooted at `start_path`.
    pub fn load_or_default(start_path: &Path) -> Result<(Self, PathBuf)> {
        match Self::load(start_path) {
            Err(CampusError::NotInitialized) => Ok((Self::default(), start_path.to_path_buf())),
            other => other,
        }
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(CampusError::NotInitialized);
            }
        }
    }

    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.store.path)
    }

    pub fn seed_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.store.seed.as_ref().map(|seed| project_root.join(seed))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CampusConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "127.0.0.1:5000".parse().unwrap()
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CampusConfig =
            serde_yaml::from_str("store:\n  backend: document\n").unwrap();
        assert_eq!(config.store.backend, StoreBackend::Document);
        assert_eq!(config.store.path, ".campus");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_searches_upward() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = CampusConfig::default();
        config.server.port = 4000;
        config.save(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let (loaded, root) = CampusConfig::load(&nested).unwrap();
        assert_eq!(loaded.server.port, 4000);
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let (config, root) = CampusConfig::load_or_default(temp_dir.path()).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn test_invalid_host() {
        let mut settings = ServerSettings::default();
        settings.host = "localhost:80".to_string();
        assert!(matches!(
            settings.socket_addr(),
            Err(CampusError::Config(_))
        ));
    }
}
