//! Configuration for the storegate gateway.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the storegate MCP gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URLs of the backend services.
    pub endpoints: ServiceEndpoints,

    /// Timeout for outbound RPC requests in seconds.
    pub request_timeout_secs: u64,

    /// Per-domain write permissions. Read actions are always allowed.
    pub permissions: Permissions,
}

/// Base URLs of the backend services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEndpoints {
    pub customer: String,
    pub catalog: String,
    pub inventory: String,
    pub refdata: String,
    pub reviews: String,
    pub store: String,
    pub telegram: String,
}

/// Per-domain write permission flags.
///
/// When a flag is off, mutating actions of that domain's tool return an
/// in-band error result. Reference data has no mutating actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub customer_writes: bool,
    pub catalog_writes: bool,
    pub inventory_writes: bool,
    pub review_writes: bool,
    pub store_writes: bool,
    pub telegram_writes: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoints: ServiceEndpoints::default(),
            request_timeout_secs: 30,
            permissions: Permissions::default(),
        }
    }
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            customer: "http://localhost:9101/".to_string(),
            catalog: "http://localhost:9102/".to_string(),
            inventory: "http://localhost:9103/".to_string(),
            refdata: "http://localhost:9104/".to_string(),
            reviews: "http://localhost:9105/".to_string(),
            store: "http://localhost:9106/".to_string(),
            telegram: "http://localhost:9107/".to_string(),
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            customer_writes: true,
            catalog_writes: true,
            inventory_writes: true,
            review_writes: true,
            store_writes: true,
            telegram_writes: true,
        }
    }
}

impl GatewayConfig {
    /// Default config file location, `~/.storegate/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::configuration("Could not find home directory"))?;
        Ok(home.join(".storegate").join("config.json"))
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Self::default_path()?;
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
