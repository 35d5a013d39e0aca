//! Configuration for the pet HTTP server

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use tracing::warn;

use crate::errors::{PetError, Result};

pub const ENV_HOST: &str = "NOVA_PET_HOST";
pub const ENV_PORT: &str = "NOVA_PET_PORT";
pub const ENV_NAME: &str = "NOVA_PET_NAME";

/// Configuration for the pet server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on (default: 127.0.0.1)
    pub host: String,
    /// TCP port (default: 8000, 0 picks a free port)
    pub port: u16,
    /// Name given to the pet at startup
    pub pet_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            pet_name: "Nova".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PetError::config_file(path, e))?;
        toml::from_str(&content).map_err(|e| PetError::config_file(path, e))
    }

    /// Create configuration from defaults plus environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields with environment variables if present
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| env::var(key).ok());
    }

    /// Same as [`ServerConfig::apply_env`] with a custom variable lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse() {
                Ok(port) => self.port = port,
                Err(e) => warn!("Ignoring {}={:?}: {}", ENV_PORT, port, e),
            }
        }

        if let Some(name) = lookup(ENV_NAME) {
            self.pet_name = name;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(PetError::configuration("Host cannot be empty"));
        }

        if self.pet_name.trim().is_empty() {
            return Err(PetError::configuration("Pet name cannot be empty"));
        }

        Ok(())
    }

    /// Resolve `host:port` to the first matching socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let target = format!("{}:{}", self.host, self.port);
        target
            .to_socket_addrs()
            .map_err(|e| PetError::configuration(format!("Cannot resolve {target}: {e}")))?
            .next()
            .ok_or_else(|| PetError::configuration(format!("No address found for {target}")))
    }
}
