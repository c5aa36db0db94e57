//! Configuration for the Bibet server
//!
//! TOML file, environment-variable overrides and validation, in that
//! order. Env vars use the `BIBET_` prefix.

use crate::errors::{BetError, BetResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// "development" or "production"; controls startup logging only,
    /// internal error bodies are redacted in both modes
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Salt fed to the demo credential service
    pub token_salt: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                cors_origins: vec!["*".to_string()],
                request_timeout_secs: 30,
                environment: "development".to_string(),
            },
            auth: AuthConfig {
                token_salt: "bibet-dev-salt".to_string(),
            },
        }
    }
}

/// Loader combining file, env overrides and validation
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    pub fn load(&self) -> BetResult<AppConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            AppConfig::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;
        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> BetResult<AppConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BetError::internal(format!("Failed to read {}: {}", path, e)))?;
        toml::from_str(&content)
            .map_err(|e| BetError::internal(format!("Failed to parse {}: {}", path, e)))
    }

    fn apply_env_overrides(&self, config: &mut AppConfig) -> BetResult<()> {
        if let Ok(host) = env::var("BIBET_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("BIBET_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| BetError::validation(format!("Invalid BIBET_PORT: {}", port)))?;
        }
        if let Ok(origins) = env::var("BIBET_CORS_ORIGINS") {
            config.server.cors_origins =
                origins.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(environment) = env::var("BIBET_ENV") {
            config.server.environment = environment;
        }
        if let Ok(salt) = env::var("BIBET_TOKEN_SALT") {
            config.auth.token_salt = salt;
        }
        Ok(())
    }

    fn validate(&self, config: &AppConfig) -> BetResult<()> {
        if config.server.port == 0 {
            return Err(BetError::validation("server.port cannot be zero"));
        }
        if config.server.request_timeout_secs == 0 {
            return Err(BetError::validation(
                "server.request_timeout_secs cannot be zero",
            ));
        }
        if config.auth.token_salt.is_empty() {
            return Err(BetError::validation("auth.token_salt cannot be empty"));
        }
        match config.server.environment.as_str() {
            "development" | "production" => Ok(()),
            other => Err(BetError::validation(format!(
                "server.environment must be development or production, got {}",
                other
            ))),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let loader = ConfigLoader::new();
        let config = loader.load().unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, "development");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:5173"]
request_timeout_secs = 10
environment = "production"

[auth]
token_salt = "file-salt"
"#
        )
        .unwrap();

        let config = ConfigLoader::new().with_path(file.path()).load().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token_salt, "file-salt");
    }

    #[test]
    fn test_zero_port_rejected() {
        let loader = ConfigLoader::new();
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn test_unknown_environment_rejected() {
        let loader = ConfigLoader::new();
        let mut config = AppConfig::default();
        config.server.environment = "staging".to_string();
        assert!(loader.validate(&config).is_err());
    }
}
