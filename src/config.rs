//! Configuration types for recordkv.
//!
//! Settings are resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config <path>`, or `recordkv.toml` in the working
//!    directory when present)
//! 3. Environment variables (`PORT`, `HOST`, `MONGO_URI`, `MONGO_DATABASE`,
//!    `MONGO_COLLECTION`, `RECORDS_BACKEND`)
//!
//! CLI flags are applied on top by `main`.
//!
//! ```toml
//! [server]
//! port = 8080
//!
//! [records]
//! backend = "mongo"
//! uri = "mongodb://localhost:27017"
//! database = "getir-case-study"
//! collection = "records"
//!
//! [inmemory.seed]
//! getir = "company"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub records: RecordsConfig,
    pub inmemory: InMemoryConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which record source backs `/records`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordsBackendKind {
    #[default]
    Mongo,
    Memory,
}

impl FromStr for RecordsBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown records backend '{other}' (expected mongo or memory)"),
        }
    }
}

/// Record source settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    pub backend: RecordsBackendKind,
    /// MongoDB connection string. Never has a default; it carries credentials.
    pub uri: Option<String>,
    pub database: String,
    pub collection: String,
    /// JSON array of records for the memory backend.
    pub fixtures: Option<PathBuf>,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            backend: RecordsBackendKind::default(),
            uri: None,
            database: constants::DEFAULT_DATABASE.to_string(),
            collection: constants::DEFAULT_COLLECTION.to_string(),
            fixtures: None,
        }
    }
}

impl std::fmt::Debug for RecordsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordsConfig")
            .field("backend", &self.backend)
            .field("uri", &self.uri.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("fixtures", &self.fixtures)
            .finish()
    }
}

/// In-memory store settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InMemoryConfig {
    /// Entries present at startup.
    pub seed: HashMap<String, String>,
}

impl Config {
    /// Resolve configuration from an optional file plus the process
    /// environment.
    ///
    /// With `path = None`, `recordkv.toml` in the working directory is used
    /// if it exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an
    /// environment variable holds an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None if Path::new(constants::DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from(constants::DEFAULT_CONFIG_FILE)?
            },
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from the specified TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields have invalid types
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port or `RECORDS_BACKEND`
    /// names an unknown backend.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(port) = get("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: '{port}'"))?;
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(uri) = get("MONGO_URI") {
            self.records.uri = Some(uri);
        }
        if let Some(database) = get("MONGO_DATABASE") {
            self.records.database = database;
        }
        if let Some(collection) = get("MONGO_COLLECTION") {
            self.records.collection = collection;
        }
        if let Some(backend) = get("RECORDS_BACKEND") {
            self.records.backend = backend.parse()?;
        }

        Ok(())
    }

    /// Validate configuration.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error listing every problem found:
    /// - Port 0
    /// - Mongo backend without a connection string
    /// - Empty database or collection name
    /// - Memory backend fixtures file that does not exist
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            errors.push(
                "Server port cannot be 0. Use a valid port number (1-65535)\n  \
                 Common ports: 3000 (default), 8080, 8000"
                    .to_string(),
            );
        } else if self.server.port < 1024 {
            warnings.push(format!(
                "Server port {} is a system/privileged port (< 1024)\n  \
                 Recommendation: Use ports >= 1024 (e.g., 3000, 8080, 8000) to avoid permission issues",
                self.server.port
            ));
        }

        if self.server.host.is_empty() {
            errors.push("server.host cannot be empty".to_string());
        }

        match self.records.backend {
            RecordsBackendKind::Mongo => {
                if self.records.uri.as_deref().is_none_or(str::is_empty) {
                    errors.push(
                        "records.uri is required for the mongo backend\n  \
                         Set MONGO_URI or records.uri in the config file"
                            .to_string(),
                    );
                }
                if self.records.database.is_empty() {
                    errors.push("records.database cannot be empty".to_string());
                }
                if self.records.collection.is_empty() {
                    errors.push("records.collection cannot be empty".to_string());
                }
                if self.records.fixtures.is_some() {
                    warnings.push(
                        "records.fixtures is ignored by the mongo backend".to_string(),
                    );
                }
            },
            RecordsBackendKind::Memory => match &self.records.fixtures {
                Some(path) if !path.exists() => {
                    errors.push(format!(
                        "records.fixtures file not found: {}",
                        path.display()
                    ));
                },
                Some(_) => {},
                None => warnings.push(
                    "Memory backend has no fixtures; /records will always be empty".to_string(),
                ),
            },
        }

        if !errors.is_empty() {
            anyhow::bail!("Invalid configuration:\n- {}", errors.join("\n- "));
        }

        Ok(ValidationResult { warnings })
    }
}
