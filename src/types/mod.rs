//! Typed configuration model.
//!
//! This module defines the decode target (`Config` and its entities) and
//! the input bundle (`ConfigDetails`). Every entity type declares its field
//! table here, next to the struct it fills.

mod network;
mod service;
mod volume;


pub use network::{IpamConfig, IpamPool, NetworkConfig};
pub use service::{
    DeployConfig, LoggingConfig, ServiceConfig, ServiceNetworkConfig, UlimitsConfig,
};
pub use volume::VolumeConfig;

use crate::document::{Mapping, normalize_root, parse_yaml};
use crate::error::{ConfigError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

/// One parsed and normalized config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Name the file was read from, for messages only.
    pub filename: String,
    /// The normalized root mapping.
    pub config: Mapping,
}

impl ConfigFile {
    /// Parse YAML source into a config file.
    pub fn from_yaml(filename: impl Into<String>, source: &str) -> Result<Self> {
        Ok(Self {
            filename: filename.into(),
            config: parse_yaml(source)?,
        })
    }

    /// Normalize a tree already produced by the YAML parser.
    pub fn from_raw(filename: impl Into<String>, raw: &serde_yaml::Value) -> Result<Self> {
        Ok(Self {
            filename: filename.into(),
            config: normalize_root(raw)?,
        })
    }

    /// Read and parse a config file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Io(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(path.display().to_string(), &content)
    }
}

/// Everything `load` needs: the files plus the inputs used for path expansion.
#[derive(Debug, Clone, Default)]
pub struct ConfigDetails {
    /// Directory relative volume sources are resolved against.
    pub working_dir: String,
    /// Config files to load. Exactly one is supported.
    pub files: Vec<ConfigFile>,
    /// Environment snapshot. Not consulted by the decoder itself.
    pub environment: BTreeMap<String, String>,
    /// Replacement for a leading `~` in volume sources. `None` leaves `~` alone.
    pub home_dir: Option<String>,
}

impl ConfigDetails {
    /// Details for a single file, with no environment and no home directory.
    pub fn single(working_dir: impl Into<String>, file: ConfigFile) -> Self {
        Self {
            working_dir: working_dir.into(),
            files: vec![file],
            ..Self::default()
        }
    }

    /// Capture the current process environment (including `HOME`).
    pub fn from_process_env(working_dir: impl Into<String>, files: Vec<ConfigFile>) -> Self {
        Self::from_env_vars(working_dir, files, std::env::vars_os())
    }

    /// Build details from an explicit set of environment variables.
    ///
    /// Entries whose name or value is not valid UTF-8 are skipped, so a
    /// non-UTF-8 `HOME` leaves `~` unexpanded.
    pub fn from_env_vars<I>(working_dir: impl Into<String>, files: Vec<ConfigFile>, vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let environment: BTreeMap<String, String> = vars
            .into_iter()
            .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (Ok(name), Err(_)) => {
                    tracing::debug!(name = %name, "skipping non-UTF-8 environment value");
                    None
                }
                _ => None,
            })
            .collect();
        let home_dir = environment.get("HOME").cloned();
        Self {
            working_dir: working_dir.into(),
            files,
            environment,
            home_dir,
        }
    }

    /// Set the home directory used for `~` expansion.
    pub fn with_home_dir(mut self, home_dir: impl Into<String>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }
}

/// A fully decoded configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Config {
    /// Services in document order.
    pub services: Vec<ServiceConfig>,
    pub networks: BTreeMap<String, NetworkConfig>,
    pub volumes: BTreeMap<String, VolumeConfig>,
}

impl Config {
    /// Find a service by name.
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }
}
