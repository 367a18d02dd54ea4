//! Top-level loading: turns `ConfigDetails` into a typed `Config`.
//!
//! Stages run in a fixed order and stop at the first failure:
//!
//! 1. Exactly one config file must be present.
//! 2. The version gate checks the `version` key.
//! 3. The schema validator checks the whole document.
//! 4. Services, networks, and volumes are assembled by their own loaders,
//!    each running the field-table decoder and then its entity-specific
//!    steps (name injection, ulimits, external names, volume paths).
//!
//! The file inside `ConfigDetails` is already normalized: `ConfigFile` can
//! only be built through the normalizer.

mod external;
mod paths;
mod ulimits;


pub use external::load_external_name;
pub use paths::{expand_user, join_clean, resolve_volume_path};
pub use ulimits::load_ulimits;

use crate::decode::{Record, decode};
use crate::document::{Mapping, Value, child_path};
use crate::error::{ConfigError, Result, StructuralError};
use crate::schema::{JsonSchemaValidator, SchemaValidator};
use crate::types::{Config, ConfigDetails, NetworkConfig, ServiceConfig, VolumeConfig};
use crate::version::check_version;
use std::collections::BTreeMap;
use tracing::debug;

/// Inputs the service loader needs for volume source rewriting.
#[derive(Debug, Clone, Copy)]
pub struct PathContext<'a> {
    pub working_dir: &'a str,
    pub home_dir: Option<&'a str>,
}

impl<'a> PathContext<'a> {
    pub fn from_details(details: &'a ConfigDetails) -> Self {
        Self {
            working_dir: &details.working_dir,
            home_dir: details.home_dir.as_deref(),
        }
    }
}

/// Load a config using the bundled v2.1 schema.
pub fn load(details: &ConfigDetails) -> Result<Config> {
    load_with(details, JsonSchemaValidator::bundled())
}

/// Load a config, validating it with `validator`.
pub fn load_with(details: &ConfigDetails, validator: &dyn SchemaValidator) -> Result<Config> {
    let file = match details.files.as_slice() {
        [] => return Err(StructuralError::NoFiles.into()),
        [file] => file,
        _ => return Err(StructuralError::MultipleFiles.into()),
    };
    debug!(filename = %file.filename, "loading config file");

    let root = &file.config;
    check_version(root)?;
    validator
        .validate(root)
        .map_err(ConfigError::SchemaValidation)?;
    debug!(filename = %file.filename, "schema validation passed");

    let paths = PathContext::from_details(details);
    let mut config = Config::default();

    if let Some(services) = root.get("services") {
        config.services = load_services(services, paths)?;
    }
    if let Some(networks) = root.get("networks") {
        config.networks = load_networks(networks)?;
    }
    if let Some(volumes) = root.get("volumes") {
        config.volumes = load_volumes(volumes)?;
    }

    debug!(
        services = config.services.len(),
        networks = config.networks.len(),
        volumes = config.volumes.len(),
        "config loaded"
    );
    Ok(config)
}

/// Assemble every service, in document order.
pub fn load_services(value: &Value, paths: PathContext<'_>) -> Result<Vec<ServiceConfig>> {
    section(value, "services")?
        .iter()
        .map(|(name, definition)| load_service(name, definition, paths))
        .collect()
}

/// Assemble one service from its definition.
pub fn load_service(
    name: &str,
    definition: &Value,
    paths: PathContext<'_>,
) -> Result<ServiceConfig> {
    let path = child_path("services", name);
    let body = entity_body(definition, &path)?;

    let mut service: ServiceConfig = decode_body(body, &path)?;
    service.name = name.to_string();

    if let Some(ulimits) = body.and_then(|b| b.get("ulimits")) {
        service.ulimits = load_ulimits(ulimits, &child_path(&path, "ulimits"))?;
    }

    for volume in &mut service.volumes {
        *volume = resolve_volume_path(volume, paths);
    }

    debug!(service = %name, "service loaded");
    Ok(service)
}

/// Assemble every network, keyed by name.
pub fn load_networks(value: &Value) -> Result<BTreeMap<String, NetworkConfig>> {
    section(value, "networks")?
        .iter()
        .map(|(name, definition)| Ok((name.to_string(), load_network(name, definition)?)))
        .collect()
}

/// Assemble one network from its definition.
pub fn load_network(name: &str, definition: &Value) -> Result<NetworkConfig> {
    let path = child_path("networks", name);
    let body = entity_body(definition, &path)?;

    let mut network: NetworkConfig = decode_body(body, &path)?;
    network.name = name.to_string();

    if let Some(external) = body.and_then(|b| b.get("external")) {
        network.external_name =
            load_external_name(name, external, &child_path(&path, "external"))?;
    }

    debug!(network = %name, external = network.is_external(), "network loaded");
    Ok(network)
}

/// Assemble every volume, keyed by name.
pub fn load_volumes(value: &Value) -> Result<BTreeMap<String, VolumeConfig>> {
    section(value, "volumes")?
        .iter()
        .map(|(name, definition)| Ok((name.to_string(), load_volume(name, definition)?)))
        .collect()
}

/// Assemble one volume from its definition.
pub fn load_volume(name: &str, definition: &Value) -> Result<VolumeConfig> {
    let path = child_path("volumes", name);
    let body = entity_body(definition, &path)?;

    let mut volume: VolumeConfig = decode_body(body, &path)?;
    volume.name = name.to_string();

    if let Some(external) = body.and_then(|b| b.get("external")) {
        volume.external_name = load_external_name(name, external, &child_path(&path, "external"))?;
    }

    debug!(volume = %name, external = volume.is_external(), "volume loaded");
    Ok(volume)
}

/// A top-level section must be a mapping of entity name to definition.
fn section<'v>(value: &'v Value, path: &str) -> Result<&'v Mapping> {
    value.as_mapping().ok_or_else(|| {
        StructuralError::NotAMappingAt {
            path: path.to_string(),
            actual: value.kind(),
        }
        .into()
    })
}

/// An entity definition is a mapping, or null for "all defaults".
fn entity_body<'v>(definition: &'v Value, path: &str) -> Result<Option<&'v Mapping>> {
    match definition {
        Value::Null => Ok(None),
        Value::Mapping(mapping) => Ok(Some(mapping)),
        other => Err(StructuralError::NotAMappingAt {
            path: path.to_string(),
            actual: other.kind(),
        }
        .into()),
    }
}

fn decode_body<T: Record>(body: Option<&Mapping>, path: &str) -> Result<T> {
    match body {
        Some(mapping) => decode(mapping, path),
        None => Ok(T::default()),
    }
}
