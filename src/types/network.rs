//! Network entity.

use crate::decode::{Field, Policy, Record, decode_list_of_structs, decode_nested};
use serde::Serialize;
use std::collections::BTreeMap;

/// One top-level network definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkConfig {
    pub name: String,
    pub driver: String,
    pub driver_opts: BTreeMap<String, String>,
    pub ipam: IpamConfig,
    /// Name of the pre-existing network this entry refers to; empty when the
    /// network is managed.
    pub external_name: String,
    pub internal: bool,
    pub labels: BTreeMap<String, String>,
}

impl NetworkConfig {
    pub fn is_external(&self) -> bool {
        !self.external_name.is_empty()
    }
}

impl Record for NetworkConfig {
    const FIELDS: &'static [Field<Self>] = &[
        Field::new("Driver", Policy::String(|n, v| n.driver = v)),
        Field::new(
            "DriverOpts",
            Policy::MappingOrList("=", |n, v| n.driver_opts = v),
        ),
        Field::new(
            "Ipam",
            Policy::NestedStruct(|n, v, at| {
                n.ipam = decode_nested(v, at)?;
                Ok(())
            }),
        ),
        // Resolved against the network's own name by the loader.
        Field::new("External", Policy::Skip),
        Field::new("Internal", Policy::Bool(|n, v| n.internal = v)),
        Field::new("Labels", Policy::MappingOrList("=", |n, v| n.labels = v)),
    ];
}

/// IP address management settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IpamConfig {
    pub driver: String,
    pub config: Vec<IpamPool>,
}

impl Record for IpamConfig {
    const FIELDS: &'static [Field<Self>] = &[
        Field::new("Driver", Policy::String(|i, v| i.driver = v)),
        Field::new(
            "Config",
            Policy::ListOfStructs(|i, v, at| {
                i.config = decode_list_of_structs(v, at)?;
                Ok(())
            }),
        ),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IpamPool {
    pub subnet: String,
}

impl Record for IpamPool {
    const FIELDS: &'static [Field<Self>] =
        &[Field::new("Subnet", Policy::String(|p, v| p.subnet = v))];
}
