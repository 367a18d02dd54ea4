//! Volume entity.

use crate::decode::{Field, Policy, Record};
use serde::Serialize;
use std::collections::BTreeMap;

/// One top-level volume definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumeConfig {
    pub name: String,
    pub driver: String,
    pub driver_opts: BTreeMap<String, String>,
    /// Name of the pre-existing volume this entry refers to; empty when the
    /// volume is managed.
    pub external_name: String,
    pub labels: BTreeMap<String, String>,
}

impl VolumeConfig {
    pub fn is_external(&self) -> bool {
        !self.external_name.is_empty()
    }
}

impl Record for VolumeConfig {
    const FIELDS: &'static [Field<Self>] = &[
        Field::new("Driver", Policy::String(|v, s| v.driver = s)),
        Field::new(
            "DriverOpts",
            Policy::MappingOrList("=", |v, m| v.driver_opts = m),
        ),
        // Resolved against the volume's own name by the loader.
        Field::new("External", Policy::Skip),
        Field::new("Labels", Policy::MappingOrList("=", |v, m| v.labels = m)),
    ];
}
