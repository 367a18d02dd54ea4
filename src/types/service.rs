//! Service entity and its sub-records.

use crate::decode::{Field, Policy, Record, decode_nested, decode_struct_map};
use serde::Serialize;
use std::collections::BTreeMap;

/// One service definition.
///
/// `name` comes from the service's key, `ulimits` from a dedicated decode
/// step, and volume sources are path-resolved after decoding. Everything
/// else is filled from [`ServiceConfig::FIELDS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceConfig {
    pub name: String,

    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,
    pub cgroup_parent: String,
    pub command: Vec<String>,
    pub container_name: String,
    pub depends_on: Vec<String>,
    pub deploy: DeployConfig,
    pub devices: Vec<String>,
    pub dns: Vec<String>,
    pub dns_search: Vec<String>,
    pub domainname: String,
    pub entrypoint: Vec<String>,
    pub environment: BTreeMap<String, String>,
    pub expose: Vec<String>,
    pub external_links: Vec<String>,
    pub extra_hosts: BTreeMap<String, String>,
    pub hostname: String,
    pub image: String,
    pub ipc: String,
    pub labels: BTreeMap<String, String>,
    pub links: Vec<String>,
    pub logging: Option<LoggingConfig>,
    pub mac_address: String,
    /// Bytes.
    pub mem_limit: i64,
    /// Bytes.
    pub memswap_limit: i64,
    pub network_mode: String,
    pub networks: BTreeMap<String, ServiceNetworkConfig>,
    pub pid: String,
    pub ports: Vec<String>,
    pub privileged: bool,
    pub read_only: bool,
    pub restart: String,
    pub security_opt: Vec<String>,
    /// Bytes.
    pub shm_size: i64,
    pub stdin_open: bool,
    pub stop_signal: String,
    pub tmpfs: Vec<String>,
    pub tty: bool,
    pub ulimits: BTreeMap<String, UlimitsConfig>,
    pub user: String,
    pub volumes: Vec<String>,
    pub working_dir: String,
}

impl Record for ServiceConfig {
    const FIELDS: &'static [Field<Self>] = &[
        Field::new("CapAdd", Policy::StringList(|s, v| s.cap_add = v)),
        Field::new("CapDrop", Policy::StringList(|s, v| s.cap_drop = v)),
        Field::new("CgroupParent", Policy::String(|s, v| s.cgroup_parent = v)),
        Field::new("Command", Policy::ShellCommand(|s, v| s.command = v)),
        Field::new("ContainerName", Policy::String(|s, v| s.container_name = v)),
        Field::new("DependsOn", Policy::StringList(|s, v| s.depends_on = v)),
        Field::new(
            "Deploy",
            Policy::NestedStruct(|s, v, at| {
                s.deploy = decode_nested(v, at)?;
                Ok(())
            }),
        ),
        Field::new("Devices", Policy::StringList(|s, v| s.devices = v)),
        Field::new("Dns", Policy::StringOrStringList(|s, v| s.dns = v)),
        Field::new(
            "DnsSearch",
            Policy::StringOrStringList(|s, v| s.dns_search = v),
        ),
        Field::keyed(
            "DomainName",
            "domainname",
            Policy::String(|s, v| s.domainname = v),
        ),
        Field::new("Entrypoint", Policy::ShellCommand(|s, v| s.entrypoint = v)),
        Field::new(
            "Environment",
            Policy::MappingOrList("=", |s, v| s.environment = v),
        ),
        Field::new("Expose", Policy::NumberOrStringList(|s, v| s.expose = v)),
        Field::new(
            "ExternalLinks",
            Policy::StringList(|s, v| s.external_links = v),
        ),
        Field::new(
            "ExtraHosts",
            Policy::MappingOrList(":", |s, v| s.extra_hosts = v),
        ),
        Field::new("Hostname", Policy::String(|s, v| s.hostname = v)),
        Field::new("Image", Policy::String(|s, v| s.image = v)),
        Field::new("Ipc", Policy::String(|s, v| s.ipc = v)),
        Field::new("Labels", Policy::MappingOrList("=", |s, v| s.labels = v)),
        Field::new("Links", Policy::StringList(|s, v| s.links = v)),
        Field::new(
            "Logging",
            Policy::NestedStruct(|s, v, at| {
                s.logging = Some(decode_nested(v, at)?);
                Ok(())
            }),
        ),
        Field::new("MacAddress", Policy::String(|s, v| s.mac_address = v)),
        Field::new("MemLimit", Policy::ByteSize(|s, v| s.mem_limit = v)),
        Field::new("MemswapLimit", Policy::ByteSize(|s, v| s.memswap_limit = v)),
        Field::new("NetworkMode", Policy::String(|s, v| s.network_mode = v)),
        Field::new(
            "Networks",
            Policy::ListOrStructMap(|s, v, at| {
                s.networks = decode_struct_map(v, at)?;
                Ok(())
            }),
        ),
        Field::new("Pid", Policy::String(|s, v| s.pid = v)),
        Field::new("Ports", Policy::NumberOrStringList(|s, v| s.ports = v)),
        Field::new("Privileged", Policy::Bool(|s, v| s.privileged = v)),
        Field::new("ReadOnly", Policy::Bool(|s, v| s.read_only = v)),
        Field::new("Restart", Policy::String(|s, v| s.restart = v)),
        Field::new("SecurityOpt", Policy::StringList(|s, v| s.security_opt = v)),
        Field::new("ShmSize", Policy::ByteSize(|s, v| s.shm_size = v)),
        Field::new("StdinOpen", Policy::Bool(|s, v| s.stdin_open = v)),
        Field::new("StopSignal", Policy::String(|s, v| s.stop_signal = v)),
        Field::new("Tmpfs", Policy::StringOrStringList(|s, v| s.tmpfs = v)),
        Field::new("Tty", Policy::Bool(|s, v| s.tty = v)),
        // Shape depends on each entry's value; decoded by the loader.
        Field::new("Ulimits", Policy::Skip),
        Field::new("User", Policy::String(|s, v| s.user = v)),
        Field::new("Volumes", Policy::StringList(|s, v| s.volumes = v)),
        Field::new("WorkingDir", Policy::String(|s, v| s.working_dir = v)),
    ];
}

/// Logging driver settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoggingConfig {
    pub driver: String,
    pub options: BTreeMap<String, String>,
}

impl Record for LoggingConfig {
    const FIELDS: &'static [Field<Self>] = &[
        Field::new("Driver", Policy::String(|l, v| l.driver = v)),
        Field::new("Options", Policy::MappingOrList("=", |l, v| l.options = v)),
    ];
}

/// Deployment settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeployConfig {
    pub mode: String,
    pub replicas: Option<i64>,
    pub labels: BTreeMap<String, String>,
}

impl Record for DeployConfig {
    const FIELDS: &'static [Field<Self>] = &[
        Field::new("Mode", Policy::String(|d, v| d.mode = v)),
        Field::new("Replicas", Policy::Integer(|d, v| d.replicas = Some(v))),
        Field::new("Labels", Policy::MappingOrList("=", |d, v| d.labels = v)),
    ];
}

/// A service's attachment to one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceNetworkConfig {
    pub aliases: Vec<String>,
    pub ipv4_address: String,
    pub ipv6_address: String,
}

impl Record for ServiceNetworkConfig {
    const FIELDS: &'static [Field<Self>] = &[
        Field::new("Aliases", Policy::StringList(|n, v| n.aliases = v)),
        Field::new("Ipv4Address", Policy::String(|n, v| n.ipv4_address = v)),
        Field::new("Ipv6Address", Policy::String(|n, v| n.ipv6_address = v)),
    ];
}

/// A resource limit: one value for both bounds, or separate soft and hard
/// limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UlimitsConfig {
    Single(i64),
    SoftHard { soft: i64, hard: i64 },
}
