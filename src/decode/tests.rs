//! Tests for the field policy decoder.

use super::*;
use crate::document::parse_yaml;

#[derive(Debug, Default, PartialEq)]
struct Pool {
    subnet: String,
}

impl Record for Pool {
    const FIELDS: &'static [Field<Self>] = &[Field::new(
        "Subnet",
        Policy::String(|p, v| p.subnet = v),
    )];
}

#[derive(Debug, Default, PartialEq)]
struct Attachment {
    aliases: Vec<String>,
}

impl Record for Attachment {
    const FIELDS: &'static [Field<Self>] = &[Field::new(
        "Aliases",
        Policy::StringList(|a, v| a.aliases = v),
    )];
}

#[derive(Debug, Default, PartialEq)]
struct Sample {
    image: String,
    host_domain: String,
    privileged: bool,
    replicas: i64,
    cap_add: Vec<String>,
    dns: Vec<String>,
    ports: Vec<String>,
    command: Vec<String>,
    mem_limit: i64,
    environment: BTreeMap<String, String>,
    extra_hosts: BTreeMap<String, String>,
    networks: BTreeMap<String, Attachment>,
    pools: Vec<Pool>,
    primary: Pool,
    ignored: String,
}

impl Record for Sample {
    const FIELDS: &'static [Field<Self>] = &[
        Field::new("Image", Policy::String(|s, v| s.image = v)),
        Field::keyed(
            "HostDomain",
            "hostdomain",
            Policy::String(|s, v| s.host_domain = v),
        ),
        Field::new("Privileged", Policy::Bool(|s, v| s.privileged = v)),
        Field::new("Replicas", Policy::Integer(|s, v| s.replicas = v)),
        Field::new("CapAdd", Policy::StringList(|s, v| s.cap_add = v)),
        Field::new("Dns", Policy::StringOrStringList(|s, v| s.dns = v)),
        Field::new("Ports", Policy::NumberOrStringList(|s, v| s.ports = v)),
        Field::new("Command", Policy::ShellCommand(|s, v| s.command = v)),
        Field::new("MemLimit", Policy::ByteSize(|s, v| s.mem_limit = v)),
        Field::new(
            "Environment",
            Policy::MappingOrList("=", |s, v| s.environment = v),
        ),
        Field::new(
            "ExtraHosts",
            Policy::MappingOrList(":", |s, v| s.extra_hosts = v),
        ),
        Field::new(
            "Networks",
            Policy::ListOrStructMap(|s, v, at| {
                s.networks = decode_struct_map(v, at)?;
                Ok(())
            }),
        ),
        Field::new(
            "Pools",
            Policy::ListOfStructs(|s, v, at| {
                s.pools = decode_list_of_structs(v, at)?;
                Ok(())
            }),
        ),
        Field::new(
            "Primary",
            Policy::NestedStruct(|s, v, at| {
                s.primary = decode_nested(v, at)?;
                Ok(())
            }),
        ),
        Field::new("Ignored", Policy::Skip),
    ];
}

fn decode_sample(source: &str) -> Result<Sample> {
    decode(&parse_yaml(source).unwrap(), "services.foo")
}

fn mismatch_path(result: Result<Sample>) -> (String, PolicyKind) {
    match result {
        Err(ConfigError::TypeMismatch { path, policy, .. }) => (path, policy),
        other => panic!("expected a type mismatch, got {:?}", other),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Whole-record decoding
// ============================================================================

#[test]
fn test_empty_mapping_yields_default_record() {
    let sample = decode::<Sample>(&Mapping::new(), "services.foo").unwrap();
    assert_eq!(sample, Sample::default());
}

#[test]
fn test_full_record() {
    let sample = decode_sample(
        r#"
image: redis
hostdomain: example.com
privileged: true
replicas: 3
cap_add: [ALL]
dns: 8.8.8.8
ports: ["8080:80", 3000, 2.5]
command: bundle exec thin -p 3000
mem_limit: 1g
environment:
  - FOO=1
extra_hosts:
  - "somehost:162.242.195.82"
networks: [front, back]
pools:
  - subnet: 172.28.0.0/16
  - subnet: 10.0.0.0/8
primary:
  subnet: 192.168.0.0/24
ignored: [whatever, 1]
"#,
    )
    .unwrap();

    assert_eq!(sample.image, "redis");
    assert_eq!(sample.host_domain, "example.com");
    assert!(sample.privileged);
    assert_eq!(sample.replicas, 3);
    assert_eq!(sample.cap_add, strings(&["ALL"]));
    assert_eq!(sample.dns, strings(&["8.8.8.8"]));
    assert_eq!(sample.ports, strings(&["8080:80", "3000", "2.5"]));
    assert_eq!(
        sample.command,
        strings(&["bundle", "exec", "thin", "-p", "3000"])
    );
    assert_eq!(sample.mem_limit, 1024 * 1024 * 1024);
    assert_eq!(sample.environment, string_map(&[("FOO", "1")]));
    assert_eq!(
        sample.extra_hosts,
        string_map(&[("somehost", "162.242.195.82")])
    );
    assert_eq!(sample.networks.len(), 2);
    assert_eq!(sample.networks["front"], Attachment::default());
    assert_eq!(
        sample.pools,
        vec![
            Pool {
                subnet: "172.28.0.0/16".to_string()
            },
            Pool {
                subnet: "10.0.0.0/8".to_string()
            },
        ]
    );
    assert_eq!(sample.primary.subnet, "192.168.0.0/24");
    assert!(sample.ignored.is_empty());
}

#[test]
fn test_explicit_key_replaces_derived_key() {
    let sample = decode_sample("host_domain: example.com\n").unwrap();
    assert!(sample.host_domain.is_empty());
}

#[test]
fn test_decode_is_repeatable() {
    let root = parse_yaml("image: redis\nenvironment: {A: 1}\n").unwrap();
    let first: Sample = decode(&root, "").unwrap();
    let second: Sample = decode(&root, "").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_first_violation_aborts_record() {
    let (path, policy) = mismatch_path(decode_sample("image: [busybox, latest]\nprivileged: yes please\n"));
    assert_eq!(path, "services.foo.image");
    assert_eq!(policy, PolicyKind::String);
}

// ============================================================================
// Scalar policies
// ============================================================================

#[test]
fn test_string_rejects_list() {
    let err = decode_sample("image: [\"busybox\", \"latest\"]\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "services.foo.image must be a string, got sequence"
    );
}

#[test]
fn test_bool_rejects_string() {
    let (path, policy) = mismatch_path(decode_sample("privileged: \"true\"\n"));
    assert_eq!(path, "services.foo.privileged");
    assert_eq!(policy, PolicyKind::Bool);
}

#[test]
fn test_integer_rejects_float() {
    let (_, policy) = mismatch_path(decode_sample("replicas: 1.5\n"));
    assert_eq!(policy, PolicyKind::Integer);
}

// ============================================================================
// List policies
// ============================================================================

#[test]
fn test_string_list_rejects_non_string_item() {
    let (path, policy) = mismatch_path(decode_sample("cap_add: [ALL, 1]\n"));
    assert_eq!(path, "services.foo.cap_add[1]");
    assert_eq!(policy, PolicyKind::StringList);
}

#[test]
fn test_string_or_string_list() {
    let value = Value::from("busybox");
    assert_eq!(string_or_string_list(&value, "x").unwrap(), strings(&["busybox"]));

    let value = Value::Sequence(vec![Value::from("a"), Value::from("b")]);
    assert_eq!(string_or_string_list(&value, "x").unwrap(), strings(&["a", "b"]));

    assert!(string_or_string_list(&Value::Int(1), "x").is_err());
}

#[test]
fn test_number_or_string_list_rejects_bool() {
    let (path, policy) = mismatch_path(decode_sample("ports: [80, true]\n"));
    assert_eq!(path, "services.foo.ports[1]");
    assert_eq!(policy, PolicyKind::NumberOrStringList);
}

#[test]
fn test_shell_command_honors_quoting() {
    let value = Value::from(r#"sh -c "echo hello world" 'single quoted' escaped\ space"#);
    assert_eq!(
        shell_command(&value, "x").unwrap(),
        strings(&["sh", "-c", "echo hello world", "single quoted", "escaped space"])
    );
}

#[test]
fn test_shell_command_list_is_verbatim() {
    let sample = decode_sample("command: [\"echo\", \"a b\", \"$HOME\"]\n").unwrap();
    assert_eq!(sample.command, strings(&["echo", "a b", "$HOME"]));
}

#[test]
fn test_shell_command_syntax_error() {
    let err = decode_sample("command: echo \"unterminated\n").unwrap_err();
    match err {
        ConfigError::Coercion {
            path, policy, raw, ..
        } => {
            assert_eq!(path, "services.foo.command");
            assert_eq!(policy, PolicyKind::ShellCommand);
            assert_eq!(raw, "echo \"unterminated");
        }
        other => panic!("expected a coercion error, got {:?}", other),
    }
}

// ============================================================================
// Byte sizes
// ============================================================================

#[test]
fn test_byte_size_accepts_integer() {
    let sample = decode_sample("mem_limit: 1048576\n").unwrap();
    assert_eq!(sample.mem_limit, 1048576);
}

#[test]
fn test_byte_size_rejects_bad_unit() {
    let err = decode_sample("mem_limit: 12 parsecs\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Coercion {
            policy: PolicyKind::ByteSize,
            ..
        }
    ));
    assert!(err.to_string().contains("12 parsecs"));
}

#[test]
fn test_byte_size_rejects_sequence() {
    let (_, policy) = mismatch_path(decode_sample("mem_limit: [1]\n"));
    assert_eq!(policy, PolicyKind::ByteSize);
}

// ============================================================================
// Mapping or list
// ============================================================================

#[test]
fn test_mapping_or_list_from_list() {
    let value = Value::Sequence(vec![Value::from("FOO=1")]);
    assert_eq!(
        mapping_or_list(&value, "=", "env").unwrap(),
        string_map(&[("FOO", "1")])
    );

    let value = Value::Sequence(vec![Value::from("QUUX")]);
    assert_eq!(
        mapping_or_list(&value, "=", "env").unwrap(),
        string_map(&[("QUUX", "")])
    );

    let value = Value::Sequence(vec![Value::from("A=b=c"), Value::from("EMPTY=")]);
    assert_eq!(
        mapping_or_list(&value, "=", "env").unwrap(),
        string_map(&[("A", "b=c"), ("EMPTY", "")])
    );
}

#[test]
fn test_mapping_or_list_from_mapping() {
    let value = Value::Mapping(
        Mapping::new()
            .with("FOO", Value::Int(1))
            .with("QUUX", Value::Null)
            .with("BAZ", Value::Float(2.5))
            .with("FLAG", Value::Bool(true)),
    );
    assert_eq!(
        mapping_or_list(&value, "=", "env").unwrap(),
        string_map(&[("FOO", "1"), ("QUUX", ""), ("BAZ", "2.5"), ("FLAG", "true")])
    );
}

#[test]
fn test_mapping_or_list_rejects_nested_value() {
    let err = decode_sample("environment:\n  FOO: [\"1\"]\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "services.foo.environment.FOO must be a string, number or null, got sequence"
    );
}

#[test]
fn test_mapping_or_list_rejects_non_string_item() {
    let (path, _) = mismatch_path(decode_sample("environment: [FOO=1, 2]\n"));
    assert_eq!(path, "services.foo.environment[1]");
}

#[test]
fn test_mapping_or_list_rejects_scalar() {
    let err = decode_sample("environment: \"FOO=1\"\n").unwrap_err();
    assert!(
        err.to_string()
            .contains("services.foo.environment must be a mapping")
    );
}

// ============================================================================
// Nested records
// ============================================================================

#[test]
fn test_struct_map_from_mapping() {
    let sample = decode_sample(
        r#"
networks:
  front:
    aliases: [web]
  back:
"#,
    )
    .unwrap();
    assert_eq!(sample.networks["front"].aliases, strings(&["web"]));
    assert_eq!(sample.networks["back"], Attachment::default());
}

#[test]
fn test_struct_map_rejects_scalar_entry() {
    let (path, policy) = mismatch_path(decode_sample("networks:\n  front: yes\n"));
    assert_eq!(path, "services.foo.networks.front");
    assert_eq!(policy, PolicyKind::ListOrStructMap);
}

#[test]
fn test_struct_map_propagates_nested_error() {
    let (path, policy) = mismatch_path(decode_sample("networks:\n  front:\n    aliases: web\n"));
    assert_eq!(path, "services.foo.networks.front.aliases");
    assert_eq!(policy, PolicyKind::StringList);
}

#[test]
fn test_list_of_structs_rejects_scalar_item() {
    let (path, policy) = mismatch_path(decode_sample("pools:\n  - 10.0.0.0/8\n"));
    assert_eq!(path, "services.foo.pools[0]");
    assert_eq!(policy, PolicyKind::ListOfStructs);
}

#[test]
fn test_list_of_structs_propagates_nested_error() {
    let (path, _) = mismatch_path(decode_sample("pools:\n  - subnet: 1\n"));
    assert_eq!(path, "services.foo.pools[0].subnet");
}

#[test]
fn test_nested_struct_rejects_null() {
    let (path, policy) = mismatch_path(decode_sample("primary:\n"));
    assert_eq!(path, "services.foo.primary");
    assert_eq!(policy, PolicyKind::NestedStruct);
}

#[test]
fn test_field_document_keys() {
    let keys: Vec<String> = Sample::FIELDS
        .iter()
        .map(|f| f.document_key().into_owned())
        .collect();
    assert!(keys.contains(&"mem_limit".to_string()));
    assert!(keys.contains(&"hostdomain".to_string()));
    assert!(keys.contains(&"extra_hosts".to_string()));
}
