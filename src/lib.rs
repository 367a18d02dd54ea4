//! Policy-driven loader for compose files.
//!
//! A compose file is parsed into an untyped tree, normalized into a
//! [`document::Mapping`] with string keys only, checked by the version gate
//! and the schema validator, and finally decoded into typed [`Config`]
//! records by table-driven field policies.
//!
//! ```no_run
//! use compose_file::{ConfigDetails, ConfigFile, load};
//!
//! let file = ConfigFile::load("docker-compose.yml")?;
//! let config = load(&ConfigDetails::single(".", file))?;
//! for service in &config.services {
//!     println!("{} runs {}", service.name, service.image);
//! }
//! # Ok::<(), compose_file::ConfigError>(())
//! ```

pub mod decode;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod loader;
pub mod schema;
pub mod types;
pub mod version;

pub use document::parse_yaml;
pub use error::{ConfigError, Result, StructuralError};
pub use loader::{load, load_with};
pub use types::{Config, ConfigDetails, ConfigFile};
