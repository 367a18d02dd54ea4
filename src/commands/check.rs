//! Implementation of the `compose-file check` command.
//!
//! Loads one file through every stage and prints what it defines.

use crate::cli::CheckArgs;
use compose_file::error::{ConfigError, Result};
use compose_file::types::{Config, ConfigDetails, ConfigFile};
use compose_file::load;
use std::path::Path;

/// Execute the `compose-file check` command.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let file = ConfigFile::load(&args.file)?;
    let working_dir = working_dir_for(&args.file, args.working_dir.as_deref());
    tracing::debug!(working_dir = %working_dir, "resolved working directory");

    let details = ConfigDetails::from_process_env(working_dir, vec![file]);
    let config = load(&details)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&config)
            .map_err(|e| ConfigError::Io(format!("failed to render config as JSON: {}", e)))?;
        println!("{}", rendered);
    } else {
        print!("{}", summary(&config));
    }
    Ok(())
}

/// An explicit working directory wins; otherwise the file's own directory.
fn working_dir_for(file: &Path, explicit: Option<&Path>) -> String {
    let dir = match explicit {
        Some(dir) => dir,
        None => file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new(".")),
    };
    dir.display().to_string()
}

/// One line per entity, grouped by section.
fn summary(config: &Config) -> String {
    let mut out = String::new();

    out.push_str(&format!("Services ({})\n", config.services.len()));
    for service in &config.services {
        let image = if service.image.is_empty() {
            "-"
        } else {
            service.image.as_str()
        };
        out.push_str(&format!("  {:20} {}\n", service.name, image));
    }

    out.push_str(&format!("Networks ({})\n", config.networks.len()));
    for (name, network) in &config.networks {
        out.push_str(&format!(
            "  {:20} {}\n",
            name,
            describe(&network.driver, &network.external_name)
        ));
    }

    out.push_str(&format!("Volumes ({})\n", config.volumes.len()));
    for (name, volume) in &config.volumes {
        out.push_str(&format!(
            "  {:20} {}\n",
            name,
            describe(&volume.driver, &volume.external_name)
        ));
    }

    out
}

fn describe(driver: &str, external_name: &str) -> String {
    if !external_name.is_empty() {
        format!("external ({})", external_name)
    } else if driver.is_empty() {
        "default driver".to_string()
    } else {
        driver.to_string()
    }
}
