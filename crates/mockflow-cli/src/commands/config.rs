//! Config command - inspect and edit the stored CLI configuration.

use anyhow::{bail, Result};

use crate::config::Config;

/// Print the current configuration as pretty JSON.
pub fn show(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

/// Print the path to the config file.
pub fn path() -> Result<()> {
    match Config::config_file_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(no config directory available on this platform)"),
    }
    Ok(())
}

/// Set a configuration value and persist it.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "base_url" => config.base_url = value.to_string(),
        "flow_name" => config.flow_name = value.to_string(),
        "port" => config.port = value.parse()?,
        _ => bail!("unknown config key: {key} (expected base_url, flow_name or port)"),
    }
    config.save()?;
    println!("Set {key} = {value}");
    Ok(())
}
