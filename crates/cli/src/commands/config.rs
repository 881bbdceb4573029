//! `agenthub config` — print the effective configuration as TOML.

use agenthub_config::AppConfig;

pub fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
