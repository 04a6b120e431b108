//! `vxlan config`: show the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = lookup(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }
        ConfigCommands::List if output.is_json() => output.json(&config)?,
        ConfigCommands::List => {
            let text = toml::to_string_pretty(&config)
                .with_cli_context(|| "cannot render configuration as TOML")?;
            output.header("Effective configuration")?;
            output.print(text.trim_end())?;
        }
        ConfigCommands::Path => output.print(&AppConfig::config_path().display().to_string())?,
    }
    Ok(())
}

fn lookup(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!("no such key '{key}' (known: {})", AppConfig::KEYS.join(", ")),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn configured_path_is_returned() {
        let mut config = AppConfig::default();
        config.templates.dir = Some(PathBuf::from("site/templates"));
        assert_eq!(lookup(&config, "templates.dir").unwrap(), "site/templates");
    }

    #[test]
    fn unset_path_is_empty_and_defaults_are_shown() {
        let config = AppConfig::default();
        assert_eq!(lookup(&config, "fabric.path").unwrap(), "");
        assert_eq!(lookup(&config, "output.dir").unwrap(), "vxlan-out");
    }

    #[test]
    fn unknown_key_lists_the_known_ones() {
        let err = lookup(&AppConfig::default(), "fabric.name").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert!(err.to_string().contains("logging.file"));
    }
}
