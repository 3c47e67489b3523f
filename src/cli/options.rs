//! Configuration resolution shared by the documentation commands.

use std::env;

use anyhow::{Context, Result};
use tracing::debug;

use super::args::CommonArgs;
use crate::config::{Config, ConfigLoadResult, load_config};

/// Loads the configuration found above the working directory and applies
/// the command-line overrides.
pub fn resolve_config(common: &CommonArgs) -> Result<Config> {
    let cwd = env::current_dir().context("Failed to read current directory")?;
    let ConfigLoadResult {
        mut config,
        from_file,
    } = load_config(&cwd)?;

    if from_file {
        debug!("loaded configuration above {}", cwd.display());
    } else {
        debug!("no configuration file found, using defaults");
    }

    apply_overrides(&mut config, common);
    Ok(config)
}

fn apply_overrides(config: &mut Config, common: &CommonArgs) {
    if let Some(target) = &common.target {
        config.target = target.clone();
    }
    if let Some(module) = &common.module {
        config.module = module.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::typing::{ModuleKind, ScriptTarget};

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = Config::default();
        let common = CommonArgs {
            target: Some("es5".to_string()),
            module: Some("amd".to_string()),
            verbose: false,
        };
        apply_overrides(&mut config, &common);

        let options = config.compiler_options();
        assert_eq!(options.target, ScriptTarget::Es5);
        assert_eq!(options.module, ModuleKind::Amd);
    }

    #[test]
    fn test_absent_overrides_keep_config_values() {
        let mut config = Config {
            target: "latest".to_string(),
            ..Default::default()
        };
        apply_overrides(&mut config, &CommonArgs::default());

        assert_eq!(config.target, "latest");
        assert_eq!(config.module, "commonjs");
    }
}
