use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::typing::{CompilerOptions, ModuleKind, ScriptTarget};

pub const CONFIG_FILE_NAME: &str = ".tsjsdocrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/__tests__/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_module")]
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_file: Option<String>,
}

fn default_includes() -> Vec<String> {
    vec!["src/**/*.ts".to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_target() -> String {
    "ES6".to_string()
}

fn default_module() -> String {
    "commonjs".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            source_root: default_source_root(),
            ignore_test_files: default_ignore_test_files(),
            target: default_target(),
            module: default_module(),
            out_dir: None,
            out_file: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal paths and may contain brackets.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }

    /// Compiler options described by this configuration.
    ///
    /// Unknown module kinds fall back to `none`; an unknown target is kept
    /// verbatim and reported when the program is built.
    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            target: ScriptTarget::parse(&self.target),
            module: ModuleKind::parse(&self.module),
            out_dir: self.out_dir.as_ref().map(PathBuf::from),
            out_file: self.out_file.as_ref().map(PathBuf::from),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert_eq!(config.includes, vec!["src/**/*.ts"]);
        assert_eq!(config.target, "ES6");
        assert_eq!(config.module, "commonjs");
        assert!(config.out_dir.is_none());
        assert!(config.out_file.is_none());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/generated/**"],
              "includes": ["lib/**/*.ts"],
              "target": "es5",
              "module": "amd",
              "outDir": "docs"
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/generated/**"]);
        assert_eq!(config.includes, vec!["lib/**/*.ts"]);
        assert_eq!(config.target, "es5");
        assert_eq!(config.module, "amd");
        assert_eq!(config.out_dir.as_deref(), Some("docs"));
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "outFile": "api.jsdoc" }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.out_file.as_deref(), Some("api.jsdoc"));
        assert_eq!(config.includes, default_includes());
        assert_eq!(config.target, default_target());
        assert!(config.ignore_test_files);
    }

    #[test]
    fn test_compiler_options() {
        let config = Config {
            target: "ES2015".to_string(),
            module: "AMD".to_string(),
            out_dir: Some("docs".to_string()),
            ..Default::default()
        };
        let options = config.compiler_options();
        assert_eq!(options.target, ScriptTarget::Es6);
        assert_eq!(options.module, ModuleKind::Amd);
        assert_eq!(options.out_dir, Some(PathBuf::from("docs")));
        assert_eq!(options.out_file, None);
    }

    #[test]
    fn test_compiler_options_keep_unknown_values_permissive() {
        let config = Config {
            target: "esnext2".to_string(),
            module: "system".to_string(),
            ..Default::default()
        };
        let options = config.compiler_options();
        assert_eq!(options.target, ScriptTarget::Unrecognized("esnext2".to_string()));
        assert_eq!(options.module, ModuleKind::None);
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("models");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "ignores": ["**/vendor/**"] }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.ignores, vec!["**/vendor/**"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert!(result.config.ignores.is_empty());
        assert_eq!(result.config.includes, default_includes());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_invalid_include_pattern() {
        let config = Config {
            includes: vec!["src/**/[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("includes"));
    }

    #[test]
    fn test_load_config_with_invalid_json_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let result = load_config(dir.path());
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_default_config_json_omits_unset_outputs() {
        let json = default_config_json().unwrap();
        assert!(json.contains("\"includes\""));
        assert!(json.contains("\"target\": \"ES6\""));
        assert!(!json.contains("outDir"));
    }
}
