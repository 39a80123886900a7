//! Multi-tier TOML configuration for Ward.
//!
//! Reads configuration from multiple sources with precedence:
//! CLI flags > env vars > config file > defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ward_permissions::FallbackPolicy;

/// Subdirectory of the config dir holding the directory snapshots by default.
pub const DEFAULT_DIRECTORY_DIR: &str = "directory";

/// Resolved configuration for a Ward session.
#[derive(Debug, Clone)]
pub struct WardConfig {
    pub config_dir: PathBuf,
    /// Where `actors.json` and `roles.json` live.
    pub directory: PathBuf,
    /// The actor to resolve when none is given on the command line.
    pub actor: Option<String>,
    pub fallback: FallbackPolicy,
}

/// Settings that can be read from a TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub directory: DirectorySettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    pub actor: Option<String>,
}

/// CLI overrides that take highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub directory: Option<PathBuf>,
    pub actor: Option<String>,
}

/// Values read from the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub directory: Option<PathBuf>,
    pub actor: Option<String>,
}

impl EnvOverrides {
    /// Read `WARD_DIRECTORY` and `WARD_ACTOR`.
    pub fn from_env() -> Self {
        Self {
            directory: std::env::var_os("WARD_DIRECTORY").map(PathBuf::from),
            actor: std::env::var("WARD_ACTOR").ok(),
        }
    }
}

impl WardConfig {
    /// Load configuration from all sources, applying precedence rules.
    ///
    /// Precedence (highest to lowest):
    /// 1. CLI flags
    /// 2. Environment variables
    /// 3. Global config (~/.ward/config.toml)
    /// 4. Defaults
    pub fn load(overrides: CliOverrides) -> Result<Self, ward_types::ConfigError> {
        let config_dir = config_dir();
        let settings = load_settings_file(&config_dir.join("config.toml"))?;
        Self::resolve(overrides, EnvOverrides::from_env(), settings, config_dir)
    }

    /// Merge already-read sources.
    pub fn resolve(
        overrides: CliOverrides,
        env: EnvOverrides,
        settings: SettingsFile,
        config_dir: PathBuf,
    ) -> Result<Self, ward_types::ConfigError> {
        settings.fallback.validate()?;

        let directory = overrides
            .directory
            .or(env.directory)
            .or(settings.directory.path)
            .unwrap_or_else(|| config_dir.join(DEFAULT_DIRECTORY_DIR));

        let actor = overrides
            .actor
            .or(env.actor)
            .or(settings.session.actor)
            .filter(|actor| !actor.is_empty());

        Ok(WardConfig {
            config_dir,
            directory,
            actor,
            fallback: settings.fallback,
        })
    }

    /// The configured actor, or an error naming how to set one.
    pub fn require_actor(&self) -> Result<&str, ward_types::ConfigError> {
        self.actor
            .as_deref()
            .ok_or_else(|| ward_types::ConfigError::MissingKey {
                key: "actor (pass --actor, set WARD_ACTOR or add [session] actor to config.toml)"
                    .into(),
            })
    }
}

/// Get the Ward config directory path (~/.ward/).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WARD_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ward")
}

/// Load and parse a TOML settings file.
///
/// A missing file yields defaults. A file that exists but can't be read or
/// parsed is an error.
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, ward_types::ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SettingsFile::default()),
        Err(e) => {
            return Err(ward_types::ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            });
        }
    };
    toml::from_str(&content).map_err(|e| {
        tracing::error!("Failed to parse {}: {}", path.display(), e);
        ward_types::ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(overrides: CliOverrides, env: EnvOverrides, settings: SettingsFile) -> WardConfig {
        WardConfig::resolve(overrides, env, settings, PathBuf::from("/home/ana/.ward")).unwrap()
    }

    #[test]
    fn test_default_settings() {
        let config = resolve(
            CliOverrides::default(),
            EnvOverrides::default(),
            SettingsFile::default(),
        );
        assert_eq!(config.directory, PathBuf::from("/home/ana/.ward/directory"));
        assert!(config.actor.is_none());
        assert_eq!(config.fallback, FallbackPolicy::default());
        assert!(config.require_actor().is_err());
    }

    #[test]
    fn test_settings_toml_parse() {
        let toml_str = r#"
[directory]
path = "/srv/hospital/directory"

[session]
actor = "u1"

[fallback]
elevated_tokens = ["Root"]
withheld_categories = ["role-management", "account"]
"#;
        let settings: SettingsFile = toml::from_str(toml_str).unwrap();
        assert_eq!(
            settings.directory.path.as_deref(),
            Some(Path::new("/srv/hospital/directory"))
        );
        assert_eq!(settings.session.actor.as_deref(), Some("u1"));
        assert_eq!(settings.fallback.elevated_tokens, vec!["Root".to_string()]);
        assert_eq!(settings.fallback.withheld_categories.len(), 2);
        assert_eq!(
            settings.fallback.known_categories,
            FallbackPolicy::default().known_categories
        );
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let settings: SettingsFile = toml::from_str(
            r#"
[directory]
path = "/from/file"
[session]
actor = "file-actor"
"#,
        )
        .unwrap();
        let env = EnvOverrides {
            directory: Some(PathBuf::from("/from/env")),
            actor: Some("env-actor".into()),
        };

        let config = resolve(CliOverrides::default(), env.clone(), settings.clone());
        assert_eq!(config.directory, PathBuf::from("/from/env"));
        assert_eq!(config.require_actor().unwrap(), "env-actor");

        let cli = CliOverrides {
            directory: Some(PathBuf::from("/from/cli")),
            actor: Some("cli-actor".into()),
        };
        let config = resolve(cli, env, settings.clone());
        assert_eq!(config.directory, PathBuf::from("/from/cli"));
        assert_eq!(config.actor.as_deref(), Some("cli-actor"));

        let config = resolve(CliOverrides::default(), EnvOverrides::default(), settings);
        assert_eq!(config.directory, PathBuf::from("/from/file"));
        assert_eq!(config.actor.as_deref(), Some("file-actor"));
    }

    #[test]
    fn test_blank_fallback_entry_rejected() {
        let settings: SettingsFile = toml::from_str(
            r#"
[fallback]
elevated_tokens = ["DEV", ""]
"#,
        )
        .unwrap();
        let result = WardConfig::resolve(
            CliOverrides::default(),
            EnvOverrides::default(),
            settings,
            PathBuf::from("/tmp"),
        );
        assert!(matches!(
            result,
            Err(ward_types::ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unparsable_file_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[fallback]\nelevated_tokens = [\"Root\"]\n\n[session\nactor = \"u1\"\n",
        )
        .unwrap();
        let result = load_settings_file(&path);
        assert!(matches!(
            result,
            Err(ward_types::ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = load_settings_file(&tmp.path().join("missing.toml")).unwrap();
        assert!(settings.directory.path.is_none());
        assert_eq!(settings.fallback, FallbackPolicy::default());
    }

    #[test]
    fn test_valid_file_keeps_narrowed_tokens() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[fallback]\nelevated_tokens = [\"Root\"]\n").unwrap();
        let settings = load_settings_file(&path).unwrap();
        assert!(!settings.fallback.is_elevated("Admin"));
        assert!(settings.fallback.is_elevated("Root"));
    }
}
