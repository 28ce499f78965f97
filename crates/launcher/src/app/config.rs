use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use launch_core::{resolve_path_config, PathConfig, StartupError};
use serde::Deserialize;
use thiserror::Error;

pub(crate) const CONFIG_ENV_VAR: &str = "ANTARES_LAUNCHER_CONFIG";

/// Optional overrides layered on top of the detected layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LauncherConfig {
    #[serde(default)]
    pub(crate) prefix: Option<PathBuf>,
    #[serde(default)]
    pub(crate) game_bin: Option<PathBuf>,
    #[serde(default)]
    pub(crate) installer_bin: Option<PathBuf>,
    #[serde(default)]
    pub(crate) lister_bin: Option<PathBuf>,
    #[serde(default)]
    pub(crate) app_data: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read launcher config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse launcher config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// `--config` wins over the environment variable; neither means no overrides.
pub(crate) fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
}

pub(crate) fn load_config(path: &Path) -> Result<LauncherConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(raw: &str) -> Result<LauncherConfig, String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, LauncherConfig>(&mut deserializer) {
        Ok(config) => Ok(config),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(source.to_string())
            } else {
                Err(format!("at {path}: {source}"))
            }
        }
    }
}

pub(crate) fn resolve_paths(config: &LauncherConfig) -> Result<PathConfig, StartupError> {
    let paths = match &config.prefix {
        Some(prefix) => PathConfig::for_prefix(prefix)?,
        None => resolve_path_config()?,
    };
    Ok(apply_overrides(paths, config))
}

fn apply_overrides(mut paths: PathConfig, config: &LauncherConfig) -> PathConfig {
    if let Some(game_bin) = &config.game_bin {
        paths.game_bin = game_bin.clone();
    }
    if let Some(installer_bin) = &config.installer_bin {
        paths.installer_bin = installer_bin.clone();
    }
    if let Some(lister_bin) = &config.lister_bin {
        paths.lister_bin = lister_bin.clone();
    }
    if let Some(app_data) = &config.app_data {
        paths.app_data = Some(app_data.clone());
    }
    paths
}

#[cfg(test)]
mod tests {
    use launch_core::RunMode;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_object_has_no_overrides() {
        assert_eq!(parse_config("{}"), Ok(LauncherConfig::default()));
    }

    #[test]
    fn unknown_field_is_reported_with_message() {
        let error = parse_config(r#"{"gmae_bin": "/bin/true"}"#).expect_err("should fail");
        assert!(error.contains("gmae_bin"), "{error}");
    }

    #[test]
    fn wrong_type_names_the_field() {
        let error = parse_config(r#"{"app_data": 7}"#).expect_err("should fail");
        assert!(error.starts_with("at app_data:"), "{error}");
    }

    #[test]
    fn overrides_replace_detected_paths() {
        let temp = TempDir::new().expect("tempdir");
        let config = LauncherConfig {
            prefix: Some(temp.path().to_path_buf()),
            game_bin: Some(PathBuf::from("/usr/local/bin/antares-glfw")),
            app_data: Some(PathBuf::from("/opt/app/data")),
            ..LauncherConfig::default()
        };

        let paths = resolve_paths(&config).expect("paths");
        assert_eq!(paths.run_mode, RunMode::BuildTree);
        assert_eq!(paths.game_bin, PathBuf::from("/usr/local/bin/antares-glfw"));
        assert_eq!(paths.app_data, Some(PathBuf::from("/opt/app/data")));
        assert_eq!(paths.lister_bin.parent(), Some(paths.bin_dir.as_path()));
    }

    #[test]
    fn load_config_reads_file() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("launcher.json");
        fs::write(&path, r#"{"lister_bin": "/tmp/ls-scenarios"}"#).expect("write");

        let config = load_config(&path).expect("load");
        assert_eq!(config.lister_bin, Some(PathBuf::from("/tmp/ls-scenarios")));
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let temp = TempDir::new().expect("tempdir");
        let error = load_config(&temp.path().join("absent.json")).expect_err("should fail");
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_config_path_wins() {
        assert_eq!(
            config_path(Some(Path::new("explicit.json"))),
            Some(PathBuf::from("explicit.json"))
        );
    }
}
