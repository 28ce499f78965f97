use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod catalog;
pub mod launch;

pub use catalog::{parse_catalog, Catalog, CatalogError, MalformedReason, ScenarioRecord};
pub use launch::{
    decide_install_action, replace_process, run_startup, InstallAction, LaunchError,
    LaunchOrchestrator, LaunchState, ProcessError, ProcessRunner, RunError, ShellEvent,
    ShellOutcome, SystemProcessRunner,
};

pub const PREFIX_ENV_VAR: &str = "ANTARES_PREFIX";
pub const GAME_BIN_NAME: &str = "antares-glfw";
pub const INSTALLER_BIN_NAME: &str = "antares-install-data";
pub const LISTER_BIN_NAME: &str = "antares-ls-scenarios";
pub const FACTORY_SCENARIO_ID: &str = "com.biggerplanet.ares";

/// Where the launcher is running from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// A development build; bundled content may be stale and is reinstalled.
    BuildTree,
    /// A packaged installation; content is only verified.
    Installed,
}

/// Filesystem locations resolved once at startup.
///
/// `factory_scenario` is set exactly when `run_mode` is [`RunMode::BuildTree`].
/// `app_data` defaults from the layout but may be overridden by configuration
/// before the orchestrator takes ownership.
#[derive(Debug, Clone)]
pub struct PathConfig {
    pub run_mode: RunMode,
    pub prefix: PathBuf,
    pub bin_dir: PathBuf,
    pub game_bin: PathBuf,
    pub installer_bin: PathBuf,
    pub lister_bin: PathBuf,
    pub scenarios_dir: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub icon: PathBuf,
    pub app_data: Option<PathBuf>,
    pub factory_scenario: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("executable path has no installation prefix above it: {0}")]
    ExeHasNoPrefix(PathBuf),
    #[error("{var} is set but does not point to a directory: {path}")]
    InvalidEnvPrefix { var: &'static str, path: PathBuf },
    #[error("installation prefix is not valid UTF-8: {0}")]
    NonUtf8Prefix(PathBuf),
}

impl PathConfig {
    /// Lays out every path below `prefix`, probing once for an installed game
    /// binary to pick the run mode.
    pub fn for_prefix(prefix: &Path) -> Result<Self, StartupError> {
        if prefix.to_str().is_none() {
            return Err(StartupError::NonUtf8Prefix(prefix.to_path_buf()));
        }

        let installed_bin_dir = prefix.join("games");
        if installed_bin_dir.join(GAME_BIN_NAME).exists() {
            Ok(Self::installed(prefix, installed_bin_dir))
        } else {
            Ok(Self::build_tree(prefix))
        }
    }

    fn installed(prefix: &Path, bin_dir: PathBuf) -> Self {
        let share = prefix.join("share");
        Self {
            run_mode: RunMode::Installed,
            prefix: prefix.to_path_buf(),
            game_bin: bin_dir.join(GAME_BIN_NAME),
            installer_bin: bin_dir.join(INSTALLER_BIN_NAME),
            lister_bin: bin_dir.join(LISTER_BIN_NAME),
            bin_dir,
            scenarios_dir: share.join("games").join("antares").join("scenarios"),
            data_dir: None,
            icon: share
                .join("icons")
                .join("hicolor")
                .join("128x128")
                .join("apps")
                .join("antares.png"),
            app_data: None,
            factory_scenario: None,
        }
    }

    fn build_tree(prefix: &Path) -> Self {
        let bin_dir = prefix.join("out").join("cur");
        let data_dir = prefix.join("resources");
        let app_data = prefix.join("data");
        let scenarios_dir = app_data.join("scenarios");
        Self {
            run_mode: RunMode::BuildTree,
            prefix: prefix.to_path_buf(),
            game_bin: bin_dir.join(GAME_BIN_NAME),
            installer_bin: bin_dir.join(INSTALLER_BIN_NAME),
            lister_bin: bin_dir.join(LISTER_BIN_NAME),
            bin_dir,
            factory_scenario: Some(scenarios_dir.join(FACTORY_SCENARIO_ID)),
            scenarios_dir,
            icon: data_dir.join("antares.iconset").join("icon_128x128.png"),
            data_dir: Some(data_dir),
            app_data: Some(app_data),
        }
    }
}

pub fn resolve_path_config() -> Result<PathConfig, StartupError> {
    let prefix = resolve_prefix()?;
    PathConfig::for_prefix(&prefix)
}

fn resolve_prefix() -> Result<PathBuf, StartupError> {
    match env::var(PREFIX_ENV_VAR) {
        Ok(value) => {
            let normalized = normalize_path(Path::new(&value));
            if normalized.is_dir() {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvPrefix {
                    var: PREFIX_ENV_VAR,
                    path: normalized,
                })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            prefix_above_executable(&normalize_path(&exe))
        }
        Err(source) => Err(StartupError::EnvVar {
            var: PREFIX_ENV_VAR,
            source,
        }),
    }
}

// <prefix>/<bin dir>/<launcher>
fn prefix_above_executable(exe: &Path) -> Result<PathBuf, StartupError> {
    exe.parent()
        .and_then(Path::parent)
        .filter(|prefix| !prefix.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| StartupError::ExeHasNoPrefix(exe.to_path_buf()))
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_installed_binary_means_build_tree() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();

        let paths = PathConfig::for_prefix(root).expect("paths");
        assert_eq!(paths.run_mode, RunMode::BuildTree);
        assert_eq!(paths.bin_dir, root.join("out").join("cur"));
        assert_eq!(paths.game_bin, root.join("out").join("cur").join(GAME_BIN_NAME));
        assert_eq!(paths.app_data, Some(root.join("data")));
        assert_eq!(paths.scenarios_dir, root.join("data").join("scenarios"));
        assert_eq!(
            paths.factory_scenario,
            Some(root.join("data").join("scenarios").join(FACTORY_SCENARIO_ID))
        );
        assert_eq!(paths.data_dir, Some(root.join("resources")));
    }

    #[test]
    fn installed_binary_selects_installed_layout() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("games")).expect("create games");
        fs::write(root.join("games").join(GAME_BIN_NAME), b"").expect("write game bin");

        let paths = PathConfig::for_prefix(root).expect("paths");
        assert_eq!(paths.run_mode, RunMode::Installed);
        assert_eq!(paths.lister_bin, root.join("games").join(LISTER_BIN_NAME));
        assert_eq!(paths.installer_bin, root.join("games").join(INSTALLER_BIN_NAME));
        assert_eq!(
            paths.scenarios_dir,
            root.join("share").join("games").join("antares").join("scenarios")
        );
        assert_eq!(paths.app_data, None);
        assert_eq!(paths.factory_scenario, None);
        assert_eq!(paths.data_dir, None);
    }

    #[test]
    fn prefix_is_two_levels_above_executable() {
        let exe = Path::new("/opt/antares/bin/antares-launcher");
        assert_eq!(
            prefix_above_executable(exe).expect("prefix"),
            PathBuf::from("/opt/antares")
        );
        assert!(matches!(
            prefix_above_executable(Path::new("antares-launcher")),
            Err(StartupError::ExeHasNoPrefix(_))
        ));
    }
}
