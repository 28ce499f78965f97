use std::env;

use launch_core::PathConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::cli::{parse_args, usage_text, CliCommand, LaunchOptions};
use super::config::{config_path, load_config, resolve_paths, LauncherConfig};
use super::LauncherError;

pub(crate) struct AppWiring {
    pub(crate) options: LaunchOptions,
    pub(crate) paths: PathConfig,
}

/// `Ok(None)` means help was printed and there is nothing to run.
pub(crate) fn build_app() -> Result<Option<AppWiring>, LauncherError> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let options = match parse_args(&args).map_err(LauncherError::Usage)? {
        CliCommand::Help => {
            println!("{}", usage_text());
            return Ok(None);
        }
        CliCommand::Run(options) => options,
    };

    init_tracing();
    info!("=== Antares Launcher Startup ===");

    let config = match config_path(options.config_path.as_deref()) {
        Some(path) => {
            let config = load_config(&path)?;
            info!(path = %path.display(), "launcher_config_loaded");
            config
        }
        None => LauncherConfig::default(),
    };
    let paths = resolve_paths(&config)?;
    info!(
        run_mode = ?paths.run_mode,
        prefix = %paths.prefix.display(),
        scenarios_dir = %paths.scenarios_dir.display(),
        "paths_resolved"
    );

    Ok(Some(AppWiring { options, paths }))
}

// Logs go to stderr; stdout is reserved for listings.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
