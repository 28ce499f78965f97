pub(crate) mod bootstrap;
mod cli;
mod config;
pub(crate) mod runner;
mod shell;

use std::io;

use launch_core::{LaunchError, ProcessError, RunError, StartupError};
use thiserror::Error;

use self::config::ConfigError;

#[derive(Debug, Error)]
pub(crate) enum LauncherError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("failed to encode catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),
}
