use thiserror::Error;
use tracing::info;

use crate::catalog::{parse_catalog, CatalogError};
use crate::PathConfig;

use super::orchestrator::{LaunchError, LaunchOrchestrator};
use super::process::{ProcessError, ProcessRunner};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Installs or checks content, lists scenarios and returns an orchestrator
/// holding the parsed catalog. Any failure ends the run.
pub fn run_startup<R>(paths: PathConfig, runner: &mut R) -> Result<LaunchOrchestrator, RunError>
where
    R: ProcessRunner + ?Sized,
{
    let mut orchestrator = LaunchOrchestrator::new(paths);
    info!(run_mode = ?orchestrator.run_mode(), "mode_resolved");

    let installer_args = orchestrator.build_installer_args();
    info!(
        action = ?orchestrator.decide_install_action(),
        command = %installer_args.join(" "),
        "installer_invoked"
    );
    runner.run_checked(&installer_args)?;
    orchestrator.record_installer_run()?;

    let lister_args = orchestrator.build_lister_args();
    info!(command = %lister_args.join(" "), "lister_invoked");
    let listing = runner.capture_stdout(&lister_args)?;
    let catalog = parse_catalog(&listing)?;
    orchestrator.load_catalog(catalog)?;

    Ok(orchestrator)
}
