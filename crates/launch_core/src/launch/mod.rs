mod orchestrator;
mod process;
mod startup;

pub use orchestrator::{
    decide_install_action, InstallAction, LaunchError, LaunchOrchestrator, LaunchState,
    ShellEvent, ShellOutcome,
};
pub use process::{replace_process, ProcessError, ProcessRunner, SystemProcessRunner};
pub use startup::{run_startup, RunError};
