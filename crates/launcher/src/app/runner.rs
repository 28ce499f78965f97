use std::io::{self, Write};
use std::process::ExitCode;

use launch_core::{
    replace_process, run_startup, LaunchOrchestrator, PathConfig, ProcessError, ProcessRunner,
    ShellOutcome, SystemProcessRunner,
};
use tracing::error;

use super::bootstrap::AppWiring;
use super::cli::LaunchOptions;
use super::shell::{render_catalog_json, render_catalog_text, FlagShell};
use super::LauncherError;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let mut runner = SystemProcessRunner;
    let result = run_launcher(
        app.paths,
        &app.options,
        &mut runner,
        &mut io::stdout().lock(),
        replace_process,
    );
    if let Err(err) = result {
        error!(error = %err, "launcher_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Startup, shell events, then launch. `exec` only returns when process
/// replacement failed.
fn run_launcher<R, W, E>(
    paths: PathConfig,
    options: &LaunchOptions,
    runner: &mut R,
    stdout: &mut W,
    exec: E,
) -> Result<(), LauncherError>
where
    R: ProcessRunner,
    W: Write,
    E: FnOnce(&[String]) -> ProcessError,
{
    let mut orchestrator = run_startup(paths, runner)?;
    if options.list {
        print_catalog(&orchestrator, options.json, stdout)?;
    }

    let events = FlagShell::new(options).events();
    for event in events {
        match orchestrator.handle_event(event)? {
            ShellOutcome::Continue => {}
            ShellOutcome::Quit => return Ok(()),
            ShellOutcome::Launch(argv) => {
                if options.dry_run {
                    writeln!(stdout, "{}", argv.join(" ")).map_err(LauncherError::Stdout)?;
                    return Ok(());
                }
                return Err(exec(argv.as_slice()).into());
            }
        }
    }
    Ok(())
}

fn print_catalog<W: Write>(
    orchestrator: &LaunchOrchestrator,
    json: bool,
    stdout: &mut W,
) -> Result<(), LauncherError> {
    let rendered = if json {
        let mut text = render_catalog_json(orchestrator.catalog())?;
        text.push('\n');
        text
    } else {
        render_catalog_text(orchestrator.catalog(), orchestrator.selected_index())
    };
    stdout
        .write_all(rendered.as_bytes())
        .map_err(LauncherError::Stdout)
}
