use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cannot run a process from an empty argument vector")]
    EmptyArgv,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with status {code}")]
    NonZeroExit { program: String, code: i32 },
    #[error("{program} was terminated before it could exit")]
    Terminated { program: String },
    #[error("{program} printed output that is not UTF-8: {source}")]
    InvalidUtf8 {
        program: String,
        #[source]
        source: FromUtf8Error,
    },
    #[error("failed to replace the launcher with {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Blocking execution of the installer and lister. No timeouts.
pub trait ProcessRunner {
    /// Runs `argv` with inherited stdio and requires a zero exit status.
    fn run_checked(&mut self, argv: &[String]) -> Result<(), ProcessError>;

    /// Runs `argv`, requires a zero exit status and returns its stdout.
    fn capture_stdout(&mut self, argv: &[String]) -> Result<String, ProcessError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run_checked(&mut self, argv: &[String]) -> Result<(), ProcessError> {
        let (program, mut command) = command_for(argv)?;
        let status = command.status().map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;
        check_status(program, status)
    }

    fn capture_stdout(&mut self, argv: &[String]) -> Result<String, ProcessError> {
        let (program, mut command) = command_for(argv)?;
        let output = command
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ProcessError::Spawn {
                program: program.clone(),
                source,
            })?;
        check_status(program, output.status)?;
        String::from_utf8(output.stdout).map_err(|source| ProcessError::InvalidUtf8 {
            program: program.clone(),
            source,
        })
    }
}

/// Replaces the current process image with `argv`. Only returns on failure.
#[cfg(unix)]
pub fn replace_process(argv: &[String]) -> ProcessError {
    use std::os::unix::process::CommandExt;

    let (program, mut command) = match command_for(argv) {
        Ok(parts) => parts,
        Err(error) => return error,
    };
    let source = command.exec();
    ProcessError::Exec {
        program: program.clone(),
        source,
    }
}

/// Without `exec`, the game runs as a child and the launcher exits with its status.
#[cfg(not(unix))]
pub fn replace_process(argv: &[String]) -> ProcessError {
    let (program, mut command) = match command_for(argv) {
        Ok(parts) => parts,
        Err(error) => return error,
    };
    match command.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => ProcessError::Exec {
            program: program.clone(),
            source,
        },
    }
}

fn command_for(argv: &[String]) -> Result<(&String, Command), ProcessError> {
    let (program, args) = argv.split_first().ok_or(ProcessError::EmptyArgv)?;
    let mut command = Command::new(program);
    command.args(args);
    Ok((program, command))
}

fn check_status(program: &str, status: ExitStatus) -> Result<(), ProcessError> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(ProcessError::NonZeroExit {
            program: program.to_string(),
            code,
        }),
        None => Err(ProcessError::Terminated {
            program: program.to_string(),
        }),
    }
}
