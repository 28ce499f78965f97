use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, ScenarioRecord};
use crate::{PathConfig, RunMode};

const APP_DATA_FLAG: &str = "--app-data";
const FACTORY_SCENARIO_FLAG: &str = "--factory-scenario";
const DEST_FLAG: &str = "--dest";
const CHECK_FLAG: &str = "--check";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    Reinstall,
    CheckOnly,
}

pub fn decide_install_action(run_mode: RunMode) -> InstallAction {
    match run_mode {
        RunMode::BuildTree => InstallAction::Reinstall,
        RunMode::Installed => InstallAction::CheckOnly,
    }
}

/// Lifecycle of one launcher run. `Launching` and `Quit` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    ModeResolved,
    InstallerRun,
    CatalogLoaded,
    SelectionChanged,
    Launching,
    Quit,
}

impl LaunchState {
    fn is_terminal(self) -> bool {
        matches!(self, Self::Launching | Self::Quit)
    }

    fn has_catalog(self) -> bool {
        matches!(self, Self::CatalogLoaded | Self::SelectionChanged)
    }
}

/// What a presentation shell reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    SelectionChanged(usize),
    ScenarioChosen(String),
    Launch,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Continue,
    /// Argument vector to hand to process replacement.
    Launch(Vec<String>),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("scenario index {index} is out of range for a catalog of {len} scenarios")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no scenario is selected")]
    NoSelection,
    #[error("unknown scenario id: {id}")]
    UnknownScenario { id: String },
    #[error("cannot {action} while the launcher is in state {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: LaunchState,
    },
    #[error("launcher run already finished in state {state:?}")]
    AlreadyFinished { state: LaunchState },
}

#[derive(Debug)]
pub struct LaunchOrchestrator {
    paths: PathConfig,
    catalog: Catalog,
    selection: Option<usize>,
    state: LaunchState,
}

impl LaunchOrchestrator {
    pub fn new(paths: PathConfig) -> Self {
        Self {
            paths,
            catalog: Catalog::default(),
            selection: None,
            state: LaunchState::ModeResolved,
        }
    }

    pub fn run_mode(&self) -> RunMode {
        self.paths.run_mode
    }

    pub fn paths(&self) -> &PathConfig {
        &self.paths
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected(&self) -> Option<&ScenarioRecord> {
        self.selection.and_then(|index| self.catalog.get(index))
    }

    pub fn decide_install_action(&self) -> InstallAction {
        decide_install_action(self.paths.run_mode)
    }

    pub fn record_installer_run(&mut self) -> Result<(), LaunchError> {
        self.expect_state(LaunchState::ModeResolved, "record the installer run")?;
        self.state = LaunchState::InstallerRun;
        Ok(())
    }

    /// Takes ownership of the catalog and selects its first scenario, if any.
    pub fn load_catalog(&mut self, catalog: Catalog) -> Result<(), LaunchError> {
        self.expect_state(LaunchState::InstallerRun, "load the catalog")?;
        self.selection = if catalog.is_empty() { None } else { Some(0) };
        self.catalog = catalog;
        self.state = LaunchState::CatalogLoaded;
        info!(scenario_count = self.catalog.len(), "catalog_loaded");
        Ok(())
    }

    pub fn select_by_index(&mut self, index: usize) -> Result<(), LaunchError> {
        self.expect_catalog("change the selection")?;
        let record = self
            .catalog
            .get(index)
            .ok_or(LaunchError::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            })?;
        info!(scenario_id = %record.id(), index, "scenario_selected");
        self.selection = Some(index);
        self.state = LaunchState::SelectionChanged;
        Ok(())
    }

    pub fn select_by_id(&mut self, id: &str) -> Result<(), LaunchError> {
        self.expect_catalog("change the selection")?;
        let index = self
            .catalog
            .position_of(id)
            .ok_or_else(|| LaunchError::UnknownScenario { id: id.to_string() })?;
        self.select_by_index(index)
    }

    pub fn handle_event(&mut self, event: ShellEvent) -> Result<ShellOutcome, LaunchError> {
        match event {
            ShellEvent::SelectionChanged(index) => {
                self.select_by_index(index)?;
                Ok(ShellOutcome::Continue)
            }
            ShellEvent::ScenarioChosen(id) => {
                self.select_by_id(&id)?;
                Ok(ShellOutcome::Continue)
            }
            ShellEvent::Launch => {
                let args = self.build_launch_args()?;
                info!(command = %args.join(" "), "launching");
                self.state = LaunchState::Launching;
                Ok(ShellOutcome::Launch(args))
            }
            ShellEvent::Quit => {
                self.expect_catalog("quit")?;
                info!("launcher_quit");
                self.state = LaunchState::Quit;
                Ok(ShellOutcome::Quit)
            }
        }
    }

    /// `[game, id, (--app-data <dir>)?, (--factory-scenario <dir>)?]`
    pub fn build_launch_args(&self) -> Result<Vec<String>, LaunchError> {
        self.expect_catalog("build the launch arguments")?;
        let selected = self.selected().ok_or(LaunchError::NoSelection)?;
        let mut args = vec![path_arg(&self.paths.game_bin), selected.id().to_string()];
        if let Some(app_data) = &self.paths.app_data {
            args.push(APP_DATA_FLAG.to_string());
            args.push(path_arg(app_data));
        }
        if let Some(factory_scenario) = &self.paths.factory_scenario {
            args.push(FACTORY_SCENARIO_FLAG.to_string());
            args.push(path_arg(factory_scenario));
        }
        Ok(args)
    }

    pub fn build_installer_args(&self) -> Vec<String> {
        let mut args = vec![
            path_arg(&self.paths.installer_bin),
            DEST_FLAG.to_string(),
            path_arg(&self.paths.scenarios_dir),
        ];
        if self.decide_install_action() == InstallAction::CheckOnly {
            args.push(CHECK_FLAG.to_string());
        }
        args
    }

    pub fn build_lister_args(&self) -> Vec<String> {
        let mut args = vec![path_arg(&self.paths.lister_bin)];
        if self.paths.run_mode == RunMode::BuildTree {
            if let Some(factory_scenario) = &self.paths.factory_scenario {
                args.push(FACTORY_SCENARIO_FLAG.to_string());
                args.push(path_arg(factory_scenario));
            }
        }
        args
    }

    fn expect_state(&self, expected: LaunchState, action: &'static str) -> Result<(), LaunchError> {
        if self.state == expected {
            return Ok(());
        }
        Err(self.transition_error(action))
    }

    fn expect_catalog(&self, action: &'static str) -> Result<(), LaunchError> {
        if self.state.has_catalog() {
            return Ok(());
        }
        Err(self.transition_error(action))
    }

    fn transition_error(&self, action: &'static str) -> LaunchError {
        if self.state.is_terminal() {
            LaunchError::AlreadyFinished { state: self.state }
        } else {
            LaunchError::InvalidTransition {
                action,
                state: self.state,
            }
        }
    }
}

// Non-UTF-8 components are replaced with U+FFFD.
fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
