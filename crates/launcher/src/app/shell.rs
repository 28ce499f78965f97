use launch_core::{Catalog, ShellEvent};

use super::cli::{LaunchOptions, ScenarioChoice};

/// Non-graphical selector: turns command-line choices into the events a
/// dialog would emit.
pub(crate) struct FlagShell<'a> {
    options: &'a LaunchOptions,
}

impl<'a> FlagShell<'a> {
    pub(crate) fn new(options: &'a LaunchOptions) -> Self {
        Self { options }
    }

    /// Selections are validated by the orchestrator when the events are handled.
    pub(crate) fn events(&self) -> Vec<ShellEvent> {
        if self.options.list {
            return vec![ShellEvent::Quit];
        }

        let mut events = Vec::new();
        match &self.options.choice {
            ScenarioChoice::First => {}
            ScenarioChoice::Index(index) => events.push(ShellEvent::SelectionChanged(*index)),
            ScenarioChoice::Id(id) => events.push(ShellEvent::ScenarioChosen(id.clone())),
        }
        events.push(ShellEvent::Launch);
        events
    }
}

pub(crate) fn render_catalog_text(catalog: &Catalog, selected: Option<usize>) -> String {
    let mut output = String::new();
    for (index, record) in catalog.iter().enumerate() {
        let marker = if Some(index) == selected { '*' } else { ' ' };
        output.push_str(&format!(
            "{marker} {index} {} title={:?} version={} author={}",
            record.id(),
            record.display_title(),
            record.version().unwrap_or("-"),
            record.author().unwrap_or("-"),
        ));
        if let Some(url) = record.download_url() {
            output.push_str(&format!(" download={url}"));
        }
        output.push('\n');
    }
    output
}

pub(crate) fn render_catalog_json(catalog: &Catalog) -> serde_json::Result<String> {
    serde_json::to_string_pretty(catalog)
}

#[cfg(test)]
mod tests {
    use launch_core::parse_catalog;

    use super::*;

    fn catalog() -> Catalog {
        parse_catalog(
            "com.biggerplanet.ares:\n  title: Ares\n  version: 1.2.0\n  author: Bigger Planet\nx:\n",
        )
        .expect("parse")
    }

    #[test]
    fn default_choice_launches_directly() {
        let options = LaunchOptions::default();
        assert_eq!(
            FlagShell::new(&options).events(),
            vec![ShellEvent::Launch]
        );
    }

    #[test]
    fn scenario_id_is_forwarded_to_orchestrator() {
        let options = LaunchOptions {
            choice: ScenarioChoice::Id("x".to_string()),
            ..LaunchOptions::default()
        };
        assert_eq!(
            FlagShell::new(&options).events(),
            vec![
                ShellEvent::ScenarioChosen("x".to_string()),
                ShellEvent::Launch
            ]
        );
    }

    #[test]
    fn index_is_passed_through_unchecked() {
        let options = LaunchOptions {
            choice: ScenarioChoice::Index(9),
            ..LaunchOptions::default()
        };
        assert_eq!(
            FlagShell::new(&options).events(),
            vec![ShellEvent::SelectionChanged(9), ShellEvent::Launch]
        );
    }

    #[test]
    fn listing_quits() {
        let options = LaunchOptions {
            list: true,
            ..LaunchOptions::default()
        };
        assert_eq!(
            FlagShell::new(&options).events(),
            vec![ShellEvent::Quit]
        );
    }

    #[test]
    fn text_listing_marks_selection() {
        let text = render_catalog_text(&catalog(), Some(0));
        assert_eq!(
            text,
            "* 0 com.biggerplanet.ares title=\"Ares\" version=1.2.0 author=Bigger Planet\n  1 x title=\"x\" version=- author=-\n"
        );
    }
}
