use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScenarioChoice {
    First,
    Id(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchOptions {
    pub(crate) choice: ScenarioChoice,
    pub(crate) list: bool,
    pub(crate) json: bool,
    pub(crate) dry_run: bool,
    pub(crate) config_path: Option<PathBuf>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            choice: ScenarioChoice::First,
            list: false,
            json: false,
            dry_run: false,
            config_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    Help,
    Run(LaunchOptions),
}

pub(crate) fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut options = LaunchOptions::default();
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "--scenario" => {
                let value = option_value(args, index, "--scenario")?;
                ensure_single_choice(&options.choice)?;
                options.choice = ScenarioChoice::Id(value.to_string());
                index += 2;
            }
            "--index" => {
                let value = option_value(args, index, "--index")?;
                ensure_single_choice(&options.choice)?;
                let parsed = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --index value '{value}' (expected usize)"))?;
                options.choice = ScenarioChoice::Index(parsed);
                index += 2;
            }
            "--config" => {
                let value = option_value(args, index, "--config")?;
                options.config_path = Some(PathBuf::from(value));
                index += 2;
            }
            "--list" => {
                options.list = true;
                index += 1;
            }
            "--json" => {
                options.json = true;
                index += 1;
            }
            "--dry-run" => {
                options.dry_run = true;
                index += 1;
            }
            other => return Err(format!("unknown argument '{other}'\n\n{}", usage_text())),
        }
    }

    if options.json && !options.list {
        return Err("--json only applies to --list".to_string());
    }
    Ok(CliCommand::Run(options))
}

fn option_value<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a str, String> {
    args.get(index + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn ensure_single_choice(current: &ScenarioChoice) -> Result<(), String> {
    if *current == ScenarioChoice::First {
        Ok(())
    } else {
        Err("--scenario and --index may be given only once, and not together".to_string())
    }
}

pub(crate) fn usage_text() -> String {
    [
        "antares-launcher - install or check scenarios, then start the game",
        "",
        "Usage:",
        "  antares-launcher [--config <file>] [--scenario <id> | --index <n>] [--dry-run]",
        "  antares-launcher [--config <file>] --list [--json]",
        "",
        "Defaults:",
        "  the first listed scenario is launched",
        "",
        "Environment:",
        "  ANTARES_PREFIX           installation or source tree root",
        "  ANTARES_LAUNCHER_CONFIG  JSON file with path overrides",
        "  RUST_LOG                 log filter (default: info)",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn no_arguments_launch_first_scenario() {
        assert_eq!(
            parse_args(&[]),
            Ok(CliCommand::Run(LaunchOptions::default()))
        );
    }

    #[test]
    fn parses_scenario_and_dry_run() {
        let parsed = parse_args(&args(&["--scenario", "com.biggerplanet.ares", "--dry-run"]));
        assert_eq!(
            parsed,
            Ok(CliCommand::Run(LaunchOptions {
                choice: ScenarioChoice::Id("com.biggerplanet.ares".to_string()),
                dry_run: true,
                ..LaunchOptions::default()
            }))
        );
    }

    #[test]
    fn parses_list_json_and_config() {
        let parsed = parse_args(&args(&["--config", "launcher.json", "--list", "--json"]));
        assert_eq!(
            parsed,
            Ok(CliCommand::Run(LaunchOptions {
                list: true,
                json: true,
                config_path: Some(PathBuf::from("launcher.json")),
                ..LaunchOptions::default()
            }))
        );
    }

    #[test]
    fn help_wins_over_other_flags() {
        assert_eq!(parse_args(&args(&["--list", "-h"])), Ok(CliCommand::Help));
    }

    #[test]
    fn rejects_bad_index_and_missing_values() {
        assert_eq!(
            parse_args(&args(&["--index", "two"])),
            Err("invalid --index value 'two' (expected usize)".to_string())
        );
        assert_eq!(
            parse_args(&args(&["--scenario"])),
            Err("missing value for --scenario".to_string())
        );
    }

    #[test]
    fn rejects_conflicting_choices() {
        assert!(parse_args(&args(&["--scenario", "a", "--index", "1"])).is_err());
    }

    #[test]
    fn json_requires_list() {
        assert!(parse_args(&args(&["--json"])).is_err());
    }
}
