//! Command-line options, parsed by hand.
//!
//! Defaults can come from the environment (`FLIGHTDECK_STRATEGY`,
//! `FLIGHTDECK_PAGE_SIZE`); explicit flags win over both.

use flightdeck_data::PAGE_SIZE;

use crate::strategies::StrategyId;

/// Usage text for `--help` and parse errors.
pub const USAGE: &str = "\
flightdeck-demo: one paginated flight list rendered three ways

USAGE:
  flightdeck-demo [OPTIONS]

OPTIONS:
  --strategy <list|stack|table>  Initial strategy (default: list)
  --page-size <N>                Records per generated page (default: 10000)
  --mouse                        Capture mouse wheel scrolling
  -h, --help                     Print this help
  -V, --version                  Print the version

ENVIRONMENT:
  FLIGHTDECK_STRATEGY   Default for --strategy
  FLIGHTDECK_PAGE_SIZE  Default for --page-size
  FLIGHTDECK_LOG        Tracing filter (e.g. debug); logging is off without it
  FLIGHTDECK_LOG_FILE   Log destination (default: flightdeck.log)

KEYS:
  l/s/t switch strategy   r reload   e/End scroll to end
  d delete selected       q/Esc quit";

/// Parsed run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Strategy shown at startup.
    pub strategy: StrategyId,
    /// Records per generated page.
    pub page_size: usize,
    /// Capture mouse input.
    pub mouse: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            strategy: StrategyId::List,
            page_size: PAGE_SIZE,
            mouse: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    /// Run the demo.
    Run(Opts),
    /// Print usage and exit.
    Help,
    /// Print the version and exit.
    Version,
}

/// Parse arguments (without the program name) on top of environment defaults.
pub fn parse<I>(args: I) -> Result<Parsed, String>
where
    I: IntoIterator<Item = String>,
{
    parse_from(args, env_defaults()?)
}

/// Parse arguments on top of explicit defaults.
pub fn parse_from<I>(args: I, defaults: Opts) -> Result<Parsed, String>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = defaults;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Parsed::Help),
            "-V" | "--version" => return Ok(Parsed::Version),
            "--mouse" => opts.mouse = true,
            "--strategy" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--strategy requires a value".to_string())?;
                opts.strategy = parse_strategy(&value)?;
            }
            "--page-size" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--page-size requires a value".to_string())?;
                opts.page_size = parse_page_size(&value)?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(Parsed::Run(opts))
}

fn env_defaults() -> Result<Opts, String> {
    let mut opts = Opts::default();
    if let Ok(value) = std::env::var("FLIGHTDECK_STRATEGY") {
        opts.strategy = parse_strategy(&value)?;
    }
    if let Ok(value) = std::env::var("FLIGHTDECK_PAGE_SIZE") {
        opts.page_size = parse_page_size(&value)?;
    }
    Ok(opts)
}

fn parse_strategy(value: &str) -> Result<StrategyId, String> {
    match value {
        "list" => Ok(StrategyId::List),
        "stack" => Ok(StrategyId::Stack),
        "table" => Ok(StrategyId::Table),
        other => Err(format!("unknown strategy: {other} (expected list, stack or table)")),
    }
}

fn parse_page_size(value: &str) -> Result<usize, String> {
    let size = value
        .parse::<usize>()
        .map_err(|_| format!("invalid page size: {value}"))?;
    if size == 0 {
        return Err("page size must be at least 1".into());
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(args: &[&str]) -> Result<Parsed, String> {
        parse_from(args.iter().map(|s| (*s).to_string()), Opts::default())
    }

    #[test]
    fn no_args_runs_with_defaults() {
        assert_eq!(parsed(&[]), Ok(Parsed::Run(Opts::default())));
    }

    #[test]
    fn all_options_together() {
        let result = parsed(&["--strategy", "table", "--page-size", "500", "--mouse"]);
        assert_eq!(
            result,
            Ok(Parsed::Run(Opts {
                strategy: StrategyId::Table,
                page_size: 500,
                mouse: true,
            }))
        );
    }

    #[test]
    fn flags_override_environment_defaults() {
        let from_env = Opts {
            strategy: StrategyId::Stack,
            page_size: 64,
            mouse: false,
        };
        let result = parse_from(
            ["--strategy".to_string(), "table".to_string()],
            from_env.clone(),
        );
        assert_eq!(
            result,
            Ok(Parsed::Run(Opts {
                strategy: StrategyId::Table,
                ..from_env
            }))
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parsed(&["--help", "--bogus"]), Ok(Parsed::Help));
        assert_eq!(parsed(&["-V"]), Ok(Parsed::Version));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parsed(&["--strategy"]).is_err());
        assert!(parsed(&["--strategy", "grid"]).is_err());
        assert!(parsed(&["--page-size", "zero"]).is_err());
        assert!(parsed(&["--page-size", "0"]).is_err());
        assert!(parsed(&["--frobnicate"]).is_err());
    }
}
