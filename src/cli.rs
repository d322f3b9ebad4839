//! Command-line interface for linewrap.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files to reflow (standard input when empty or "-")
    pub inputs: Vec<PathBuf>,

    /// Output width in columns (0 = detect terminal width)
    pub width: Option<usize>,

    /// String emitted at the start of every output line
    pub prefix: Option<String>,

    /// Reflow blank-line-separated paragraphs instead of individual lines
    pub fill: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Silent mode (suppress warnings)
    pub silent: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("linewrap")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Fred Jones")
        .about("Reflow text to a fixed line width, with an optional per-line prefix")
        .arg(
            Arg::new("inputs")
                .help("Files to reflow (standard input when omitted or \"-\")")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .help("Output width in columns; 0 detects the terminal width [default: 0]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("prefix")
                .short('p')
                .long("prefix")
                .help("String emitted at the start of every output line (e.g. \"> \")")
                .value_name("STR"),
        )
        .arg(
            Arg::new("fill")
                .short('F')
                .long("fill")
                .help("Reflow paragraphs separated by blank lines instead of individual lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (suppress warnings)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        width: matches.get_one::<usize>("width").copied(),
        prefix: matches.get_one::<String>("prefix").cloned(),
        fill: matches.get_flag("fill"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        silent: matches.get_flag("silent"),
    }
}
