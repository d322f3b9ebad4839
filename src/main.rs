//! linewrap - reflow text to a fixed line width

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Read, Write};
use std::path::PathBuf;

use linewrap::process::{fill_paragraphs, reflow_lines};
use linewrap::wrap;
use linewrap::{parse_args, CliArgs, Config, Result};
use terminal_size::terminal_size;

/// Width used when the terminal size cannot be determined
const FALLBACK_WIDTH: usize = 80;

fn main() -> Result<()> {
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    let config = build_config(&args)?;
    let width = resolve_width(&config);

    let stdout = io::stdout();
    let mut writer = wrap::Writer::new(stdout.lock(), width, &config.prefix)?;

    if use_stdin {
        process_reader(io::stdin().lock(), &mut writer, config.fill)
    } else {
        process_files(&args.inputs, &mut writer, config.fill)
    }
}

/// Build configuration from CLI args and optional config file
fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        Config::from_toml_file(config_path)?
    } else {
        Config::from_discovery(args.silent)
    };

    config.merge_cli_args(args);

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Resolve the output width: an explicit config value wins; otherwise the
/// terminal width is detected, reserving one column for the newline
/// character so terminal output does not stutter.
fn resolve_width(config: &Config) -> usize {
    if config.width != 0 {
        return config.width;
    }

    let columns = terminal_size().map_or(FALLBACK_WIDTH, |(w, _)| usize::from(w.0));
    columns.saturating_sub(1)
}

/// Reflow one input stream through the wrapping writer
fn process_reader<R: BufRead>(
    mut reader: R,
    writer: &mut wrap::Writer<impl Write>,
    fill: bool,
) -> Result<()> {
    if fill {
        // Fill mode needs the whole text to find paragraph boundaries
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        fill_paragraphs(&text, writer)
    } else {
        reflow_lines(reader, writer)
    }
}

/// Reflow the named files, concatenated in order, through one writer
fn process_files(
    inputs: &[PathBuf],
    writer: &mut wrap::Writer<impl Write>,
    fill: bool,
) -> Result<()> {
    if fill {
        // Concatenate everything so a paragraph may span a file boundary
        let mut text = String::new();
        for path in inputs {
            let mut file = File::open(path)
                .map_err(|err| anyhow::anyhow!("cannot open {}: {err}", path.display()))?;
            file.read_to_string(&mut text)?;
        }
        return fill_paragraphs(&text, writer);
    }

    for path in inputs {
        let file = File::open(path)
            .map_err(|err| anyhow::anyhow!("cannot open {}: {err}", path.display()))?;
        reflow_lines(BufReader::new(file), writer)?;
    }
    Ok(())
}

/// Print usage when invoked interactively with no inputs
fn print_usage() {
    let _ = linewrap::build_cli().print_help();
}
