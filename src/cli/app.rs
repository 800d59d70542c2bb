//! Main CLI application

use crate::config::{load_config, validate_config, HelpConfig};
use crate::formatter::{PlaceholderMode, RenderContext};
use crate::parser::ParserDefinition;
use crate::theme::{builtin_theme_names, OutputFormat};
use anyhow::{Context as _, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "RICHHELP_LOG";

/// When ANSI escapes are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn from_matches(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("color").map(String::as_str) {
            Some("always") => ColorChoice::Always,
            Some("never") => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }

    /// Force or release colored's terminal detection
    fn apply(self) {
        match self {
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
            ColorChoice::Auto => colored::control::unset_override(),
        }
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("richhelp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render colorful, column-aligned help for a parser definition")
        .arg(
            Arg::new("parser")
                .value_name("PARSER_FILE")
                .help("YAML parser definition to render")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present("list-themes"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to richhelp.yml (searched for when omitted)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .value_name("COLUMNS")
                .help("Total line width")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("theme")
                .short('t')
                .long("theme")
                .value_name("NAME")
                .help("Built-in theme (see --list-themes)"),
        )
        .arg(
            Arg::new("prog")
                .long("prog")
                .value_name("NAME")
                .help("Program name, overriding the definition"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format; html when --output ends in .html, ansi otherwise")
                .value_parser(["plain", "ansi", "html"]),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .help("When to write ANSI colors")
                .value_parser(["auto", "always", "never"])
                .default_value("auto"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on help placeholders that cannot be expanded")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the rendered help to a file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("list-themes")
                .long("list-themes")
                .help("List built-in themes and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log what richhelp is doing")
                .action(ArgAction::SetTrue),
        )
}

/// Install the stderr log subscriber.
///
/// `-v` forces debug output; otherwise `RICHHELP_LOG` is honored and
/// warnings are the default.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Output format from `--format`, else guessed from the output file name
fn output_format(matches: &ArgMatches) -> Result<OutputFormat> {
    if let Some(format) = matches.get_one::<String>("format") {
        return format.parse().map_err(anyhow::Error::msg);
    }

    let is_html = matches
        .get_one::<PathBuf>("output")
        .and_then(|path| path.extension())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false);

    Ok(if is_html {
        OutputFormat::Html
    } else {
        OutputFormat::Ansi
    })
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut HelpConfig, matches: &ArgMatches) {
    if let Some(width) = matches.get_one::<usize>("width") {
        config.width = Some(*width);
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        config.theme = theme.clone();
    }
    if matches.get_flag("strict") {
        config.placeholders = PlaceholderMode::Strict;
    }
}

fn list_themes() {
    for name in builtin_theme_names() {
        println!("{}", name);
    }
}

/// Render the help of one parser definition
fn render(matches: &ArgMatches, path: &Path) -> Result<String> {
    let config_path = matches.get_one::<PathBuf>("config");
    let (mut config, found) =
        load_config(config_path.map(PathBuf::as_path)).context("Failed to load configuration")?;
    if let Some(found) = &found {
        debug!(path = %found.display(), "using config");
    }

    apply_overrides(&mut config, matches);
    validate_config(&config)?;
    let context = RenderContext::from_config(&config)?;

    let mut definition = ParserDefinition::from_file(path)
        .with_context(|| format!("Failed to read parser definition '{}'", path.display()))?;
    if let Some(prog) = matches.get_one::<String>("prog") {
        definition.prog = Some(prog.clone());
    }

    let fallback_prog = path.file_stem().and_then(|stem| stem.to_str());
    let parser = definition.build(fallback_prog)?;

    let format = output_format(matches)?;
    Ok(parser.render_help(&context, format)?)
}

/// Run with already parsed arguments
pub fn run_with(matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("list-themes") {
        list_themes();
        return Ok(());
    }

    ColorChoice::from_matches(matches).apply();

    let path = matches
        .get_one::<PathBuf>("parser")
        .context("A parser definition file is required")?;
    let rendered = render(matches, path)?;

    match matches.get_one::<PathBuf>("output") {
        Some(output) => {
            fs::write(output, &rendered)
                .with_context(|| format!("Failed to write '{}'", output.display()))?;
            eprintln!("{} {}", "Wrote".green().bold(), output.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<()> {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));
    run_with(&matches)
}
