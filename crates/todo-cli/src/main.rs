#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use anyhow::anyhow;
use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use todo_core::TodoError;
use todo_core::config::{Config, load_config};
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "todo: a single-screen terminal to-do list",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read configuration from this file instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Without a subcommand the interactive screen opens.
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Inspect configuration",
        long_about = "Show the effective configuration and where it was loaded from.",
        after_help = "EXAMPLES:\n    # Show the effective config\n    todo config show\n\n    # Emit machine-readable output\n    todo config show --json"
    )]
    Config(cmd::config::ConfigArgs),

    #[command(
        about = "Generate shell completions",
        long_about = "Generate shell completion scripts for todo.",
        after_help = "EXAMPLES:\n    # Bash completions\n    todo completions bash > ~/.local/share/bash-completion/completions/todo\n\n    # Zsh completions\n    todo completions zsh > ~/.zfunc/_todo"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Where log lines go.
enum LogSink<'a> {
    Stderr,
    /// Append to a file; used while the screen owns the terminal.
    File(&'a Path),
    Discard,
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose || env::var("DEBUG").is_ok() {
        "todo=debug,todo_core=debug,info"
    } else {
        "todo=info,todo_core=info,warn"
    }
}

fn init_tracing(verbose: bool, sink: &LogSink<'_>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_env("TODO_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let format = env::var("TODO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let (writer, ansi) = match sink {
        LogSink::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogSink::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        LogSink::Discard => (BoxMakeWriter::new(std::io::sink), false),
    };

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(writer))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_ansi(ansi).with_writer(writer))
                .init();
        }
    }
    Ok(())
}

/// Attach the error code and hint to a config failure.
fn describe(err: TodoError) -> anyhow::Error {
    let code = err.code();
    match err.hint() {
        Some(hint) => anyhow!("[{code}] {err}\n  hint: {hint}"),
        None => anyhow!("[{code}] {err}"),
    }
}

fn load(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref()).map_err(describe)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let output = cli.output_mode();

    match cli.command {
        Some(Commands::Config(ref args)) => {
            init_tracing(cli.verbose, &LogSink::Stderr)?;
            let config = load(&cli)?;
            cmd::config::run_config(args, &config, cli.config.as_deref(), output)
        }
        Some(Commands::Completions(ref args)) => {
            init_tracing(cli.verbose, &LogSink::Stderr)?;
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
        None => {
            let config = load(&cli)?;
            let sink = config
                .log
                .file
                .as_deref()
                .map_or(LogSink::Discard, LogSink::File);
            init_tracing(cli.verbose, &sink)?;
            if cli.verbose {
                info!("Verbose mode enabled");
            }
            tui::run(&config)
        }
    }
}
