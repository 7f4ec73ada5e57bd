use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use todo_core::config::{Config, default_config_path};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Effective configuration plus where it came from.
#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    path: Option<PathBuf>,
    /// `false` when no file was found and defaults apply.
    loaded: bool,
    config: &'a Config,
}

pub fn run_config(
    args: &ConfigArgs,
    config: &Config,
    explicit_path: Option<&Path>,
    output: OutputMode,
) -> Result<()> {
    match args.command {
        ConfigCommand::Show => run_show(config, explicit_path, output),
    }
}

fn run_show(config: &Config, explicit_path: Option<&Path>, output: OutputMode) -> Result<()> {
    let report = build_report(config, explicit_path);
    render_mode(output, &report, write_text, write_pretty)
}

fn build_report<'a>(config: &'a Config, explicit_path: Option<&Path>) -> ConfigReport<'a> {
    let path = explicit_path.map(Path::to_path_buf).or_else(default_config_path);
    let loaded = explicit_path.is_some() || path.as_deref().is_some_and(Path::exists);
    ConfigReport {
        path,
        loaded,
        config,
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}

fn write_text(report: &ConfigReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let config = report.config;
    writeln!(w, "path={}", display_path(report.path.as_deref()))?;
    writeln!(w, "loaded={}", report.loaded)?;
    writeln!(w, "ids.strategy={}", config.ids.strategy.as_str())?;
    writeln!(w, "ui.tick_ms={}", config.ui.tick_ms)?;
    writeln!(w, "ui.show_hints={}", config.ui.show_hints)?;
    writeln!(w, "ui.mouse={}", config.ui.mouse)?;
    writeln!(w, "log.file={}", display_path(config.log.file.as_deref()))
}

fn write_pretty(report: &ConfigReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let config = report.config;
    pretty_section(w, "Configuration")?;
    let source = if report.loaded {
        display_path(report.path.as_deref())
    } else {
        format!("{} (not found, using defaults)", display_path(report.path.as_deref()))
    };
    pretty_kv(w, "source", source)?;
    pretty_kv(w, "id strategy", config.ids.strategy.as_str())?;
    pretty_kv(w, "tick", format!("{} ms", config.ui.tick_ms))?;
    pretty_kv(w, "hints", config.ui.show_hints.to_string())?;
    pretty_kv(w, "mouse", config.ui.mouse.to_string())?;
    pretty_kv(w, "log file", display_path(config.log.file.as_deref()))
}
