//! Prodios - a terminal multi-tab code editor.
//!
//! # Usage
//!
//! ```bash
//! prodios
//! prodios page.tsx Header.tsx
//! prodios --tab-size 4 --theme light main.rs
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prodios::app::App;
use prodios::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use prodios::highlight::{HighlightBackground, set_background_mode};

/// A terminal code editor with tabs, syntax highlighting and bracket auto-closing
#[derive(Parser, Debug)]
#[command(name = "prodios", version, about, long_about = None)]
struct Cli {
    /// File names to open as empty tabs; the last one is active
    #[arg(value_name = "FILE_NAMES")]
    file_names: Vec<String>,

    /// Spaces inserted by the Tab key (default 2)
    #[arg(long, value_name = "N")]
    tab_size: Option<usize>,

    /// Insert a tab character instead of spaces
    #[arg(long)]
    hard_tabs: bool,

    /// Force syntax highlight theme background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Write log events to a file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<std::path::PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Route tracing output to `log_file`, or discard it.
///
/// The terminal belongs to the editor while it runs, so events never go to
/// stdout or stderr.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "configuration resolved");

    match effective.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => set_background_mode(None),
        ThemeMode::Light => set_background_mode(Some(HighlightBackground::Light)),
        ThemeMode::Dark => set_background_mode(Some(HighlightBackground::Dark)),
    }

    // Run the application
    let app = App::new()
        .with_indent(effective.indent_unit())
        .with_file_names(cli.file_names);

    app.run().context("Application error")
}
