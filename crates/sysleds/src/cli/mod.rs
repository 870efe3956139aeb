//! CLI subcommands: apply light states, list lights, show module and config.

mod config_cmd;
mod info;
mod lights;
mod set;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use sysleds_lib::config::Config;
pub(super) use sysleds_lib::error::Result;
pub(super) use sysleds_lib::led;
pub(super) use sysleds_lib::{LightController, LightId, LightState, LightsError, ModuleInfo};

const PADDING: usize = 2;

/// Global options shared by every subcommand.
pub struct Options {
    pub json: bool,
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{key:<width$}{value}", width = w);
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| LightsError::Io(std::io::Error::other(e)))?;
    println!("{text}");
    Ok(())
}

/// Load the config file (custom path or default location), logging parse warnings.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// Effective config: file settings with the `--root` override applied, validated.
pub(super) fn effective_config(opts: &Options) -> Result<Config> {
    let mut config = load_config(opts.config.as_deref());
    if let Some(root) = &opts.root {
        config.leds_root = root.clone();
    }
    config.validate().map_err(|errors| {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        LightsError::Config(joined.join("; "))
    })?;
    Ok(config)
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct SetOutput {
    pub light: String,
    pub color: String,
    pub state: LightState,
    pub status: i32,
}

#[derive(Serialize)]
pub(super) struct LightsOutput {
    pub leds_root: String,
    pub lights: Vec<LightJson>,
}

#[derive(Serialize)]
pub(super) struct LightJson {
    pub id: String,
    pub files: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct InfoOutput {
    pub module: ModuleInfo,
    pub lights: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub errors: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a color (and optional blink) to one light
    Set {
        /// Light identifier: backlight, keyboard, buttons, battery, notifications, attention
        light: String,
        /// Color: #RRGGBB, RRGGBB, 0xAARRGGBB, or a name (red, white, off, ...)
        color: String,
        /// Flash mode: none, timed or hardware
        #[arg(long, default_value = "none")]
        flash: String,
        /// Blink on-time in milliseconds
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        on_ms: i32,
        /// Blink off-time in milliseconds
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        off_ms: i32,
    },

    /// List light identifiers and the control files they write
    Lights,

    /// Show the module descriptor
    Info,

    /// Show current configuration and file path
    Config,
}

/// Dispatch a parsed subcommand.
pub fn run(cmd: Command, opts: &Options) -> Result<()> {
    match cmd {
        Command::Set {
            light,
            color,
            flash,
            on_ms,
            off_ms,
        } => set::cmd_set(opts, &light, &color, &flash, on_ms, off_ms),
        Command::Lights => lights::cmd_lights(opts),
        Command::Info => info::cmd_info(opts.json),
        Command::Config => config_cmd::cmd_config(opts),
    }
}
