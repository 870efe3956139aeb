//! `config` subcommand: show current configuration and file path.

use super::{Config, ConfigOutput, Options, Result, kv, kv_indent, kv_width, load_config, print_json};

pub(super) fn cmd_config(opts: &Options) -> Result<()> {
    let mut config = load_config(opts.config.as_deref());
    if let Some(root) = &opts.root {
        config.leds_root = root.clone();
    }
    let config_path = opts.config.clone().or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let errors: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    };

    if opts.json {
        return print_json(&ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            errors,
        });
    }

    let w = kv_width(&["Config file:"], &["leds_root:"]);

    match &config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("leds_root:", config.leds_root.display(), w);

    if !errors.is_empty() {
        println!();
        println!("Problems:");
        for e in &errors {
            println!("  {e}");
        }
    }
    Ok(())
}
