//! sysleds: command-line control for device indicator lights.

use std::path::PathBuf;

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "sysleds",
    version,
    about = "Control device indicator lights through the Linux LED class"
)]
struct Args {
    /// Output as JSON (for set, lights, info, config)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// LED class directory (overrides `leds_root` from the config file)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = cli::Options {
        json: args.json,
        root: args.root,
        config: args.config,
    };

    // Only `set` has a host status code to report.
    let reports_status = matches!(args.command, cli::Command::Set { .. });
    if let Err(e) = cli::run(args.command, &opts) {
        if reports_status {
            eprintln!("Error: {e} (status {})", e.status());
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}
