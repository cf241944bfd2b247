//! pcspecs - System specs report
//!
//! Collects CPU, OS, RAM and optionally GPU and network details, writes them
//! to a plain-text file and prints the same text to the console.

mod config;
mod hardware;
mod prompt;
mod report;

use crate::config::{Config, NetworkPolicy};
use crate::hardware::{CollectOptions, Specs};
use crate::report::SpecsReport;
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// pcspecs - Write your PC specs to a text file
#[derive(Parser)]
#[command(name = "pcspecs")]
#[command(author = "ForgeMyPC")]
#[command(version)]
#[command(about = "Collect CPU, RAM, OS and GPU details into a plain-text report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Report file to write (overwritten each run)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also enumerate NVIDIA GPUs
    #[arg(long)]
    gpus: bool,

    /// Include hostname and IP address without asking
    #[arg(long, conflicts_with = "no_network")]
    network: bool,

    /// Leave hostname and IP address out without asking
    #[arg(long)]
    no_network: bool,

    /// Exit right after printing the report
    #[arg(long)]
    no_pause: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show configuration path and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Effective settings for one run, after flags override the config file
#[derive(Debug, Clone, PartialEq)]
struct RunSettings {
    output_path: PathBuf,
    gpus: bool,
    network: NetworkPolicy,
    pause: bool,
}

impl RunSettings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        let network = if cli.network {
            NetworkPolicy::Always
        } else if cli.no_network {
            NetworkPolicy::Never
        } else {
            config.network
        };

        RunSettings {
            output_path: cli
                .output
                .clone()
                .unwrap_or_else(|| config.output_path.clone()),
            gpus: cli.gpus || config.gpus,
            network,
            pause: config.pause && !cli.no_pause,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Config { init }) => show_config(*init),
        None => {
            let config = Config::load()?;
            let stdin = io::stdin();
            run_report(
                &RunSettings::resolve(&cli, &config),
                &mut stdin.lock(),
                &mut io::stdout().lock(),
            )
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Prompt, collect, write the file, print, pause
fn run_report(
    settings: &RunSettings,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let include_network = match settings.network {
        NetworkPolicy::Always => true,
        NetworkPolicy::Never => false,
        NetworkPolicy::Ask => prompt::ask_network_info(input, out)?,
    };

    let options = CollectOptions {
        include_gpus: settings.gpus,
        include_network,
    };
    tracing::debug!(?options, output = %settings.output_path.display(), "collecting specs");

    let report = SpecsReport::from_collection(Specs::detect(&options));
    if report.is_error() {
        tracing::info!("collection failed, writing error report");
    }
    report.publish(&settings.output_path, out)?;

    if settings.pause {
        prompt::wait_for_enter(input, out)?;
    }

    Ok(())
}

fn show_config(init: bool) -> Result<()> {
    let path = Config::config_path()?;

    if init {
        if Config::init_at(&path)? {
            println!("{} {}", "Created".bright_green(), path.display());
        } else {
            println!("{} {}", "Already exists:".bright_yellow(), path.display());
        }
    }

    let config = Config::load_from(&path)?;
    let network = match config.network {
        NetworkPolicy::Ask => "ask",
        NetworkPolicy::Always => "always",
        NetworkPolicy::Never => "never",
    };

    println!("{}", "Configuration".bright_cyan().bold());
    println!("  {} {}", "Config file:".bright_white(), path.display());
    println!("  {} {}", "Output file:".bright_white(), config.output_path.display());
    println!("  {} {}", "GPUs:".bright_white(), config.gpus);
    println!("  {} {}", "Network info:".bright_white(), network);
    println!("  {} {}", "Pause on exit:".bright_white(), config.pause);

    Ok(())
}
