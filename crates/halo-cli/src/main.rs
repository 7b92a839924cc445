//! halo command-line interface.
//!
//! Map the near-field enhancement around a nanocluster from a TOML job file:
//! ```sh
//! halo run job.toml
//! halo validate job.toml
//! halo materials
//! ```

use clap::{Parser, Subcommand};
use halo_cli::{config, runner};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "halo")]
#[command(about = "halo: near-field enhancement maps around metal nanoclusters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a mapping job from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output image path (overrides the config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the simulation.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Display the available material identifiers.
    Materials,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("halo near-field mapper");
            println!("======================");
            let mut job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            if let Some(path) = output {
                job.output.image = path.display().to_string();
            }

            runner::run_job(&job)?;
            println!("Done.");
            Ok(())
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Materials => {
            println!("Available materials:");
            println!();
            println!("  Johnson & Christy (1972) metals:");
            println!("    Ag_JC — Silver, 350–900 nm");
            println!("    Au_JC — Gold,   400–800 nm");
            Ok(())
        }
    }
}
