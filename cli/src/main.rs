mod chart;
mod logging;
mod report;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use weekprofile_core::build_weekly_profile;

#[derive(Parser)]
#[command(name = "weekprofile")]
#[command(about = "Fold dated observations into a Monday-Sunday weekly profile", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Observations as DATE:VALUE (e.g. 2020-01-06:-6)
    #[arg(allow_hyphen_values = true)]
    observations: Vec<String>,

    /// JSON object of {"YYYY-MM-DD": value}; "-" reads stdin
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Build the profile and print it
    Build {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = report::Format::Table)]
        format: report::Format,
    },
    /// Show the profile as a bar chart in the terminal
    Chart {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Build { input, format } => {
            let observations = source::load(&input.observations, input.file.as_deref())?;
            let profile = build_weekly_profile(&observations)
                .context("Failed to build weekly profile")?;
            info!(observed = profile.observed_days().len(), "profile ready");
            println!("{}", report::render(&profile, format)?);
        }
        Commands::Chart { input } => {
            let observations = source::load(&input.observations, input.file.as_deref())?;
            let profile = build_weekly_profile(&observations)
                .context("Failed to build weekly profile")?;
            chart::run(profile)?;
        }
    }
    Ok(())
}
