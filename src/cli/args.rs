use crate::config::DEFAULT_DATA_PATH;
use crate::io::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "urban-stress")]
#[command(about = "Urban environmental stress scoring and intervention simulator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a synthetic zone dataset as CSV
    Generate {
        /// Destination file
        #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
        output: PathBuf,

        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score every zone, optionally after policy interventions
    Assess {
        /// Zone data file (defaults to the configured path)
        #[arg(short, long, env = "URBAN_STRESS_DATA")]
        data: Option<PathBuf>,

        #[command(flatten)]
        interventions: InterventionArgs,

        /// Focus the report on one zone
        #[arg(short, long)]
        zone: Option<String>,

        /// Add a plain-language explanation for the focused zone
        #[arg(long)]
        explain: bool,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Plain output: ASCII only, no colors, no emoji
        #[arg(long)]
        plain: bool,
    },

    /// Explain one zone's risk in plain language
    Explain {
        /// Zone name, e.g. "Zone A"
        #[arg(short, long)]
        zone: String,

        /// Zone data file (defaults to the configured path)
        #[arg(short, long, env = "URBAN_STRESS_DATA")]
        data: Option<PathBuf>,

        #[command(flatten)]
        interventions: InterventionArgs,
    },

    /// Initialize a configuration file in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterventionArgs {
    /// Reduce every zone's waste index by this percentage
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub waste_reduction: u8,

    /// Reduce every zone's AQI by this percentage
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub emission_control: u8,
}

impl InterventionArgs {
    pub fn scenario(&self) -> crate::simulation::Scenario {
        crate::simulation::Scenario::from_percentages(
            f64::from(self.waste_reduction),
            f64::from(self.emission_control),
        )
    }
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
