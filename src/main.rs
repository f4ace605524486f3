use anyhow::Result;
use urban_stress::cli::{self, Commands};
use urban_stress::commands::{self, AssessConfig, ExplainConfig};

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbosity);

    match cli.command {
        Commands::Generate { output, seed } => commands::generate_data(&output, seed),
        Commands::Assess {
            data,
            interventions,
            zone,
            explain,
            format,
            output,
            plain,
        } => commands::handle_assess(AssessConfig {
            data,
            scenario: interventions.scenario(),
            zone,
            explain,
            format,
            output,
            formatting: cli::create_formatting_config(plain),
        }),
        Commands::Explain {
            zone,
            data,
            interventions,
        } => commands::explain_zone(ExplainConfig {
            zone,
            data,
            scenario: interventions.scenario(),
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}
