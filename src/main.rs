//! Resume analyzer: AI-powered resume and job description match analysis

use clap::Parser;
use log::{error, info, warn};
use resume_analyzer::analysis::{Analyzer, MatchReport, ReportMetadata};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::config::Config;
use resume_analyzer::error::{AnalyzerError, Result};
use resume_analyzer::output::formatter::{save_report_to_file, ReportGenerator};
use std::process;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Missing credentials are startup-fatal: nothing runs without a client.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            job,
            resume,
            output,
            save,
            no_cache,
        } => {
            cli::validate_file_extension(&job, &["pdf", "txt"])
                .map_err(|e| AnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
            cli::validate_file_extension(&resume, &["pdf", "txt"])
                .map_err(|e| AnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;

            let format = cli::parse_output_format(&output).map_err(AnalyzerError::InvalidInput)?;

            info!("Starting match analysis");
            info!("Job description: {}", job.display());
            info!("Resume: {}", resume.display());

            let mut analyzer = Analyzer::new(&config)?.with_cache(!no_cache);
            let generator = ReportGenerator::new(config.output.color_output);

            let (report, failed) = match analyzer.analyze(&job, &resume).await {
                Ok(report) => (report, None),
                Err(e) => {
                    warn!("Analysis failed: {}", e);
                    let report = MatchReport::failure(
                        e.to_string(),
                        ReportMetadata::new(&config.azure.deployment, &job, &resume, 0),
                    );
                    (report, Some(e))
                }
            };

            let rendered = generator.generate_report(&report, &format)?;
            println!("{}", rendered);

            if let Some(path) = save {
                save_report_to_file(&rendered, &path)?;
                info!("Report saved to {}", path.display());
            }

            if let Some(e) = failed {
                return Err(e);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Endpoint: {}", config.azure.endpoint);
                println!("Deployment: {}", config.azure.deployment);
                println!("API version: {}", config.azure.api_version);
                println!("API key: {}", config.azure.redacted_key());
                println!("Temperature: {}", config.request.temperature);
                println!("Max tokens: {}", config.request.max_tokens);
                println!("Request timeout: {}s", config.request.timeout_secs);
                println!("Output format: {:?}", config.output.format);
            }

            Some(ConfigAction::Reset) => {
                Config::reset_preferences()?;
                println!("Preferences reset to defaults");
            }
        },
    }

    Ok(())
}
