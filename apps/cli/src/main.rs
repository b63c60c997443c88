//! RiskCrew CLI - Command-line interface for multi-agent project risk analysis
//!
//! This CLI provides a `riskcrew` command that routes questions to the
//! agent crew, runs the fixed assessment pipeline, and saves reports.

mod commands;
mod config;
mod engine;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use config::CliConfig;
use engine::EngineSettings;
use riskcrew_orchestrator::{AgentRegistry, Discipline};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

/// RiskCrew CLI - Project risk analysis with a crew of specialized agents
#[derive(Parser, Debug)]
#[command(
    name = "riskcrew",
    author,
    version,
    about = "RiskCrew - Multi-agent project risk analysis",
    long_about = "RiskCrew routes questions about a project's risk posture to specialized agents\n(market analysis, risk scoring, status tracking, reporting) coordinated by a project risk manager."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Model provider (mock, openai, mistral); overrides RISKCREW_ENGINE
    #[arg(short, long, global = true)]
    engine: Option<String>,

    /// Model id for the provider; overrides RISKCREW_MODEL
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask a question
    ///
    /// The question is routed by keyword to the responsible agent. Requests for a
    /// full analysis or report are handed to the Project Risk Manager with the
    /// whole crew available for delegation.
    Ask {
        /// The question to ask
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a custom risk analysis
    ///
    /// Without a request, assesses the overall risk for Project Phoenix.
    Analyze {
        /// Analysis request
        request: Option<String>,

        /// Execution discipline
        #[arg(long, value_enum, default_value_t = DisciplineArg::ManagerLed)]
        discipline: DisciplineArg,

        /// Save the report (to PATH, or a timestamped file in the current directory)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        save: Option<Option<PathBuf>>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the fixed four-stage assessment pipeline
    Pipeline {
        /// Save the report (to PATH, or a timestamped file in the current directory)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        save: Option<Option<PathBuf>>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the agent crew
    Agents {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DisciplineArg {
    Sequential,
    ManagerLed,
}

impl From<DisciplineArg> for Discipline {
    fn from(arg: DisciplineArg) -> Self {
        match arg {
            DisciplineArg::Sequential => Self::Sequential,
            DisciplineArg::ManagerLed => Self::ManagerLed,
        }
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            for cause in err.chain().skip(1) {
                eprintln!("  {} {}", "caused by:".red(), cause);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration; skipped files are reported once tracing is up
    let (cli_config, skipped) = CliConfig::load();

    // Initialize tracing; stdout is reserved for the report
    let level = args.log_level.as_deref().or(cli_config.log_level.as_deref()).map_or(Level::WARN, parse_level);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    for err in &skipped {
        warn!(error = %err, "Ignoring configuration file");
    }

    let json_default = cli_config.output.is_json();
    let settings = EngineSettings::resolve(&cli_config, args.engine, args.model);

    match args.command {
        Command::Agents { json } => {
            commands::agents::execute(&AgentRegistry::standard(), json || json_default)?;
        }
        Command::Ask { query, json } => {
            let router = engine::build_router(&settings)?;
            commands::ask::execute(&router, &query.join(" "), json || json_default).await?;
        }
        Command::Analyze { request, discipline, save, json } => {
            let router = engine::build_router(&settings)?;
            commands::analyze::execute(
                &router,
                request.as_deref(),
                discipline.into(),
                save,
                json || json_default,
            )
            .await?;
        }
        Command::Pipeline { save, json } => {
            let router = engine::build_router(&settings)?;
            commands::pipeline::execute(&router, save, json || json_default).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_save_flag_forms() {
        let args = Args::parse_from(["riskcrew", "pipeline"]);
        assert!(matches!(args.command, Command::Pipeline { save: None, .. }));

        let args = Args::parse_from(["riskcrew", "pipeline", "--save"]);
        assert!(matches!(args.command, Command::Pipeline { save: Some(None), .. }));

        let args = Args::parse_from(["riskcrew", "analyze", "--save", "out.txt", "--discipline", "sequential"]);
        match args.command {
            Command::Analyze { save, discipline, request, .. } => {
                assert_eq!(save, Some(Some(PathBuf::from("out.txt"))));
                assert!(matches!(discipline, DisciplineArg::Sequential));
                assert!(request.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("bogus"), Level::WARN);
    }
}
