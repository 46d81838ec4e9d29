//! Drilldown CLI - inspect drilldown rewrites offline
//!
//! Usage:
//!   drilldown rewrite --request <req.json> --config <drill.json> --rows <rows.json> --plan <plan.json>
//!   drilldown check-config <drill.json>
//!
//! Examples:
//!   drilldown rewrite --request req.json --config country.json --rows primary.json --plan plan.json
//!   drilldown check-config country.json

use clap::{Parser, Subcommand};
use drilldown::config::Settings;
use drilldown::curator::drilldown::{
    DimensionRangeValidator, DrilldownConfig, DrilldownRequestBuilder, GranularKeyResolver,
    ResultValueExtractor,
};
use drilldown::execution::RowList;
use drilldown::plan::{PlanGenerator, PlanResult, RequestModel};
use drilldown::request::{BucketParams, ReportingRequest};
use drilldown::request_log::{RequestLog, TracingRequestLog};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "drilldown")]
#[command(about = "Drilldown - break a report result down by one more dimension")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to DRILLDOWN_CONFIG, ./drilldown.toml, then the user config dir)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the secondary request a drilldown would execute
    Rewrite {
        /// Original reporting request (JSON)
        #[arg(long)]
        request: PathBuf,

        /// Drilldown curator config (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Rows returned by the primary query (JSON)
        #[arg(long)]
        rows: PathBuf,

        /// Plan generated for the original request (JSON)
        #[arg(long)]
        plan: PathBuf,
    },

    /// Validate a drilldown curator config
    CheckConfig {
        /// Path to the config (JSON)
        file: PathBuf,
    },
}

/// Serves the same pre-compiled plan for every request.
struct FixedPlanGenerator {
    model: RequestModel,
}

impl PlanGenerator for FixedPlanGenerator {
    fn generate(
        &self,
        _registry: &str,
        _request: &ReportingRequest,
        _bucket: &BucketParams,
        _log: &dyn RequestLog,
    ) -> PlanResult<RequestModel> {
        Ok(self.model.clone())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Settings error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Rewrite {
            request,
            config,
            rows,
            plan,
        } => cmd_rewrite(&settings, &request, &config, &rows, &plan),
        Commands::CheckConfig { file } => cmd_check_config(&file),
    }
}

fn cmd_rewrite(
    settings: &Settings,
    request: &Path,
    config: &Path,
    rows: &Path,
    plan: &Path,
) -> ExitCode {
    let inputs = (|| -> Result<_, String> {
        Ok((
            read_json::<ReportingRequest>(request)?,
            read_config(config)?,
            read_json::<RowList>(rows)?,
            read_json::<RequestModel>(plan)?,
        ))
    })();
    let (request, config, rows, model) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = match settings.registry.resolved_name() {
        Ok(name) => name,
        Err(e) => {
            eprintln!("Settings error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !settings.drilldown.supports_cube(&request.cube) {
        eprintln!("Rejected: cube '{}' is not supported for drilldown", request.cube);
        return ExitCode::FAILURE;
    }
    if let Err(e) = DimensionRangeValidator::new(&settings.drilldown)
        .validate(&config.dimension, request.num_days)
    {
        eprintln!("Rejected: {}", e);
        return ExitCode::FAILURE;
    }

    let log = TracingRequestLog::new(Uuid::new_v4());
    let generator = FixedPlanGenerator { model };

    let rewritten = ResultValueExtractor::extract(&Ok(rows), &config.dimension).and_then(|values| {
        let keys = GranularKeyResolver::new(&generator).resolve(
            &registry,
            &BucketParams::default(),
            &request,
            &log,
        )?;
        let secondary = DrilldownRequestBuilder::rewrite(&request, &config, &keys);
        Ok(DrilldownRequestBuilder::inject_membership_filter(
            secondary, &config, values,
        ))
    });

    match rewritten {
        Ok(secondary) => match serde_json::to_string_pretty(&secondary) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error serializing request: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log.log_failure(&e.to_string());
            eprintln!("Drilldown failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_check_config(file: &Path) -> ExitCode {
    match read_config(file) {
        Ok(config) => {
            println!("✓ Config is valid");
            println!("  dimension: {}", config.dimension.field);
            if let Some(cube) = &config.cube {
                println!("  cube: {}", cube);
            }
            println!("  maxRows: {}", config.max_rows);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_config(path: &Path) -> Result<DrilldownConfig, String> {
    let json = read_json::<serde_json::Value>(path)?;
    DrilldownConfig::parse(&json).map_err(|e| {
        let mut message = format!("Invalid config '{}':", path.display());
        for error in &e.errors {
            message.push_str(&format!("\n  - {}", error));
        }
        message
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("Error reading file '{}': {}", path.display(), e))?;
    serde_json::from_str(&source)
        .map_err(|e| format!("Error parsing '{}': {}", path.display(), e))
}
