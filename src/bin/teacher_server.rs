//! Request server binary entry point.
//!
//! Serves the search API as line-delimited JSON over stdin/stdout. Logs go to
//! stderr so they never mix with responses.
//!
//! # Examples
//!
//! ```bash
//! OPENROUTER_API_KEY=sk-or-... teacher-server --data data/teachers.json
//! echo '{"route": "search", "query": "atrod man visus maģistrus"}' | teacher-server
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use teacher_search::{
    app::build_engine,
    config::{AiConfig, AppConfig, DEFAULT_AI_MODEL, DEFAULT_DATA_PATH},
    degree::DegreeTable,
    server::{serve_stdio, ApiServer},
    stats::{distinct_departments, DegreeBreakdown},
    storage::{load_or_empty, JsonFileStorage},
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Departments listed in the startup summary.
const SUMMARY_DEPARTMENTS: usize = 3;

/// Teacher search request server
#[derive(Parser, Debug)]
#[command(
    name = "teacher-server",
    version,
    about = "Serve the teacher search API as line-delimited JSON over stdio"
)]
struct Args {
    /// Instructor data file (JSON array)
    #[arg(long, env = "TEACHERS_DATA", default_value = DEFAULT_DATA_PATH, value_name = "PATH")]
    data: PathBuf,

    /// OpenRouter API key; leave unset to use local keyword extraction only
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Chat model used for keyword normalization
    #[arg(long, env = "OPENROUTER_MODEL", default_value = DEFAULT_AI_MODEL)]
    model: String,

    /// Upper bound on one AI call, in seconds
    #[arg(long, env = "OPENROUTER_TIMEOUT_SECS", default_value = "10", value_name = "SECS")]
    ai_timeout: u64,

    /// Read the data file once at startup instead of on every request
    #[arg(long)]
    cache: bool,

    /// Logging verbosity level
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    log_level: String,
}

/// Setup logging with the specified level
fn setup_logging(log_level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();
}

fn build_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::new(&args.data);
    config.cache_records = args.cache;
    config.ai = AiConfig::from_api_key(args.api_key.clone()).map(|ai| {
        ai.with_model(&args.model)
            .with_timeout(Duration::from_secs(args.ai_timeout))
    });
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Log what the server is about to serve.
async fn log_startup_summary(config: &AppConfig, table: &DegreeTable) {
    let teachers = load_or_empty(&JsonFileStorage::new(&config.data_path)).await;
    let breakdown = DegreeBreakdown::compute(&teachers, table);
    let departments = distinct_departments(&teachers);

    info!(
        version = teacher_search::VERSION,
        data = %config.data_path.display(),
        teachers = breakdown.total,
        "Teacher search server starting"
    );
    info!(
        masters = breakdown.masters,
        doctors = breakdown.doctors,
        bachelors = breakdown.bachelors,
        other = breakdown.other,
        "Degree breakdown"
    );
    if !departments.is_empty() {
        let shown: Vec<&str> = departments
            .iter()
            .take(SUMMARY_DEPARTMENTS)
            .map(String::as_str)
            .collect();
        info!(
            departments = departments.len(),
            first = %shown.join(", "),
            "Departments"
        );
    }
    if teachers.is_empty() {
        warn!(data = %config.data_path.display(), "No teacher records loaded");
    }

    match &config.ai {
        Some(ai) => info!(model = %ai.model, timeout = ?ai.timeout, "AI: OpenRouter"),
        None => warn!(
            "AI: not configured, using local keyword extraction. \
             Set OPENROUTER_API_KEY (https://openrouter.ai/keys) to enable it"
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let config = build_config(&args)?;
    let table = DegreeTable::shared();
    log_startup_summary(&config, &table).await;

    let engine = build_engine(&config, table.clone())
        .await
        .context("Failed to build search engine")?;
    let server = ApiServer::new(engine, table).with_ai_model(&args.model);

    info!("Listening on stdin");
    tokio::select! {
        result = serve_stdio(&server) => {
            result.context("Transport failed")?;
            info!("Input closed, shutting down");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
