//! Search binary entry point.
//!
//! This binary provides a command-line interface for searching the instructor
//! directory. It supports single-query, list-all and interactive REPL modes,
//! with table or JSON output.
//!
//! # Examples
//!
//! Single query without AI:
//! ```bash
//! teacher-search --data data/teachers.json --query "atrod man visus maģistrus"
//! ```
//!
//! JSON output of the whole directory:
//! ```bash
//! teacher-search --data data/teachers.json --all --format json
//! ```
//!
//! Interactive mode with AI normalization:
//! ```bash
//! OPENROUTER_API_KEY=sk-or-... teacher-search --data data/teachers.json --interactive
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use teacher_search::{
    app::{build_engine, AppEngine},
    config::{AiConfig, AppConfig, DEFAULT_AI_MODEL, DEFAULT_DATA_PATH},
    degree::{DegreeLevel, DegreeTable},
    models::{SearchOutcome, Teacher},
    query::SearchEngine,
};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output format for search results
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-friendly table with colored degrees
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Search CLI for the instructor directory
#[derive(Parser, Debug)]
#[command(
    name = "teacher-search",
    version,
    about = "Search university instructors with natural-language Latvian queries",
    long_about = "Query the instructor directory. Queries are normalized into keywords \
                  by OpenRouter when OPENROUTER_API_KEY is set, otherwise by the local \
                  rule-based extractor.

EXAMPLES:
  Single query:
    teacher-search --query \"atrod man visus maģistrus\"

  Whole directory as JSON:
    teacher-search --all --format json

  Interactive mode:
    teacher-search --interactive"
)]
struct Args {
    /// Instructor data file (JSON array)
    #[arg(long, env = "TEACHERS_DATA", default_value = DEFAULT_DATA_PATH, value_name = "PATH")]
    data: PathBuf,

    /// Search query (single-query mode)
    #[arg(long, value_name = "TEXT", conflicts_with_all = ["interactive", "all"])]
    query: Option<String>,

    /// List every instructor without filtering
    #[arg(long, conflicts_with = "interactive")]
    all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Enable interactive REPL mode
    #[arg(long, short = 'i')]
    interactive: bool,

    /// OpenRouter API key; leave unset to use local keyword extraction only
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Chat model used for keyword normalization
    #[arg(long, env = "OPENROUTER_MODEL", default_value = DEFAULT_AI_MODEL)]
    model: String,

    /// Upper bound on one AI call, in seconds
    #[arg(long, env = "OPENROUTER_TIMEOUT_SECS", default_value = "10", value_name = "SECS")]
    ai_timeout: u64,

    /// Logging verbosity level
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    log_level: String,
}

/// Setup logging with the specified level
fn setup_logging(log_level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn degree_color(table: &DegreeTable, degree: &str) -> Color {
    let level = table
        .rules()
        .iter()
        .find(|rule| rule.has_marker(degree))
        .map(|rule| rule.level);
    match level {
        Some(DegreeLevel::Doctorate) => Color::Green,
        Some(DegreeLevel::Master) => Color::Cyan,
        Some(DegreeLevel::Bachelor) => Color::Yellow,
        None => Color::White,
    }
}

/// Format results as a pretty table
fn format_results_table(results: &[Teacher], table_rules: &DegreeTable) -> String {
    if results.is_empty() {
        return "No teachers found.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Degree").add_attribute(Attribute::Bold),
        Cell::new("Position").add_attribute(Attribute::Bold),
        Cell::new("Department").add_attribute(Attribute::Bold),
        Cell::new("Courses").add_attribute(Attribute::Bold),
    ]);

    for (idx, teacher) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&teacher.name),
            Cell::new(&teacher.degree).fg(degree_color(table_rules, &teacher.degree)),
            Cell::new(&teacher.position),
            Cell::new(truncate(&teacher.department, 40)),
            Cell::new(truncate(&teacher.courses.join(", "), 50)),
        ]);
    }

    table.to_string()
}

/// Format an outcome as JSON
fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).with_context(|| "Failed to serialize results to JSON")
}

/// Display detailed view of a single result
fn display_result_detail(teacher: &Teacher, rank: usize) {
    println!("\n{}", "═".repeat(80));
    println!("Rank: {}", rank);
    println!("Name: {}", teacher.name);
    println!("Degree: {}", teacher.degree);
    println!("Position: {}", teacher.position);
    println!("Department: {}", teacher.department);
    if let Some(email) = &teacher.email {
        println!("Email: {}", email);
    }
    if let Some(url) = &teacher.profile_url {
        println!("Profile: {}", url);
    }
    if !teacher.courses.is_empty() {
        println!("\nCourses:");
        for course in &teacher.courses {
            println!("  - {}", course);
        }
    }
    if let Some(research) = &teacher.research {
        println!("\nResearch:\n{}", research);
    }
    println!("{}", "═".repeat(80));
}

fn print_outcome(outcome: &SearchOutcome, format: OutputFormat, elapsed: Duration, table: &DegreeTable) {
    match format {
        OutputFormat::Table => {
            println!(
                "Keywords: {} ({})",
                outcome.keywords_used,
                outcome.keyword_source.label()
            );
            println!("{}", format_results_table(&outcome.results, table));
            println!(
                "\nFound {} teachers in {:.2}s",
                outcome.results.len(),
                elapsed.as_secs_f64()
            );
        }
        OutputFormat::Json => match format_outcome_json(outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error formatting JSON: {}", e),
        },
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <query>         - Search for teachers");
    println!("  /all            - List every teacher");
    println!("  /format table   - Use table output format");
    println!("  /format json    - Use JSON output format");
    println!("  /detail N       - Show full details for result rank N");
    println!("  /help           - Show this help");
    println!("  Ctrl+D or Ctrl+C - Exit");
}

/// Run interactive REPL mode
async fn run_interactive(engine: AppEngine, table: &DegreeTable, mut format: OutputFormat) -> Result<()> {
    println!("Interactive Teacher Search");
    if !engine.ai_configured() {
        println!("AI not configured, using local keyword extraction");
    }
    print_help();
    println!();

    let mut rl = DefaultEditor::new().with_context(|| "Failed to create readline editor")?;
    let mut last_results: Vec<Teacher> = Vec::new();

    loop {
        let readline = rl.readline("Meklēt> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line).ok(); // Ignore errors from adding to history

                if line.starts_with('/') {
                    let parts: Vec<&str> = line.split_whitespace().collect();
                    match parts[0] {
                        "/help" => print_help(),
                        "/all" => {
                            let start = Instant::now();
                            let outcome = engine.list_all().await;
                            print_outcome(&outcome, format, start.elapsed(), table);
                            last_results = outcome.results;
                        }
                        "/format" => {
                            if parts.len() != 2 {
                                eprintln!("Usage: /format [table|json]");
                                continue;
                            }
                            match parts[1] {
                                "table" => {
                                    format = OutputFormat::Table;
                                    println!("Set output format to table");
                                }
                                "json" => {
                                    format = OutputFormat::Json;
                                    println!("Set output format to JSON");
                                }
                                _ => eprintln!("Invalid format: must be 'table' or 'json'"),
                            }
                        }
                        "/detail" => {
                            if parts.len() != 2 {
                                eprintln!("Usage: /detail N");
                                continue;
                            }
                            match parts[1].parse::<usize>() {
                                Ok(rank) if rank > 0 && rank <= last_results.len() => {
                                    display_result_detail(&last_results[rank - 1], rank);
                                }
                                Ok(rank) if rank > last_results.len() => {
                                    eprintln!(
                                        "Rank {} out of range (last search had {} results)",
                                        rank,
                                        last_results.len()
                                    );
                                }
                                _ => eprintln!("Invalid rank: must be a positive integer"),
                            }
                        }
                        _ => eprintln!(
                            "Unknown command: {}. Type /help for available commands.",
                            parts[0]
                        ),
                    }
                } else {
                    debug!(query = %line, "Executing search");
                    let start = Instant::now();
                    match engine.search(line).await {
                        Ok(outcome) => {
                            print_outcome(&outcome, format, start.elapsed(), table);
                            last_results = outcome.results;
                        }
                        Err(e) => eprintln!("Search failed: {}", e),
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                error!("Error reading input: {}", err);
                break;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    if !args.interactive && !args.all && args.query.is_none() {
        anyhow::bail!(
            "One of --query, --all or --interactive must be specified.\n\
             Use --help for usage information."
        );
    }

    if !args.data.exists() {
        anyhow::bail!("Data file not found: {}", args.data.display());
    }

    let mut config = AppConfig::new(&args.data);
    config.ai = AiConfig::from_api_key(args.api_key.clone()).map(|ai| {
        ai.with_model(&args.model)
            .with_timeout(Duration::from_secs(args.ai_timeout))
    });
    config.validate().context("Invalid configuration")?;

    info!("Loading teachers from: {}", args.data.display());
    let table = DegreeTable::shared();
    let engine = build_engine(&config, table.clone())
        .await
        .context("Failed to build search engine")?;

    if args.interactive {
        return run_interactive(engine, &table, args.format).await;
    }

    let start = Instant::now();
    let outcome = match &args.query {
        Some(query) => engine
            .search(query)
            .await
            .with_context(|| format!("Failed to execute search for query: '{}'", query))?,
        None => engine.list_all().await,
    };
    let elapsed = start.elapsed();

    match args.format {
        OutputFormat::Table => print_outcome(&outcome, args.format, elapsed, &table),
        OutputFormat::Json => println!("{}", format_outcome_json(&outcome)?),
    }

    Ok(())
}
