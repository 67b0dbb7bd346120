//! `path-template`: parse and check HTTP path templates.
//!
//! ```text
//! path-template parse "/v1/{name=messages/*}"     → JSON segment tree
//! path-template check rules.toml [--watch]         → per-binding report
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use http_path_template::check::{check_config, parse_patterns, CheckReport};
use http_path_template::config::watcher::ConfigWatcher;
use http_path_template::config::{read_config, LogFormat, ObservabilityConfig, ToolConfig};
use http_path_template::observability::init_logging;

#[derive(Parser)]
#[command(name = "path-template")]
#[command(about = "Parse and check HTTP path templates for RPC methods", long_about = None)]
struct Cli {
    /// Log level or filter directives; RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse path templates and print their segment trees as JSON
    Parse {
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Check every HTTP rule in a rules file
    Check {
        /// Path to the TOML rules file.
        config: PathBuf,

        /// Re-check whenever the file changes, until Ctrl-C.
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    let loaded = match &cli.command {
        Commands::Check { config, .. } => Some(read_config(config)),
        Commands::Parse { .. } => None,
    };

    let mut observability = match &loaded {
        Some(Ok(config)) => config.observability.clone(),
        _ => ObservabilityConfig::default(),
    };
    if let Some(level) = cli.log_level {
        observability.log_level = level;
    }
    if let Some(format) = cli.log_format {
        observability.log_format = format;
    }
    init_logging(&observability)?;

    match cli.command {
        Commands::Parse { patterns } => run_parse(&patterns),
        Commands::Check { config: path, watch } => {
            let config = loaded.unwrap_or_else(|| read_config(&path))?;
            if watch {
                run_watch(&path, config).await
            } else {
                run_check(&path, &config)
            }
        }
    }
}

fn run_parse(patterns: &[String]) -> Result<ExitCode, Box<dyn Error>> {
    let report = parse_patterns(patterns);
    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!(patterns = report.patterns.len(), failed = report.failed(), "Parse complete");
    Ok(if report.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn run_check(path: &Path, config: &ToolConfig) -> Result<ExitCode, Box<dyn Error>> {
    let report = check_config(config);
    print_report(path, &report)?;
    Ok(if report.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run_watch(path: &Path, config: ToolConfig) -> Result<ExitCode, Box<dyn Error>> {
    run_check(path, &config)?;

    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(config) => {
                    run_check(path, &config)?;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_report(path: &Path, report: &CheckReport) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);

    for problem in &report.problems {
        tracing::warn!(path = ?path, "{}", problem);
    }

    tracing::info!(
        path = ?path,
        bindings = report.bindings.len(),
        failed = report.failed_bindings(),
        problems = report.problems.len(),
        "Check complete"
    );
    Ok(())
}
