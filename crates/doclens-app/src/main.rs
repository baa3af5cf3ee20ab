// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// doclens — analyse documents from the command line.
//
// Entry point. Initialises logging, loads configuration, and runs the
// requested command. Reports go to stdout as JSON; logs go to stderr.

mod report;
mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use doclens_core::AnalyzerConfig;
use doclens_core::error::Result;
use tokio::io::AsyncReadExt;

use report::AnalysisReport;
use services::analysis_service::AnalysisService;

#[derive(Parser)]
#[command(name = "doclens")]
#[command(about = "Extract, classify, and score the readability of documents")]
#[command(version)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true, env = "DOCLENS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one or more documents
    Analyze {
        /// Files to analyse
        files: Vec<PathBuf>,
        /// Read a single document from stdin instead of from files
        #[arg(long, conflicts_with = "files", requires = "name")]
        stdin: bool,
        /// Original file name of the stdin document (its extension selects the extractor)
        #[arg(long)]
        name: Option<String>,
        /// Pretty-print JSON reports
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Analyze {
            files,
            stdin,
            name,
            pretty,
        } => {
            let service = AnalysisService::new(config);
            let reports = if stdin {
                vec![analyze_stdin(&service, name.as_deref().unwrap_or("upload")).await]
            } else {
                analyze_files(&service, files).await
            };

            let mut all_ok = true;
            for report in &reports {
                all_ok &= report.success;
                if let Err(err) = print_json(report, pretty) {
                    tracing::error!(error = %err, "failed to write report");
                    return ExitCode::FAILURE;
                }
            }
            if all_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Commands::Config => match print_json(&config, true) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!(error = %err, "failed to print configuration");
                ExitCode::FAILURE
            }
        },
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::load(path),
        None => Ok(AnalyzerConfig::default()),
    }
}

async fn analyze_files(service: &AnalysisService, files: Vec<PathBuf>) -> Vec<AnalysisReport> {
    if files.is_empty() {
        return vec![AnalysisReport::error("unknown", "no file was provided")];
    }

    let preview_chars = service.config().preview_chars;
    service
        .analyze_many(files)
        .await
        .into_iter()
        .map(|(path, result)| match result {
            Ok(result) => AnalysisReport::from_result(&result, preview_chars),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "analysis failed");
                AnalysisReport::error(path.display().to_string(), err.to_string())
            }
        })
        .collect()
}

async fn analyze_stdin(service: &AnalysisService, name: &str) -> AnalysisReport {
    let mut bytes = Vec::new();
    if let Err(err) = tokio::io::stdin().read_to_end(&mut bytes).await {
        return AnalysisReport::error(name, format!("failed to read stdin: {err}"));
    }

    match service.analyze_upload(name, bytes).await {
        Ok(result) => AnalysisReport::from_result(&result, service.config().preview_chars),
        Err(err) => {
            tracing::error!(file_name = name, error = %err, "analysis failed");
            AnalysisReport::error(name, err.to_string())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
