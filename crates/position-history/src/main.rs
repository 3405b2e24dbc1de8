// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! position-history: value history of one position from a JSON file's git log
//!
//! Reads every committed version of a portfolio JSON file, picks out one
//! position by symbol and writes the resulting time series as a JSON report.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use position_history::config::Config;
use position_history::extract::{Extractor, ProgressCallback, ProgressEvent};
use position_history::report::Report;
use position_history_git::GitRepo;

fn main() -> ExitCode {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();
    let config = Config::parse();

    // Progress goes to stdout, warnings and errors to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(
            std::io::stderr
                .with_max_level(tracing::Level::WARN)
                .or_else(std::io::stdout),
        )
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal() && std::io::stderr().is_terminal())
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let settings = config.settings()?;
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let repo = GitRepo::open(settings.submodule_path(&cwd)).with_context(|| {
        format!(
            "SUBMODULE_DIR does not look like a git repo: {}",
            settings.submodule_dir
        )
    })?;
    debug!(workdir = %repo.workdir().display(), "opened work tree");

    let extraction = Extractor::new(&repo, &settings)
        .with_progress(progress_logger(settings.target_json_path.clone()))
        .run()?;
    let report = Report::new(&settings, extraction.snapshots, chrono::Utc::now());
    report.write_to(&settings.output_file(&cwd))?;

    info!("Wrote {} snapshots to {}", report.count, settings.output_path);
    Ok(())
}

/// Log extraction progress lines for `path`
fn progress_logger(path: String) -> ProgressCallback {
    Box::new(move |event| match event {
        ProgressEvent::Started { detected, .. } => {
            info!("detected {detected} commits modifying {path}");
        }
        ProgressEvent::Processing { revision, .. } => info!("processing commit {revision}"),
        ProgressEvent::Warning { .. } | ProgressEvent::Completed { .. } => {}
    })
}
