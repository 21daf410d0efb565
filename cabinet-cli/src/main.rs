//! cabinet - course progress viewer
//!
//! Loads the lesson sheet named in the config file, then shows the dashboard,
//! a lesson page, or updates local progress.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use cabinet_cli::LessonOutcome;
use cabinet_common::config::CabinetConfig;
use cabinet_common::storage::JsonFileStore;
use cabinet_common::CompletionStore;
use clap::{Parser, Subcommand};
use tracing::info;

/// Command-line arguments for cabinet
#[derive(Parser, Debug)]
#[command(name = "cabinet")]
#[command(about = "Course progress viewer for lesson sheets exported as CSV")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, env = "CABINET_CONFIG")]
    config: Option<PathBuf>,

    /// Course to show, overriding the config file
    #[arg(long)]
    course_id: Option<String>,

    /// Folder holding progress.json
    #[arg(short, long, env = "CABINET_DATA_FOLDER")]
    data_folder: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lesson list with lock state and progress (default)
    Dashboard,
    /// Show one lesson
    Lesson { lesson_id: String },
    /// Mark a lesson completed
    Complete { lesson_id: String },
    /// Forget all completed lessons
    Reset,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Installed before config loading so its warnings are not lost
    let logging = cabinet_cli::logging::init();

    let mut config = CabinetConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(course_id) = args.course_id {
        config.course_id = course_id;
    }
    logging
        .apply_level(&config.logging.level)
        .context("Failed to apply configured log level")?;
    info!(
        "Starting cabinet v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let data_folder = config.resolve_data_folder(args.data_folder.as_deref());
    info!("Progress store: {}", data_folder.display());
    let store = CompletionStore::new(JsonFileStore::in_folder(&data_folder));

    match args.command.unwrap_or(Command::Dashboard) {
        Command::Reset => {
            println!("{}", cabinet_cli::reset(&store)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Dashboard => {
            let lessons = cabinet_cli::load_catalog(&config).await?;
            print!("{}", cabinet_cli::dashboard(&config, &lessons, &store));
            Ok(ExitCode::SUCCESS)
        }
        Command::Lesson { lesson_id } => {
            let lessons = cabinet_cli::load_catalog(&config).await?;
            Ok(report(cabinet_cli::lesson(&lessons, &store, &lesson_id)?))
        }
        Command::Complete { lesson_id } => {
            let lessons = cabinet_cli::load_catalog(&config).await?;
            let outcome = cabinet_cli::complete(&lessons, &store, &lesson_id)
                .context("Failed to save progress")?;
            Ok(report(outcome))
        }
    }
}

/// Print a lesson outcome; not-found and locked exit with status 2
fn report(outcome: LessonOutcome) -> ExitCode {
    let text = outcome.text().trim_end();
    println!("{}", text);
    match outcome {
        LessonOutcome::Shown(_) => ExitCode::SUCCESS,
        LessonOutcome::NotFound(_) | LessonOutcome::Locked(_) => ExitCode::from(2),
    }
}
