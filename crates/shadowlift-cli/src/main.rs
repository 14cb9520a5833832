mod commands;
mod progress;
mod summary;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shadowlift_core::error::{EnhanceError, ErrorKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shadowlift", about = "Lift shadow detail in photographs")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance an image and write the result as JPEG
    Enhance(commands::enhance::EnhanceArgs),
    /// Show image dimensions and tonal statistics
    Info(commands::info::InfoArgs),
    /// Print the default enhancement config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Enhance(args) => commands::enhance::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error[{}]: {:#}", error_code(&err), err);
            ExitCode::FAILURE
        }
    }
}

/// User-facing code for a failure, taken from the first core error in the chain.
///
/// Failures raised outside the core are bad input, except plain I/O errors.
fn error_code(err: &anyhow::Error) -> &'static str {
    error_kind(err).code()
}

fn error_kind(err: &anyhow::Error) -> ErrorKind {
    if let Some(core) = err.chain().find_map(|e| e.downcast_ref::<EnhanceError>()) {
        return core.kind();
    }
    if err.chain().any(|e| e.is::<std::io::Error>()) {
        ErrorKind::Io
    } else {
        ErrorKind::InvalidArgument
    }
}
