// aws-console - open the AWS Console for a configured role

mod aws_config;
mod cli;
mod console;
mod credentials;
mod env;
mod error;
mod models;
mod session;

use crate::aws_config::ProfileStore;
use crate::error::Result;
use std::path::PathBuf;
use std::process::ExitCode;

fn load_profiles() -> Result<(PathBuf, ProfileStore)> {
    let path = crate::aws_config::config_file_path()?;
    let store = ProfileStore::load_from(&path)?;
    Ok((path, store))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Profiles must be known before parsing: they are the allowed --profile values
    let (config_path, store) = match load_profiles() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args = cli::Cli::parse_with_profiles(&store.selectable_names());

    if args.headless {
        env::set_headless_override(true);
    }

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Loaded {} selectable profiles from {}",
        store.selectable_names().len(),
        config_path.display()
    );

    match cli::execute(args, &store).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
