//! CLI command dispatch and handlers.
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod build;
pub mod check;
pub mod completions;
pub mod render;
pub mod resolve;
pub mod serve;
pub mod version;

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigLoader, LoadResult};
use crate::error::ReportError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` fires on Ctrl+C / SIGTERM and stops long-running commands.
///
/// # Errors
///
/// Returns an error if configuration loading or the command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), ReportError> {
    let config_path = cli.config;
    match cli.command {
        Commands::Resolve(args) => {
            let loaded = load_config(config_path.as_deref())?;
            resolve::run(&args, &loaded.config)
        }
        Commands::Render(args) => {
            let loaded = load_config(config_path.as_deref())?;
            render::run(&args, &loaded.config).await
        }
        Commands::Build(args) => {
            let loaded = load_config(config_path.as_deref())?;
            // The copy is synchronous filesystem work; keep it off the runtime threads.
            tokio::task::spawn_blocking(move || build::run(&args, &loaded.config))
                .await
                .map_err(|e| ReportError::Io(std::io::Error::other(e)))?
        }
        Commands::Serve(args) => {
            let loaded = load_config(config_path.as_deref())?;
            serve::run(&args, &loaded.config, cancel).await
        }
        Commands::Check(args) => check::run(&args, config_path.as_deref()),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<LoadResult, ReportError> {
    if let Some(path) = path {
        tracing::info!(config = %path.display(), "loading configuration");
    }
    Ok(ConfigLoader::default().load(path)?)
}
