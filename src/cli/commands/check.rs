//! `check`: configuration validation.

use std::path::Path;

use serde_json::json;

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::ConfigLoader;
use crate::error::{ConfigError, ReportError};

/// Load and validate the configuration, printing any warnings.
///
/// # Errors
///
/// Returns [`ReportError::Config`] if loading or validation fails, or if
/// `--strict` is set and there are warnings.
pub fn run(args: &CheckArgs, path: Option<&Path>) -> Result<(), ReportError> {
    let loaded = ConfigLoader::default().load(path)?;
    let source = path.map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string());

    match args.format {
        OutputFormat::Human => {
            for warning in &loaded.warnings {
                println!("{warning}");
            }
            println!("{source}: OK ({} warning(s))", loaded.warnings.len());
        }
        OutputFormat::Json => {
            let warnings: Vec<String> = loaded.warnings.iter().map(ToString::to_string).collect();
            let value = json!({
                "config": source,
                "valid": true,
                "warnings": warnings,
                "resolved": loaded.config,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    if args.strict && !loaded.warnings.is_empty() {
        return Err(ConfigError::ValidationError {
            path: source,
            errors: loaded.warnings,
        }
        .into());
    }
    Ok(())
}
