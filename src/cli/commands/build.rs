//! `build`: static-site build.

use crate::cli::args::{BuildArgs, OutputFormat};
use crate::config::SiteConfig;
use crate::error::ReportError;
use crate::site::build_static;

/// Copy the configured sources into the output directory.
///
/// # Errors
///
/// Returns [`ReportError::Build`] if the build fails, or
/// [`ReportError::Json`] if the summary cannot be serialized.
pub fn run(args: &BuildArgs, config: &SiteConfig) -> Result<(), ReportError> {
    let root = args.root.as_ref().unwrap_or(&config.root);
    let out = args.out.as_ref().unwrap_or(&config.out_dir);

    let summary = build_static(root, out, &config.sources)?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "Built {} file(s) into {}",
                summary.files,
                summary.out_dir.display()
            );
            for name in &summary.skipped {
                println!("  skipped missing source: {name}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}
