//! `resolve`: report slug for a page path.

use serde_json::json;

use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::config::SiteConfig;
use crate::error::ReportError;
use crate::slug::{self, SlugReason};

/// Print which report, if any, `args.path` asks for.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if JSON output cannot be serialized.
pub fn run(args: &ResolveArgs, config: &SiteConfig) -> Result<(), ReportError> {
    let resolution = slug::resolve(slug::path_component(&args.path));
    let resource = resolution
        .slug
        .as_ref()
        .map(|s| s.resource(&config.data_dir));

    match args.format {
        OutputFormat::Human => match (&resolution.slug, resolution.reason) {
            (Some(slug), _) => {
                println!("slug:     {slug}");
                println!("resource: {}", resource.unwrap_or_default());
            }
            (None, Some(SlugReason::Invalid)) => {
                println!(
                    "invalid slug: {}",
                    resolution.segment.as_deref().unwrap_or_default()
                );
            }
            (None, _) => println!("no report requested"),
        },
        OutputFormat::Json => {
            let value = json!({
                "slug": resolution.slug,
                "reason": resolution.reason,
                "resource": resource,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
