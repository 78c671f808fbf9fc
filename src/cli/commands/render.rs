//! `render`: run one page load and print the result.
//!
//! Builds the report page in memory, runs the loader against a site
//! directory or a deployed URL, and prints the patched markup or the load
//! report. Load failures still produce a page (placeholders or sample
//! content) unless `--strict` is given.

use reqwest::Url;

use crate::cli::args::{RenderArgs, RenderFormat};
use crate::config::SiteConfig;
use crate::dom::{MemoryDom, report_page};
use crate::error::ReportError;
use crate::loader::http::create_http_client;
use crate::loader::{ContentLoader, ContentSource, DirSource, HttpSource, LoadOutcome, LoadReport};
use crate::slug;

/// Render the page for `args.path`.
///
/// # Errors
///
/// Returns [`ReportError::Usage`] for a malformed base URL,
/// [`ReportError::Load`] in strict mode when the requested report was not
/// shown, and [`ReportError::Json`] if the report cannot be serialized.
pub async fn run(args: &RenderArgs, config: &SiteConfig) -> Result<(), ReportError> {
    let path = slug::path_component(&args.path);
    let mut dom = report_page(config.page);

    let base_url = match (&args.root, &args.base_url) {
        (Some(_), _) => None,
        (None, Some(url)) => Some(url.as_str()),
        (None, None) => config.base_url.as_deref(),
    };

    let report = if let Some(url) = base_url {
        let base = Url::parse(url)
            .map_err(|e| ReportError::Usage(format!("invalid base URL {url:?}: {e}")))?;
        let source = HttpSource::new(create_http_client(), base);
        load(source, config, path, &mut dom).await
    } else {
        let root = args.root.clone().unwrap_or_else(|| config.root.clone());
        load(DirSource::new(root), config, path, &mut dom).await
    };

    match args.format {
        RenderFormat::Html => print!("{}", dom.to_html()),
        RenderFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if args.strict && report.outcome != LoadOutcome::Resolved {
        let mut failures = report.failures;
        if let Some(failure) = failures.pop() {
            return Err(failure.into());
        }
    }
    Ok(())
}

async fn load<S: ContentSource>(
    source: S,
    config: &SiteConfig,
    path: &str,
    dom: &mut MemoryDom,
) -> LoadReport {
    ContentLoader::new(source)
        .with_layout(&config.data_dir, &config.default_resource)
        .load(path, dom)
        .await
}
