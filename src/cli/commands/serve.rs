//! `serve`: local preview of the built site.

use tokio_util::sync::CancellationToken;

use crate::cli::args::ServeArgs;
use crate::config::SiteConfig;
use crate::error::{ReportError, ServeError};
use crate::serve::{ServeConfig, bind};

/// Serve the site until `cancel` fires.
///
/// # Errors
///
/// Returns [`ReportError::Serve`] if the site directory is missing, the
/// address cannot be bound, or the server fails while running.
pub async fn run(
    args: &ServeArgs,
    config: &SiteConfig,
    cancel: CancellationToken,
) -> Result<(), ReportError> {
    let serve_config = ServeConfig {
        site_dir: args.dir.clone().unwrap_or_else(|| config.out_path()),
        bind_addr: args
            .bind
            .clone()
            .unwrap_or_else(|| config.serve.bind.clone()),
        data_dir: config.data_dir.clone(),
    };
    let site_dir = serve_config.site_dir.clone();

    let (handle, addr) = bind(serve_config, cancel).await?;
    println!("Serving {} at http://{addr}/", site_dir.display());

    handle
        .await
        .map_err(|e| ServeError::Runtime(e.to_string()))??;
    Ok(())
}
