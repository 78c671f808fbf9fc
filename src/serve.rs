//! Local preview server for the built site.
//!
//! Serves the build output the way the static host does: real files are
//! returned as-is, and any unknown path that does not look like a file
//! (no `.` in its last segment) gets `index.html`, so report URLs such as
//! `/brave-otter-a1b2c3` reach the page and its loader.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::ServeError;

/// Preview server settings.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Directory to serve (usually the build output).
    pub site_dir: PathBuf,
    /// Address to bind to, e.g. `"127.0.0.1:8080"`.
    pub bind_addr: String,
    /// Site-relative directory whose files are sent uncached.
    pub data_dir: String,
}

/// How a request path maps onto the site directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// An existing file.
    File(PathBuf),
    /// The page shell, answering a route that is not a file.
    Shell(PathBuf),
    /// Nothing to serve.
    NotFound,
    /// The path tries to leave the site directory.
    Forbidden,
}

struct SiteState {
    site_dir: PathBuf,
    data_dir: String,
}

/// Maps a request path to what should be served.
pub async fn resolve_request(site_dir: &Path, path: &str) -> Resolved {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let plain = |s: &&str| {
        let mut components = Path::new(s).components();
        !s.contains('\\')
            && matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none()
    };
    if !segments.iter().all(plain) {
        return Resolved::Forbidden;
    }

    let shell = site_dir.join("index.html");
    let candidate = segments.iter().fold(site_dir.to_path_buf(), |p, s| p.join(s));

    match tokio::fs::metadata(&candidate).await {
        Ok(meta) if meta.is_file() => return Resolved::File(candidate),
        Ok(meta) if meta.is_dir() => {
            let index = candidate.join("index.html");
            if is_file(&index).await {
                return Resolved::File(index);
            }
        }
        _ => {}
    }

    let looks_like_file = segments.last().is_some_and(|s| s.contains('.'));
    if !looks_like_file && is_file(&shell).await {
        return Resolved::Shell(shell);
    }
    Resolved::NotFound
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Content type for a file, by extension. Text types carry a UTF-8 charset.
#[must_use]
pub fn content_type(path: &Path) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() == mime_guess::mime::TEXT && mime.get_param("charset").is_none() {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}

/// Builds the preview router over `site_dir`.
pub fn router(site_dir: PathBuf, data_dir: &str) -> Router {
    let state = Arc::new(SiteState {
        site_dir,
        data_dir: data_dir.trim_matches('/').to_string(),
    });
    Router::new()
        .route("/", get(serve_path))
        .route("/{*path}", get(serve_path))
        .with_state(state)
}

async fn serve_path(State(state): State<Arc<SiteState>>, uri: Uri) -> Response {
    let path = uri.path();
    let resolved = resolve_request(&state.site_dir, path).await;
    debug!(path, ?resolved, "request");

    let (file, no_cache) = match resolved {
        Resolved::File(file) => {
            let in_data = file
                .strip_prefix(&state.site_dir)
                .is_ok_and(|rel| rel.starts_with(&state.data_dir));
            (file, in_data)
        }
        Resolved::Shell(file) => (file, true),
        Resolved::NotFound => return (StatusCode::NOT_FOUND, "not found").into_response(),
        Resolved::Forbidden => return (StatusCode::BAD_REQUEST, "bad path").into_response(),
    };

    let bytes = match tokio::fs::read(&file).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %file.display(), error = %e, "read failed");
            return (StatusCode::NOT_FOUND, "not found").into_response();
        }
    };

    let mut response = ([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response();
    if no_cache {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    }
    response
}

/// Binds the preview server and starts serving in the background.
///
/// Returns the server task and the bound address (useful when binding to
/// port 0 in tests). The server stops when `cancel` fires.
///
/// # Errors
///
/// Returns [`ServeError::MissingSiteDir`] if the site directory does not
/// exist, or [`ServeError::Bind`] if the listener cannot bind.
pub async fn bind(
    config: ServeConfig,
    cancel: CancellationToken,
) -> Result<(JoinHandle<Result<(), ServeError>>, SocketAddr), ServeError> {
    if !tokio::fs::metadata(&config.site_dir)
        .await
        .is_ok_and(|m| m.is_dir())
    {
        return Err(ServeError::MissingSiteDir(config.site_dir));
    }

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;
    let bound_addr = listener.local_addr().map_err(|source| ServeError::Bind {
        addr: config.bind_addr.clone(),
        source,
    })?;

    let app = router(config.site_dir.clone(), &config.data_dir);
    let handle = tokio::spawn(async move {
        info!(%bound_addr, site = %config.site_dir.display(), "preview server started");
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(cancel.cancelled_owned())
            .await
            .map_err(|e| ServeError::Runtime(e.to_string()));
        debug!("preview server shut down");
        result
    });

    Ok((handle, bound_addr))
}
