//! Two-tier report loader.
//!
//! One page load runs one [`ContentLoader::load`] call:
//!
//! 1. Resolve the slug from the page path.
//! 2. Valid slug: fetch `data/{slug}.json`. On success clear the notice,
//!    apply the document and stop.
//! 3. Otherwise fetch the default `data/content.json`. On success apply it
//!    and show the fallback notice if a report was requested (invalid slug
//!    or failed fetch), or clear the notice if none was.
//! 4. If the default fails too, show the error notice and leave the page's
//!    placeholders in place.
//!
//! The two fetches are sequential; there are no retries and no cancellation.

pub mod dir;
pub mod http;

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use tracing::{debug, error, info, warn};

use crate::content::ContentDocument;
use crate::dom::Dom;
use crate::error::LoadError;
use crate::render::{Notice, apply_content, show_notice};
use crate::slug::{self, ReportSlug, SlugReason};

pub use dir::DirSource;
pub use http::HttpSource;

/// Default directory holding report documents, relative to the site root.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default document name inside the data directory.
pub const DEFAULT_RESOURCE: &str = "content.json";

/// Where report documents come from.
///
/// `resource` is a site-relative path such as `data/content.json`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches and parses one document, bypassing any cache.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`], [`LoadError::Status`] or
    /// [`LoadError::Parse`].
    async fn fetch(&self, resource: &str) -> Result<ContentDocument, LoadError>;

    /// Short description for logs, e.g. the base URL.
    fn describe(&self) -> String;
}

/// Terminal state of a page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOutcome {
    /// The requested content (or the default, when none was requested) is shown.
    Resolved,
    /// Default content is shown in place of the requested report.
    Fallback,
    /// Nothing could be loaded; placeholders remain.
    Error,
}

/// What one page load did.
#[derive(Debug, Serialize)]
pub struct LoadReport {
    /// Terminal state.
    pub outcome: LoadOutcome,
    /// Slug requested by the path, if valid.
    pub slug: Option<ReportSlug>,
    /// Slug classification.
    pub reason: Option<SlugReason>,
    /// Resource whose document was applied.
    pub applied: Option<String>,
    /// Final notice state.
    pub notice: Notice,
    /// Failures in the order they happened.
    #[serde(serialize_with = "serialize_failures")]
    pub failures: Vec<LoadError>,
}

impl LoadReport {
    /// The terminal failure, if the default tier failed.
    #[must_use]
    pub fn terminal_failure(&self) -> Option<&LoadError> {
        self.failures.iter().find(|e| e.is_terminal())
    }
}

fn serialize_failures<S: Serializer>(failures: &[LoadError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(failures.iter().map(ToString::to_string))
}

/// Drives the fetch-then-render sequence against a [`ContentSource`].
#[derive(Debug)]
pub struct ContentLoader<S> {
    source: S,
    data_dir: String,
    default_resource: String,
}

impl<S: ContentSource> ContentLoader<S> {
    /// Creates a loader using the default `data/` layout.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            data_dir: DEFAULT_DATA_DIR.to_string(),
            default_resource: DEFAULT_RESOURCE.to_string(),
        }
    }

    /// Overrides the data directory and default document name.
    #[must_use]
    pub fn with_layout(mut self, data_dir: &str, default_resource: &str) -> Self {
        self.data_dir = data_dir.trim_end_matches('/').to_string();
        self.default_resource = default_resource.to_string();
        self
    }

    /// Site-relative path of the default document.
    #[must_use]
    pub fn default_resource(&self) -> String {
        format!("{}/{}", self.data_dir, self.default_resource)
    }

    /// Runs one page load for `path` and patches `dom` accordingly.
    pub async fn load<D: Dom>(&self, path: &str, dom: &mut D) -> LoadReport {
        let resolution = slug::resolve(path);
        let mut failures = Vec::new();

        debug!(path, source = %self.source.describe(), "loading report");

        let show_fallback = match (&resolution.slug, resolution.reason) {
            (Some(slug), _) => {
                let resource = slug.resource(&self.data_dir);
                match self.source.fetch(&resource).await {
                    Ok(doc) => {
                        show_notice(dom, Notice::Hidden);
                        apply_content(dom, &doc);
                        info!(%slug, %resource, "report loaded");
                        return LoadReport {
                            outcome: LoadOutcome::Resolved,
                            slug: resolution.slug,
                            reason: resolution.reason,
                            applied: Some(resource),
                            notice: Notice::Hidden,
                            failures,
                        };
                    }
                    Err(e) => {
                        warn!(%slug, error = %e, "report unavailable, showing sample");
                        failures.push(e);
                        true
                    }
                }
            }
            (None, Some(SlugReason::Invalid)) => {
                let segment = resolution.segment.clone().unwrap_or_default();
                warn!(segment = %segment, "invalid report slug, showing sample");
                failures.push(LoadError::InvalidSlug { segment });
                true
            }
            (None, _) => false,
        };

        let resource = self.default_resource();
        match self.source.fetch(&resource).await {
            Ok(doc) => {
                apply_content(dom, &doc);
                let (notice, outcome) = if show_fallback {
                    (Notice::Fallback, LoadOutcome::Fallback)
                } else {
                    (Notice::Hidden, LoadOutcome::Resolved)
                };
                show_notice(dom, notice);
                info!(%resource, ?outcome, "default content loaded");
                LoadReport {
                    outcome,
                    slug: resolution.slug,
                    reason: resolution.reason,
                    applied: Some(resource),
                    notice,
                    failures,
                }
            }
            Err(e) => {
                error!(%resource, error = %e, "could not load report content");
                show_notice(dom, Notice::Error);
                failures.push(LoadError::DefaultUnavailable {
                    source: Box::new(e),
                });
                LoadReport {
                    outcome: LoadOutcome::Error,
                    slug: resolution.slug,
                    reason: resolution.reason,
                    applied: None,
                    notice: Notice::Error,
                    failures,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::dom::page::WELCOME_PLACEHOLDER;
    use crate::dom::{MemoryDom, PageLayout, report_page, selectors};
    use crate::render::{ERROR_NOTICE, FALLBACK_NOTICE};

    /// Serves canned documents and records every request.
    #[derive(Default)]
    struct FakeSource {
        docs: HashMap<String, ContentDocument>,
        broken: Vec<String>,
        unreachable: Vec<String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn with(mut self, resource: &str, welcome: &str) -> Self {
            self.docs.insert(
                resource.to_string(),
                ContentDocument {
                    welcome: Some(welcome.to_string()),
                    ..ContentDocument::default()
                },
            );
            self
        }

        fn with_broken(mut self, resource: &str) -> Self {
            self.broken.push(resource.to_string());
            self
        }

        fn with_unreachable(mut self, resource: &str) -> Self {
            self.unreachable.push(resource.to_string());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentSource for FakeSource {
        async fn fetch(&self, resource: &str) -> Result<ContentDocument, LoadError> {
            self.requests.lock().unwrap().push(resource.to_string());
            if self.unreachable.iter().any(|r| r == resource) {
                return Err(LoadError::Fetch {
                    resource: resource.to_string(),
                    reason: "connection refused".to_string(),
                });
            }
            if self.broken.iter().any(|r| r == resource) {
                return Err(LoadError::Parse {
                    resource: resource.to_string(),
                    reason: "expected value at line 1 column 1".to_string(),
                });
            }
            self.docs
                .get(resource)
                .cloned()
                .ok_or_else(|| LoadError::Status {
                    resource: resource.to_string(),
                    status: 404,
                })
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn page() -> MemoryDom {
        report_page(PageLayout::default())
    }

    fn welcome(dom: &MemoryDom) -> String {
        dom.text_content(dom.query(selectors::WELCOME).unwrap())
    }

    fn status(dom: &MemoryDom) -> (String, String) {
        let node = dom.query(selectors::STATUS).unwrap();
        (
            dom.attribute(node, selectors::STATUS_ATTR)
                .unwrap()
                .to_string(),
            dom.text_content(node),
        )
    }

    #[tokio::test]
    async fn root_loads_default_without_notice() {
        let loader = ContentLoader::new(FakeSource::default().with("data/content.json", "Sample"));
        let mut dom = page();
        let report = loader.load("/", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Resolved);
        assert_eq!(report.applied.as_deref(), Some("data/content.json"));
        assert_eq!(report.notice, Notice::Hidden);
        assert!(report.failures.is_empty());
        assert_eq!(welcome(&dom), "Sample");
        assert_eq!(status(&dom), ("hidden".to_string(), String::new()));
        assert_eq!(loader.source.requests(), vec!["data/content.json"]);
    }

    #[tokio::test]
    async fn valid_slug_loads_report() {
        let loader = ContentLoader::new(
            FakeSource::default()
                .with("data/content.json", "Sample")
                .with("data/brave-otter-a1b2c3.json", "Hi Otter"),
        );
        let mut dom = page();
        let report = loader.load("/brave-otter-a1b2c3", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Resolved);
        assert_eq!(report.slug.unwrap().as_str(), "brave-otter-a1b2c3");
        assert_eq!(welcome(&dom), "Hi Otter");
        assert_eq!(status(&dom).0, "hidden");
        assert_eq!(
            loader.source.requests(),
            vec!["data/brave-otter-a1b2c3.json"]
        );
    }

    #[tokio::test]
    async fn missing_report_falls_back_with_notice() {
        let loader = ContentLoader::new(FakeSource::default().with("data/content.json", "Sample"));
        let mut dom = page();
        let report = loader.load("/brave-otter-a1b2c3", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Fallback);
        assert_eq!(report.notice, Notice::Fallback);
        assert!(matches!(
            report.failures.as_slice(),
            [LoadError::Status { status: 404, .. }]
        ));
        assert_eq!(welcome(&dom), "Sample");
        assert_eq!(
            status(&dom),
            ("fallback".to_string(), FALLBACK_NOTICE.to_string())
        );
        assert_eq!(
            loader.source.requests(),
            vec!["data/brave-otter-a1b2c3.json", "data/content.json"]
        );
    }

    #[tokio::test]
    async fn unparseable_report_falls_back() {
        let loader = ContentLoader::new(
            FakeSource::default()
                .with("data/content.json", "Sample")
                .with_broken("data/brave-otter-a1b2c3.json"),
        );
        let mut dom = page();
        let report = loader.load("/brave-otter-a1b2c3", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Fallback);
        assert!(matches!(report.failures[0], LoadError::Parse { .. }));
        assert_eq!(welcome(&dom), "Sample");
    }

    #[tokio::test]
    async fn network_failure_falls_back() {
        let loader = ContentLoader::new(
            FakeSource::default()
                .with("data/content.json", "Sample")
                .with_unreachable("data/brave-otter-a1b2c3.json"),
        );
        let mut dom = page();
        let report = loader.load("/brave-otter-a1b2c3", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Fallback);
        assert!(matches!(
            report.failures.as_slice(),
            [LoadError::Fetch { resource, .. }] if resource == "data/brave-otter-a1b2c3.json"
        ));
        assert_eq!(welcome(&dom), "Sample");
        assert_eq!(
            status(&dom),
            ("fallback".to_string(), FALLBACK_NOTICE.to_string())
        );
    }

    #[tokio::test]
    async fn valid_report_clears_existing_notice() {
        let loader = ContentLoader::new(
            FakeSource::default()
                .with("data/content.json", "Sample")
                .with("data/brave-otter-a1b2c3.json", "Hi Otter"),
        );
        let mut dom = page();
        show_notice(&mut dom, Notice::Error);
        assert_eq!(status(&dom).0, "error");

        let report = loader.load("/brave-otter-a1b2c3", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Resolved);
        assert_eq!(report.notice, Notice::Hidden);
        assert_eq!(status(&dom), ("hidden".to_string(), String::new()));
        assert_eq!(welcome(&dom), "Hi Otter");
    }

    #[tokio::test]
    async fn invalid_slug_skips_report_fetch() {
        let loader = ContentLoader::new(FakeSource::default().with("data/content.json", "Sample"));
        let mut dom = page();
        let report = loader.load("/Not A Slug!", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Fallback);
        assert_eq!(report.reason, Some(SlugReason::Invalid));
        assert!(matches!(
            &report.failures[0],
            LoadError::InvalidSlug { segment } if segment == "Not A Slug!"
        ));
        assert_eq!(status(&dom).0, "fallback");
        assert_eq!(loader.source.requests(), vec!["data/content.json"]);
    }

    #[tokio::test]
    async fn static_asset_path_loads_default_quietly() {
        let loader = ContentLoader::new(FakeSource::default().with("data/content.json", "Sample"));
        let mut dom = page();
        let report = loader.load("/report.pdf", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Resolved);
        assert_eq!(report.reason, None);
        assert_eq!(status(&dom).0, "hidden");
    }

    #[tokio::test]
    async fn both_tiers_failing_shows_error_and_keeps_placeholders() {
        let loader = ContentLoader::new(FakeSource::default());
        let mut dom = page();
        let before = dom.clone();
        let report = loader.load("/brave-otter-a1b2c3", &mut dom).await;

        assert_eq!(report.outcome, LoadOutcome::Error);
        assert_eq!(report.applied, None);
        assert_eq!(report.failures.len(), 2);
        assert!(report.terminal_failure().is_some());
        assert_eq!(welcome(&dom), WELCOME_PLACEHOLDER);
        assert_eq!(
            status(&dom),
            ("error".to_string(), ERROR_NOTICE.to_string())
        );

        // Only the status element changed.
        let mut expected = before;
        show_notice(&mut expected, Notice::Error);
        assert_eq!(dom, expected);
    }

    #[tokio::test]
    async fn default_failure_from_root_is_error() {
        let loader = ContentLoader::new(FakeSource::default().with_broken("data/content.json"));
        let mut dom = page();
        let report = loader.load("/", &mut dom).await;
        assert_eq!(report.outcome, LoadOutcome::Error);
        assert!(matches!(
            report.terminal_failure(),
            Some(LoadError::DefaultUnavailable { source }) if matches!(**source, LoadError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn custom_layout_paths() {
        let loader = ContentLoader::new(
            FakeSource::default()
                .with("reports/sample.json", "Sample")
                .with("reports/calm-heron-zz9900.json", "Heron"),
        )
        .with_layout("reports/", "sample.json");
        assert_eq!(loader.default_resource(), "reports/sample.json");

        let mut dom = page();
        let report = loader.load("/calm-heron-zz9900", &mut dom).await;
        assert_eq!(report.applied.as_deref(), Some("reports/calm-heron-zz9900.json"));
        assert_eq!(welcome(&dom), "Heron");
    }

    #[tokio::test]
    async fn report_serializes_failures_as_messages() {
        let loader = ContentLoader::new(FakeSource::default().with("data/content.json", "Sample"));
        let mut dom = page();
        let report = loader.load("/brave-otter-a1b2c3", &mut dom).await;
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "fallback");
        assert_eq!(json["notice"], "fallback");
        assert_eq!(json["slug"], "brave-otter-a1b2c3");
        assert_eq!(json["reason"], "valid");
        assert!(
            json["failures"][0]
                .as_str()
                .unwrap()
                .contains("HTTP 404")
        );
    }
}
