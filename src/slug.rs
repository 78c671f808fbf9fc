//! Report slug resolution.
//!
//! A report is addressed by the last non-empty segment of the page path,
//! e.g. `/brave-otter-a1b2c3`. The segment is lowercased and must look like
//! `word-word-xxxxxx`: two alphabetic words plus a six-character alphanumeric
//! suffix. A segment containing a `.` is a static asset, not a report.
//!
//! Resolution is pure and infallible: every path maps to exactly one
//! [`SlugResolution`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+-[a-z]+-[a-z0-9]{6}$").expect("valid regex"));

/// A normalized, validated report identifier.
///
/// Only [`resolve`] constructs one, so holding a `ReportSlug` means the
/// value is lowercase and matches the slug pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReportSlug(String);

impl ReportSlug {
    /// Returns the slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative path of the JSON document for this report under `data_dir`.
    #[must_use]
    pub fn resource(&self, data_dir: &str) -> String {
        format!("{}/{}.json", data_dir.trim_end_matches('/'), self.0)
    }
}

impl std::fmt::Display for ReportSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a path did or did not yield a slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugReason {
    /// The last segment is a well-formed slug.
    Valid,
    /// The last segment is present but malformed.
    Invalid,
}

/// Outcome of resolving a page path.
///
/// `(None, None)` means "no report requested": the site root, or a static
/// asset path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugResolution {
    /// The normalized slug, present only when `reason` is `Valid`.
    pub slug: Option<ReportSlug>,
    /// Classification of the last segment, absent when there is none.
    pub reason: Option<SlugReason>,
    /// The raw last segment, kept for diagnostics.
    #[serde(skip)]
    pub segment: Option<String>,
}

impl SlugResolution {
    const fn none() -> Self {
        Self {
            slug: None,
            reason: None,
            segment: None,
        }
    }
}

/// Resolves the report slug from a URL path.
///
/// The caller passes the path component only; query strings and fragments
/// are not stripped here.
#[must_use]
pub fn resolve(path: &str) -> SlugResolution {
    let Some(last) = path.split('/').filter(|s| !s.is_empty()).next_back() else {
        return SlugResolution::none();
    };

    if last.contains('.') {
        return SlugResolution::none();
    }

    let normalized = last.to_lowercase();
    if SLUG_PATTERN.is_match(&normalized) {
        SlugResolution {
            slug: Some(ReportSlug(normalized)),
            reason: Some(SlugReason::Valid),
            segment: Some(last.to_string()),
        }
    } else {
        SlugResolution {
            slug: None,
            reason: Some(SlugReason::Invalid),
            segment: Some(last.to_string()),
        }
    }
}

/// Strips a query string and fragment from a request target, leaving the path.
#[must_use]
pub fn path_component(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}
