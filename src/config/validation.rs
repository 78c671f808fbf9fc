//! Site configuration validation.
//!
//! Collects every issue rather than stopping at the first, so one run of
//! `psych-report build` reports everything wrong with a config file.

use std::collections::HashSet;
use std::path::Path;

use reqwest::Url;

use crate::config::schema::SiteConfig;
use crate::error::{Severity, ValidationIssue};
use crate::site::is_plain_relative;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Largest slider or trait box count accepted by default.
pub const DEFAULT_MAX_PAGE_BOXES: usize = 64;

/// Configuration validator.
#[derive(Debug)]
pub struct Validator {
    max_page_boxes: usize,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a new validator with the default page box limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_page_boxes(DEFAULT_MAX_PAGE_BOXES)
    }

    /// Creates a validator allowing at most `max` boxes of each kind.
    #[must_use]
    pub const fn with_max_page_boxes(max: usize) -> Self {
        Self {
            max_page_boxes: max,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Validates a configuration and returns every issue found.
    pub fn validate(&mut self, config: &SiteConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_sources(&config.sources);
        self.validate_out_dir(&config.out_dir);

        if !is_plain_relative(&config.data_dir) {
            self.error("data_dir", "must be a relative path inside the site");
        }
        if config.default_resource.is_empty()
            || config.default_resource.contains('/')
            || config.default_resource.contains('\\')
        {
            self.error("default_resource", "must be a plain file name");
        }

        self.validate_page(config.page.sliders, config.page.traits);

        if config.serve.bind.trim().is_empty() {
            self.error("serve.bind", "must not be empty");
        }

        if let Some(url) = &config.base_url {
            self.validate_base_url(url);
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_sources(&mut self, sources: &[String]) {
        if sources.is_empty() {
            self.error("sources", "at least one source is required");
            return;
        }

        let mut seen = HashSet::new();
        for (i, source) in sources.iter().enumerate() {
            let path = format!("sources[{i}]");
            if !is_plain_relative(source) {
                self.error(&path, "must be a relative path inside the project");
            } else if !seen.insert(source.as_str()) {
                self.warning(&path, &format!("duplicate source '{source}'"));
            }
        }
    }

    fn validate_page(&mut self, sliders: usize, traits: usize) {
        let max = self.max_page_boxes;
        if sliders > max {
            self.error("page.sliders", &format!("{sliders} exceeds the limit of {max}"));
        }
        if traits > max {
            self.error("page.traits", &format!("{traits} exceeds the limit of {max}"));
        }
        if sliders == 0 && traits == 0 {
            self.warning("page", "page has no slider or trait boxes");
        }
    }

    fn validate_base_url(&mut self, url: &str) {
        match Url::parse(url) {
            Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
                self.error("base_url", "must use http or https");
            }
            Ok(parsed) if !parsed.has_host() => {
                self.error("base_url", "must include a host");
            }
            Ok(_) => {}
            Err(e) => self.error("base_url", &format!("invalid URL: {e}")),
        }
    }

    fn validate_out_dir(&mut self, out_dir: &Path) {
        let as_str = out_dir.to_string_lossy();
        let trimmed = as_str.trim_end_matches('/');
        if trimmed.is_empty() && !out_dir.has_root() {
            self.error("out_dir", "must not be empty");
        } else if trimmed == "." || trimmed == ".." {
            self.error("out_dir", "must not be the project root or its parent");
        }
    }

    fn error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}
