//! Configuration loader.
//!
//! Reads an optional YAML file, deserializes it onto the defaults, resolves
//! `root` against the file's directory and runs validation. Without a file
//! the defaults are validated and returned.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::schema::SiteConfig;
use crate::config::validation::{DEFAULT_MAX_PAGE_BOXES, Validator};
use crate::error::{ConfigError, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Limits applied while loading configuration.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum configuration file size in bytes.
    pub max_config_size: u64,
    /// Maximum number of slider boxes, and separately of trait boxes.
    pub max_page_boxes: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_config_size: env_or("PSYCH_REPORT_MAX_CONFIG_SIZE", 1024 * 1024),
            max_page_boxes: env_or("PSYCH_REPORT_MAX_PAGE_BOXES", DEFAULT_MAX_PAGE_BOXES),
        }
    }
}

/// A loaded, validated configuration plus any warnings raised on the way.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// The configuration.
    pub config: SiteConfig,
    /// Non-fatal validation issues.
    pub warnings: Vec<ValidationIssue>,
}

/// Configuration loader.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    limits: ConfigLimits,
}

impl ConfigLoader {
    /// Creates a loader with the given limits.
    #[must_use]
    pub const fn new(limits: ConfigLimits) -> Self {
        Self { limits }
    }

    /// Loads `path` if given, otherwise validates the defaults.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_file`] and [`ConfigLoader::defaults`].
    pub fn load(&self, path: Option<&Path>) -> Result<LoadResult, ConfigError> {
        match path {
            Some(path) => self.load_file(path),
            None => self.defaults(),
        }
    }

    /// Loads and validates a configuration file.
    ///
    /// A relative `root` in the file is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file cannot be read,
    /// [`ConfigError::TooLarge`] if it exceeds the size limit,
    /// [`ConfigError::ParseError`] for malformed YAML or unknown keys, and
    /// [`ConfigError::ValidationError`] when validation reports errors.
    pub fn load_file(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let meta = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if meta.len() > self.limits.max_config_size {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                limit: self.limits.max_config_size,
            });
        }

        let text = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        debug!(path = %path.display(), bytes = text.len(), "loading configuration");

        let mut config = parse(&text, path)?;
        if config.root.is_relative() {
            let base = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);
            config.root = base.join(&config.root);
        }

        self.finish(config, &path.display().to_string())
    }

    /// Loads configuration from a YAML string. `root` is left as written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooLarge`], [`ConfigError::ParseError`] or
    /// [`ConfigError::ValidationError`].
    pub fn load_str(&self, yaml: &str) -> Result<LoadResult, ConfigError> {
        let path = Path::new("<inline>");
        let size = yaml.len() as u64;
        if size > self.limits.max_config_size {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.limits.max_config_size,
            });
        }
        self.finish(parse(yaml, path)?, "<inline>")
    }

    /// Validates and returns the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the defaults fail
    /// validation, which only happens when they are edited badly.
    pub fn defaults(&self) -> Result<LoadResult, ConfigError> {
        self.finish(SiteConfig::default(), "<defaults>")
    }

    fn finish(&self, config: SiteConfig, path: &str) -> Result<LoadResult, ConfigError> {
        let result = Validator::with_max_page_boxes(self.limits.max_page_boxes).validate(&config);
        for warning in &result.warnings {
            warn!(config = path, "{warning}");
        }
        if !result.is_valid() {
            return Err(ConfigError::ValidationError {
                path: path.to_string(),
                errors: result.errors,
            });
        }
        Ok(LoadResult {
            config,
            warnings: result.warnings,
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn parse(text: &str, path: &Path) -> Result<SiteConfig, ConfigError> {
    // An empty or comment-only file is a null document, not a mapping.
    if text.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    }) {
        return Ok(SiteConfig::default());
    }

    serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
