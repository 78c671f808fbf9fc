//! Error types for `psych-report`
//!
//! One top-level error aggregates the per-area errors and maps each of them
//! to a process exit code. Content-loading failures are recovered inside the
//! loader and only surface here when a caller asks for strict behavior.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `psych-report` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Preview server error (bind failed)
    pub const SERVE_ERROR: i32 = 4;

    /// Report content could not be loaded (strict render only)
    pub const LOAD_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `psych-report` operations.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report content could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Static-site build failed
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Preview server failed
    #[error(transparent)]
    Serve(#[from] ServeError),

    /// Invalid command-line usage detected after parsing
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Load(_) => ExitCode::LOAD_ERROR,
            Self::Build(BuildError::Io { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Build(_) | Self::Json(_) => ExitCode::ERROR,
            Self::Serve(_) => ExitCode::SERVE_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {}: {message}", .path.display())]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}: {}", summarize(.errors))]
    ValidationError {
        /// Path to the configuration file (or `<defaults>`)
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced configuration file not found
    #[error("file not found: {}", .path.display())]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration file exceeds the size limit
    #[error("configuration file {} is {size} bytes (limit: {limit})", .path.display())]
    TooLarge {
        /// Path to the configuration file
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Dotted path to the problematic field (e.g., "sources[1]")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - validation failure that prevents configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Load Errors
// ============================================================================

/// Failures of the two-tier content loader.
///
/// Every variant except [`LoadError::DefaultUnavailable`] is recovered by
/// falling back to the default resource. `DefaultUnavailable` is terminal
/// for the page load and switches the status notice to the error message.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Last path segment is not a well-formed report slug
    #[error("invalid report slug: {segment:?}")]
    InvalidSlug {
        /// The offending path segment, as it appeared in the URL
        segment: String,
    },

    /// Network or file-system failure before a response was read
    #[error("failed to fetch {resource}: {reason}")]
    Fetch {
        /// Resource path, e.g. `data/content.json`
        resource: String,
        /// Underlying failure
        reason: String,
    },

    /// Response arrived with a non-2xx status
    #[error("failed to fetch {resource}: HTTP {status}")]
    Status {
        /// Resource path
        resource: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body was not a valid content document
    #[error("failed to parse {resource}: {reason}")]
    Parse {
        /// Resource path
        resource: String,
        /// Parser message
        reason: String,
    },

    /// The default content itself could not be loaded
    #[error("default content unavailable: {source}")]
    DefaultUnavailable {
        /// The failure of the default fetch
        #[source]
        source: Box<LoadError>,
    },
}

impl LoadError {
    /// Returns `true` for the terminal failure of the fallback tier.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::DefaultUnavailable { .. })
    }
}

// ============================================================================
// Build Errors
// ============================================================================

/// Static-site build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Filesystem operation failed on a specific path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Output directory would clobber the project or one of its sources
    #[error("refusing to build into {}: {reason}", .out_dir.display())]
    UnsafeOutputDir {
        /// Requested output directory
        out_dir: PathBuf,
        /// Why the directory was rejected
        reason: String,
    },

    /// Source entry escapes the project root
    #[error("invalid source entry {name:?}: must be a relative path inside the project")]
    InvalidSource {
        /// The source entry as configured
        name: String,
    },
}

// ============================================================================
// Serve Errors
// ============================================================================

/// Preview server errors.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Failed to bind the listener
    #[error("bind failed on {addr}: {source}")]
    Bind {
        /// Requested bind address
        addr: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Site directory does not exist
    #[error("site directory not found: {} (run `psych-report build` first)", .0.display())]
    MissingSiteDir(PathBuf),

    /// Server loop terminated with an error
    #[error("server error: {0}")]
    Runtime(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `psych-report` operations.
pub type Result<T> = std::result::Result<T, ReportError>;

// ============================================================================
// Tests
// ============================================================================
