//! Site configuration.
//!
//! An optional YAML file (`--config` or `PSYCH_REPORT_CONFIG`) describes the
//! project layout: which paths make up the site, where the build goes, where
//! report documents live and how many slider and trait boxes the page has.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult};
pub use schema::{DEFAULT_BIND, ServeSettings, SiteConfig};
pub use validation::{ValidationResult, Validator};
