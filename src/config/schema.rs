//! Site configuration schema.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the standard layout: `index.html`, `assets/` and `data/` copied into
//! `dist/`, reports read from `data/`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dom::PageLayout;
use crate::loader::{DEFAULT_DATA_DIR, DEFAULT_RESOURCE};
use crate::site::{DEFAULT_OUT_DIR, DEFAULT_SOURCES};

/// Default preview server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Project root holding the site sources. Relative to the config file.
    pub root: PathBuf,

    /// Build output directory. Relative to `root`.
    pub out_dir: PathBuf,

    /// Top-level paths copied into the build output.
    pub sources: Vec<String>,

    /// Site-relative directory holding report documents.
    pub data_dir: String,

    /// Default document name inside `data_dir`.
    pub default_resource: String,

    /// Number of repeated boxes on the page.
    pub page: PageLayout,

    /// Preview server settings.
    pub serve: ServeSettings,

    /// Deployed site URL, used by `render` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            sources: DEFAULT_SOURCES.iter().map(ToString::to_string).collect(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            default_resource: DEFAULT_RESOURCE.to_string(),
            page: PageLayout::default(),
            serve: ServeSettings::default(),
            base_url: None,
        }
    }
}

impl SiteConfig {
    /// Absolute-or-root-relative build output directory.
    #[must_use]
    pub fn out_path(&self) -> PathBuf {
        self.root.join(&self.out_dir)
    }
}

/// Preview server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeSettings {
    /// Address to bind, `host:port`.
    pub bind: String,
}

impl Default for ServeSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        let config: SiteConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.sources, vec!["index.html", "assets", "data"]);
        assert_eq!(config.out_path(), PathBuf::from("./dist"));
    }

    #[test]
    fn partial_override() {
        let config: SiteConfig = serde_yaml::from_str(
            "out_dir: public\npage:\n  traits: 6\nserve:\n  bind: 0.0.0.0:3000\n",
        )
        .unwrap();
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.page.traits, 6);
        assert_eq!(config.page.sliders, 4);
        assert_eq!(config.serve.bind, "0.0.0.0:3000");
        assert_eq!(config.data_dir, "data");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<SiteConfig>("outdir: x").is_err());
    }
}
