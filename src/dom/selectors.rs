//! Selector contract between the renderer and the page markup.
//!
//! `index.html` must carry these hooks for content to show up; any that are
//! missing are skipped without error.

pub const WELCOME: &str = ".welcome-title";
pub const SUMMARY: &str = ".summary-text";

pub const ANIMAL_NAME: &str = ".animal-name";
pub const ANIMAL_DESCRIPTION: &str = ".animal-description";
pub const ANIMAL_IMAGE: &str = ".animal-image";

pub const SUPERPOWER_TITLE: &str = ".superpower-title";
pub const SUPERPOWER_DESCRIPTION: &str = ".superpower-description";

pub const SLIDER_BOX: &str = ".slider-box";
pub const SLIDER_TITLE: &str = ".slider-title";
pub const SLIDER_CONTENT: &str = ".slider-content";

pub const TRAIT_BOX: &str = ".trait-box";
pub const TRAIT_TITLE: &str = ".trait-title";
pub const TRAIT_LEVEL: &str = ".trait-level";
pub const TRAIT_DESCRIPTION: &str = ".trait-description";

/// Status notice element.
pub const STATUS: &str = "[data-status]";

/// Attribute on the status element holding the notice state.
pub const STATUS_ATTR: &str = "data-status";
