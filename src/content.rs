//! Report content documents.
//!
//! A [`ContentDocument`] describes every text and image substitution for one
//! report. All fields are optional: a field that is absent leaves the
//! matching page element untouched. Unknown fields are ignored so that
//! documents produced by newer generators still load.

use serde::{Deserialize, Serialize};

/// The JSON payload for one report (`data/{slug}.json` or the default
/// `data/content.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Welcome heading text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome: Option<String>,

    /// Summary paragraph text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Spirit-animal card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal: Option<Animal>,

    /// Superpower card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superpower: Option<Superpower>,

    /// Slider boxes, matched to the page by position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sliders: Option<Vec<Slider>>,

    /// Trait boxes, matched to the page by position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<Vec<Trait>>,
}

/// Spirit-animal card content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    /// Animal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Animal description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Image URL shown as the card's background. Empty means "no image".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Animal {
    /// The image URL if it is set and non-empty.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.is_empty())
    }
}

/// Superpower card content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Superpower {
    /// Title markup. Inserted as HTML, the only field that is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Plain-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One slider box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slider {
    /// Slider heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Slider body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// One trait box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    /// Trait name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Trait level label, e.g. "High".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Trait description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContentDocument {
    /// Parses a document from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not a JSON object of
    /// the expected shape.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
