//! Copies a [`ContentDocument`] into the report page.
//!
//! Rendering is best-effort: a field whose target element is missing is
//! skipped, never reported. Every write overwrites, so rendering the same
//! document twice leaves the page exactly as rendering it once.

use serde::Serialize;

use crate::content::{Animal, ContentDocument, Slider, Superpower, Trait};
use crate::dom::{Dom, selectors};

/// Text shown when a sample report replaces the requested one.
pub const FALLBACK_NOTICE: &str =
    "We couldn't find that report, so a sample report is shown instead.";

/// Text shown when no content could be loaded at all.
pub const ERROR_NOTICE: &str = "We couldn't load this report. Please try again later.";

/// State of the page's status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Notice {
    /// No notice.
    Hidden,
    /// Sample content is shown in place of the requested report.
    Fallback,
    /// Nothing could be loaded.
    Error,
}

impl Notice {
    /// Value stored in the status element's state attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Fallback => "fallback",
            Self::Error => "error",
        }
    }

    /// Message shown to the reader.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Hidden => "",
            Self::Fallback => FALLBACK_NOTICE,
            Self::Error => ERROR_NOTICE,
        }
    }
}

/// Shows or clears the status notice.
pub fn show_notice<D: Dom>(dom: &mut D, notice: Notice) {
    let Some(status) = dom.query(selectors::STATUS) else {
        return;
    };
    dom.set_attribute(status, selectors::STATUS_ATTR, notice.as_str());
    dom.set_text(status, notice.message());
}

/// Writes every present field of `doc` into its page element.
pub fn apply_content<D: Dom>(dom: &mut D, doc: &ContentDocument) {
    if let Some(welcome) = &doc.welcome {
        set_text(dom, selectors::WELCOME, welcome);
    }
    if let Some(summary) = &doc.summary {
        set_text(dom, selectors::SUMMARY, summary);
    }
    if let Some(animal) = &doc.animal {
        apply_animal(dom, animal);
    }
    if let Some(superpower) = &doc.superpower {
        apply_superpower(dom, superpower);
    }
    if let Some(sliders) = &doc.sliders {
        apply_sliders(dom, sliders);
    }
    if let Some(traits) = &doc.traits {
        apply_traits(dom, traits);
    }
}

fn set_text<D: Dom>(dom: &mut D, selector: &str, text: &str) {
    if let Some(node) = dom.query(selector) {
        dom.set_text(node, text);
    }
}

fn set_text_in<D: Dom>(dom: &mut D, scope: D::Node, selector: &str, text: Option<&str>) {
    let Some(text) = text else {
        return;
    };
    if let Some(node) = dom.query_in(scope, selector) {
        dom.set_text(node, text);
    }
}

fn apply_animal<D: Dom>(dom: &mut D, animal: &Animal) {
    if let Some(name) = &animal.name {
        set_text(dom, selectors::ANIMAL_NAME, name);
    }
    if let Some(description) = &animal.description {
        set_text(dom, selectors::ANIMAL_DESCRIPTION, description);
    }
    if let Some(image) = dom.query(selectors::ANIMAL_IMAGE) {
        match animal.image_url() {
            Some(url) => dom.set_style(image, "background-image", &css_url(url)),
            None => dom.remove_style(image, "background-image"),
        }
    }
}

fn apply_superpower<D: Dom>(dom: &mut D, superpower: &Superpower) {
    if let Some(title) = &superpower.title {
        if let Some(node) = dom.query(selectors::SUPERPOWER_TITLE) {
            dom.set_html(node, title);
        }
    }
    if let Some(description) = &superpower.description {
        set_text(dom, selectors::SUPERPOWER_DESCRIPTION, description);
    }
}

fn apply_sliders<D: Dom>(dom: &mut D, sliders: &[Slider]) {
    let boxes = dom.query_all(selectors::SLIDER_BOX);
    for (slot, slider) in boxes.into_iter().zip(sliders) {
        set_text_in(dom, slot, selectors::SLIDER_TITLE, slider.title.as_deref());
        set_text_in(
            dom,
            slot,
            selectors::SLIDER_CONTENT,
            slider.content.as_deref(),
        );
    }
}

fn apply_traits<D: Dom>(dom: &mut D, traits: &[Trait]) {
    let boxes = dom.query_all(selectors::TRAIT_BOX);
    for (slot, item) in boxes.into_iter().zip(traits) {
        set_text_in(dom, slot, selectors::TRAIT_TITLE, item.title.as_deref());
        set_text_in(dom, slot, selectors::TRAIT_LEVEL, item.level.as_deref());
        set_text_in(
            dom,
            slot,
            selectors::TRAIT_DESCRIPTION,
            item.description.as_deref(),
        );
    }
}

/// Quotes a URL for a CSS `url()` value.
///
/// Line breaks become CSS hex escapes, since a raw newline ends the string.
fn css_url(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len() + 2);
    for c in url.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\a "),
            '\r' => escaped.push_str("\\d "),
            c => escaped.push(c),
        }
    }
    format!("url(\"{escaped}\")")
}
