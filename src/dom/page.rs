//! Placeholder markup of the report page.
//!
//! Mirrors the structure `index.html` ships with: every hook from
//! [`selectors`](super::selectors) exists once, except slider and trait
//! boxes which repeat per [`PageLayout`].

use serde::{Deserialize, Serialize};

use super::memory::{MemoryDom, NodeId};
use super::selectors::STATUS_ATTR;
use super::Dom;

/// Number of repeated boxes on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Slider boxes.
    pub sliders: usize,
    /// Trait boxes.
    pub traits: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            sliders: 4,
            traits: 4,
        }
    }
}

pub const WELCOME_PLACEHOLDER: &str = "Welcome to your report";
pub const SUMMARY_PLACEHOLDER: &str = "Your personality summary is loading.";
pub const ANIMAL_NAME_PLACEHOLDER: &str = "Your spirit animal";
pub const ANIMAL_DESCRIPTION_PLACEHOLDER: &str = "Discover the animal that matches your style.";
pub const SUPERPOWER_TITLE_PLACEHOLDER: &str = "Your superpower";
pub const SUPERPOWER_DESCRIPTION_PLACEHOLDER: &str = "What you do better than anyone else.";
pub const SLIDER_TITLE_PLACEHOLDER: &str = "Dimension";
pub const SLIDER_CONTENT_PLACEHOLDER: &str = "Where you sit on this scale.";
pub const TRAIT_TITLE_PLACEHOLDER: &str = "Trait";
pub const TRAIT_LEVEL_PLACEHOLDER: &str = "-";
pub const TRAIT_DESCRIPTION_PLACEHOLDER: &str = "How this trait shows up for you.";

/// Builds the report page with its placeholder text.
#[must_use]
pub fn report_page(layout: PageLayout) -> MemoryDom {
    let mut dom = MemoryDom::new("main");
    let root = dom.root();

    let status = dom.append(root, "div", &["report-status"], "");
    dom.set_attribute(status, STATUS_ATTR, "hidden");
    dom.set_attribute(status, "role", "status");

    let hero = dom.append(root, "header", &["hero"], "");
    dom.append(hero, "h1", &["welcome-title"], WELCOME_PLACEHOLDER);
    dom.append(hero, "p", &["summary-text"], SUMMARY_PLACEHOLDER);

    let animal = dom.append(root, "section", &["animal-card"], "");
    dom.append(animal, "div", &["animal-image"], "");
    dom.append(animal, "h2", &["animal-name"], ANIMAL_NAME_PLACEHOLDER);
    dom.append(
        animal,
        "p",
        &["animal-description"],
        ANIMAL_DESCRIPTION_PLACEHOLDER,
    );

    let superpower = dom.append(root, "section", &["superpower-card"], "");
    dom.append(
        superpower,
        "h2",
        &["superpower-title"],
        SUPERPOWER_TITLE_PLACEHOLDER,
    );
    dom.append(
        superpower,
        "p",
        &["superpower-description"],
        SUPERPOWER_DESCRIPTION_PLACEHOLDER,
    );

    let sliders = dom.append(root, "section", &["sliders"], "");
    for _ in 0..layout.sliders {
        append_slider(&mut dom, sliders);
    }

    let traits = dom.append(root, "section", &["traits"], "");
    for _ in 0..layout.traits {
        append_trait(&mut dom, traits);
    }

    dom
}

fn append_slider(dom: &mut MemoryDom, parent: NodeId) {
    let slider = dom.append(parent, "div", &["slider-box"], "");
    dom.append(slider, "h3", &["slider-title"], SLIDER_TITLE_PLACEHOLDER);
    dom.append(slider, "p", &["slider-content"], SLIDER_CONTENT_PLACEHOLDER);
}

fn append_trait(dom: &mut MemoryDom, parent: NodeId) {
    let item = dom.append(parent, "div", &["trait-box"], "");
    dom.append(item, "h3", &["trait-title"], TRAIT_TITLE_PLACEHOLDER);
    dom.append(item, "span", &["trait-level"], TRAIT_LEVEL_PLACEHOLDER);
    dom.append(
        item,
        "p",
        &["trait-description"],
        TRAIT_DESCRIPTION_PLACEHOLDER,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::selectors;

    #[test]
    fn every_single_hook_exists_once() {
        let dom = report_page(PageLayout::default());
        for selector in [
            selectors::WELCOME,
            selectors::SUMMARY,
            selectors::ANIMAL_NAME,
            selectors::ANIMAL_DESCRIPTION,
            selectors::ANIMAL_IMAGE,
            selectors::SUPERPOWER_TITLE,
            selectors::SUPERPOWER_DESCRIPTION,
            selectors::STATUS,
        ] {
            assert_eq!(dom.query_all(selector).len(), 1, "{selector}");
        }
    }

    #[test]
    fn boxes_follow_layout() {
        let dom = report_page(PageLayout {
            sliders: 2,
            traits: 5,
        });
        assert_eq!(dom.query_all(selectors::SLIDER_BOX).len(), 2);
        assert_eq!(dom.query_all(selectors::TRAIT_BOX).len(), 5);
        for item in dom.query_all(selectors::TRAIT_BOX) {
            assert!(dom.query_in(item, selectors::TRAIT_LEVEL).is_some());
        }
    }

    #[test]
    fn status_starts_hidden() {
        let dom = report_page(PageLayout::default());
        let status = dom.query(selectors::STATUS).unwrap();
        assert_eq!(dom.attribute(status, selectors::STATUS_ATTR), Some("hidden"));
        assert_eq!(dom.text_content(status), "");
    }

    #[test]
    fn layout_deserializes_with_defaults() {
        let layout: PageLayout = serde_yaml::from_str("traits: 6").unwrap();
        assert_eq!(
            layout,
            PageLayout {
                sliders: 4,
                traits: 6
            }
        );
    }
}
