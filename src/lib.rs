//! `psych-report`: a static personality report page.
//!
//! One page, many reports. The page path names a report (`/brave-otter-a1b2c3`),
//! the [`loader`] fetches `data/{slug}.json` and falls back to the sample
//! `data/content.json`, and the [`render`] module copies the document into the
//! page. The [`site`] build copies the page, its assets and its data into a
//! deployable directory, and [`serve`] previews that directory locally.

pub mod cli;
pub mod config;
pub mod content;
pub mod dom;
pub mod error;
pub mod loader;
pub mod observability;
pub mod render;
pub mod serve;
pub mod site;
pub mod slug;
