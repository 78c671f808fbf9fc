#![no_main]

use libfuzzer_sys::fuzz_target;
use psych_report::content::ContentDocument;
use psych_report::dom::{PageLayout, report_page};
use psych_report::render::apply_content;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = ContentDocument::from_slice(data) else {
        return;
    };

    // Rendering twice must leave the page as rendering once.
    let mut once = report_page(PageLayout::default());
    apply_content(&mut once, &doc);
    let mut twice = once.clone();
    apply_content(&mut twice, &doc);
    assert_eq!(once.to_html(), twice.to_html());
});
