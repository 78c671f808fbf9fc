#![no_main]

use libfuzzer_sys::fuzz_target;
use psych_report::slug::{SlugReason, path_component, resolve};

fuzz_target!(|data: &[u8]| {
    if let Ok(target) = std::str::from_utf8(data) {
        let resolution = resolve(path_component(target));

        // A slug is only ever produced for a valid, already-normalized segment.
        if let Some(slug) = &resolution.slug {
            assert_eq!(resolution.reason, Some(SlugReason::Valid));
            assert_eq!(slug.as_str(), slug.as_str().to_lowercase());
            assert!(!slug.as_str().contains(['/', '.']));
        }
    }
});
