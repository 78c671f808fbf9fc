#![no_main]

use libfuzzer_sys::fuzz_target;
use psych_report::config::ConfigLoader;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        let _ = ConfigLoader::default().load_str(yaml);
    }
});
