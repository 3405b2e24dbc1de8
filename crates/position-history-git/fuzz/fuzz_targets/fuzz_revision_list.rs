#![no_main]

use libfuzzer_sys::fuzz_target;
use position_history_git::parse_revision_list;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    for revision in parse_revision_list(&raw) {
        assert!(!revision.as_str().is_empty());
        let _ = revision.short_sha();
    }
});
