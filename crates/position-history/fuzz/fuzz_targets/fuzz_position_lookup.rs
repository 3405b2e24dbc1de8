#![no_main]

use libfuzzer_sys::fuzz_target;
use position_history::position::{find_position, is_truthy};

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Ok(Some(values)) = find_position(&doc, "SGML") {
            let _ = values.has_market_value();
        }
        let _ = is_truthy(&doc);
    }
});
