#![no_main]

use libfuzzer_sys::fuzz_target;
use utcompress::{decompress_from_string, jsurl, DecompressOptions};

fuzz_target!(|data: &[u8]| {
    // Arbitrary text must never panic; malformed compact text is an Err,
    // everything else decodes to zero or more entries
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = jsurl::decode(text);
    let _ = decompress_from_string(text, &DecompressOptions::default());

    let map = [("a".to_string(), 0), ("b".to_string(), 40)].into_iter().collect();
    let _ = decompress_from_string(text, &DecompressOptions::default().with_map(map));
});
