#![no_main]

use libfuzzer_sys::fuzz_target;
use utcompress::{compress, compress_for_uri, decompress_from_string, CompressOptions, DecompressOptions, TimingEntry};

const NAMES: [&str; 6] = ["a", "ab", "abc", "b", "b~c", "measure"];

fuzz_target!(|data: &[u8]| {
    // Each 4-byte chunk is (name index, start delta hi, start delta lo, duration)
    let mut entries = Vec::new();
    let mut start = 1.0f64;
    for chunk in data.chunks_exact(4) {
        let name = NAMES[usize::from(chunk[0]) % NAMES.len()];
        start += f64::from(u16::from_le_bytes([chunk[1], chunk[2]]));
        if chunk[0] & 0x80 == 0 {
            entries.push(TimingEntry::mark(name, start));
        } else {
            entries.push(TimingEntry::measure(name, start, f64::from(chunk[3])));
        }
    }

    let uri = compress_for_uri(&compress(&entries, &CompressOptions::default()));
    let decoded = decompress_from_string(&uri, &DecompressOptions::default()).expect("own output must parse");

    // Property 1: nothing is lost or invented
    assert_eq!(decoded.len(), entries.len(), "entry count mismatch for {uri}");

    // Property 2: whole-millisecond input survives exactly, in sorted order
    for window in decoded.windows(2) {
        assert!(window[0].start_time <= window[1].start_time, "not sorted: {uri}");
    }
    let mut expected: Vec<_> = entries
        .iter()
        .map(|e| (e.start_time as i64, e.duration as i64, e.name.clone()))
        .collect();
    let mut actual: Vec<_> = decoded
        .iter()
        .map(|e| (e.start_time as i64, e.duration as i64, e.name.clone()))
        .collect();
    expected.sort();
    actual.sort();
    assert_eq!(expected, actual, "roundtrip mismatch for {uri}");
});
