#![no_main]

use libfuzzer_sys::fuzz_target;
use pgn_tree::san::SanMove;

fuzz_target!(|data: &[u8]| {
    let Ok(san) = SanMove::from_ascii(data) else {
        return;
    };
    let reclassified = SanMove::from_ascii(san.to_string().as_bytes()).expect("reclassify");
    assert_eq!(san, reclassified);
});
