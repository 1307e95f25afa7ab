#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let r = stsift::classify(data);
    assert!(r.confidence == 0 || r.confidence >= 90);
});
