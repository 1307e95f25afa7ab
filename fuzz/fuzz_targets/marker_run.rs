#![no_main]
use libfuzzer_sys::fuzz_target;
use stsift::{decode_marker_run, encode_marker_run};

fuzz_target!(|data: &[u8]| {
    let encoded = encode_marker_run(data);
    let decoded = decode_marker_run(&encoded, data.len());
    assert!(decoded.ok);
    assert_eq!(&decoded.output[..], data);

    // arbitrary input must never panic
    let _ = decode_marker_run(data, 32000);
});
