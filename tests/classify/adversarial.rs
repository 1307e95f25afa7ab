use stsift::classify::{ClassifierConfig, VALIDATORS};
use stsift::core::{ByteReader, RejectKind};
use stsift::{classify, FormatTag};

use crate::common;

#[test]
fn noise_never_panics_and_stays_unknown() {
    for seed in 0..64 {
        let len = 1 + (seed as usize * 977) % 40_000;
        let r = classify(&common::noise(len, seed));
        assert!(r.confidence == 0 || r.confidence >= 90, "{r:?}");
    }
}

#[test]
fn every_prefix_of_every_fixture_is_handled() {
    let fixtures = [
        common::rsc(),
        common::turboc(40, 8, 0),
        common::devpac("modf.o", &[(0x01, &b"CODE"[..])], true),
        common::gemdos_prg(),
        common::gemdos_object(),
        common::stad(),
        common::gem_img(),
    ];
    for full in &fixtures {
        for cut in 0..full.len() {
            let r = classify(&full[..cut]);
            assert!(r.confidence == 0 || r.confidence >= 90);
        }
    }
}

#[test]
fn truncated_images_lose_their_format() {
    let data = common::degas_classic(0);
    for cut in [0, 1, 33, 34, 32033] {
        assert_ne!(classify(&data[..cut]).format, Some(FormatTag::DegasClassic));
    }
}

#[test]
fn devpac_stream_without_end_record_is_truncated() {
    // signature, "modf.o" NUL, then a record that runs past EOF
    let mut data = common::devpac("modf.o", &[(0x01, &b"CODE"[..])], false);
    data.extend_from_slice(&[0x05, 0x00, 0x10, 0xAA, 0xBB, 0xCC]);

    let devpac = VALIDATORS.iter().find(|v| v.name == "devpac").unwrap();
    let err = (devpac.check)(&ByteReader::new(&data), &ClassifierConfig::default()).unwrap_err();
    assert_eq!(err.kind, RejectKind::Truncated);

    let r = classify(&data);
    assert_ne!(r.format, Some(FormatTag::DevpacObject));
    assert!(r.confidence == 0 || r.confidence >= 90);
}

#[test]
fn gemdos_header_with_huge_segments_is_rejected() {
    let mut data = common::gemdos_image(16, 0, 0);
    data[2..6].copy_from_slice(&0x7FFF_FFFFu32.to_be_bytes());
    let r = classify(&data);
    assert!(r.format != Some(FormatTag::GemdosExecutable));
}

#[test]
fn resource_size_off_by_one_is_rejected() {
    let mut longer = common::rsc();
    longer.push(0);
    assert_ne!(classify(&longer).format, Some(FormatTag::GemResource));
    let mut shorter = common::rsc();
    shorter.pop();
    assert_ne!(classify(&shorter).format, Some(FormatTag::GemResource));
}
