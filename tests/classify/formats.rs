use stsift::{classify, FormatTag};

use crate::common;

fn assert_format(data: &[u8], format: FormatTag, ext: &str, confidence: u8) {
    let r = classify(data);
    assert_eq!(r.format, Some(format), "{}", r.reason);
    assert_eq!(r.extension, ext);
    assert_eq!(r.confidence, confidence, "{}", r.reason);
}

#[test]
fn resource_file() {
    assert_format(&common::rsc(), FormatTag::GemResource, "RSC", 100);
}

#[test]
fn turbo_c_object() {
    assert_format(&common::turboc(200, 40, 16), FormatTag::TurboCObject, "TCO", 100);
}

#[test]
fn devpac_object_carries_module_name() {
    let data = common::devpac("vdibind.o", &[(0x01, &b"CODE"[..])], true);
    let r = classify(&data);
    assert_eq!(r.format, Some(FormatTag::DevpacObject));
    assert_eq!(r.extension, "O");
    assert_eq!(r.embedded_name.as_deref(), Some("vdibind"));
}

#[test]
fn gemdos_executable_and_object() {
    assert_format(&common::gemdos_prg(), FormatTag::GemdosExecutable, "PRG", 100);
    assert_format(&common::gemdos_object(), FormatTag::GemdosObject, "O", 95);
}

#[test]
fn classic_degas_all_zero_is_proven_pi1() {
    // mode word 0x0000, palette all zero
    assert_format(&common::degas_classic(0), FormatTag::DegasClassic, "PI1", 100);
    assert_format(&common::degas_classic(1), FormatTag::DegasClassic, "PI2", 100);
}

#[test]
fn degas_elite_and_neochrome() {
    assert_format(&common::degas_elite(2), FormatTag::DegasElite, "PI3", 100);
    assert_format(&common::neochrome(), FormatTag::Neochrome, "NEO", 100);
}

#[test]
fn compressed_images_need_decompression() {
    let screen: Vec<u8> = (0..common::SCREEN).map(|i| (i / 640) as u8).collect();
    assert_format(
        &common::degas_compressed(0, &screen),
        FormatTag::DegasEliteCompressed,
        "PC1",
        100,
    );
    assert_format(&common::stad(), FormatTag::StadPac, "PAC", 100);
}

#[test]
fn gem_raster_image() {
    assert_format(&common::gem_img(), FormatTag::GemImage, "IMG", 100);
}

#[test]
fn unproven_compressed_image_is_not_guessed() {
    // valid PC header, body that expands to half a screen
    let half: Vec<u8> = vec![0u8; common::SCREEN / 2];
    let r = classify(&common::degas_compressed(0, &half));
    assert_ne!(r.format, Some(FormatTag::DegasEliteCompressed));
}

#[test]
fn descriptor_sizes_match_fixtures() {
    use stsift::core::{ByteReader, DESCRIPTORS};

    let fixtures = [
        (FormatTag::GemResource, common::rsc()),
        (FormatTag::TurboCObject, common::turboc(64, 8, 4)),
        (FormatTag::DegasClassic, common::degas_classic(0)),
        (FormatTag::DegasElite, common::degas_elite(0)),
        (FormatTag::Neochrome, common::neochrome()),
    ];
    for (tag, data) in fixtures {
        let d = DESCRIPTORS.iter().find(|d| d.tag == tag).unwrap();
        assert_eq!(d.expected_size(&ByteReader::new(&data)), Some(data.len()), "{tag:?}");
        assert!(classify(&data).is_proven());
    }
}
