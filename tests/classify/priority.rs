use stsift::classify::{compressed, resource, ClassifierConfig, VALIDATORS};
use stsift::core::ByteReader;
use stsift::{classify, FormatTag, Tier};

/// A resource file whose version word doubles as a compressed-DEGAS mode
/// word and whose body happens to be a full marker-run screen.
fn resource_that_is_also_a_compressed_screen() -> Vec<u8> {
    let size: u16 = 36 + 126 * 3 + 32;
    let mut header = [0u16; 18];
    header[0] = 0x8000;
    header[17] = size;
    let mut d: Vec<u8> = header.iter().flat_map(|w| w.to_be_bytes()).collect();
    // two literal bytes from the size word, then 31998 bytes of runs
    for _ in 0..125 {
        d.extend_from_slice(&[0xC7, 0xFF, 0x00]);
    }
    d.extend_from_slice(&[0xC7, 123, 0x00]);
    d.extend_from_slice(&[0u8; 32]);
    assert_eq!(d.len(), usize::from(size));
    d
}

#[test]
fn both_validators_accept_in_isolation() {
    let data = resource_that_is_also_a_compressed_screen();
    let r = ByteReader::new(&data);
    let cfg = ClassifierConfig::default();
    assert!(resource::validate_rsc(&r, &cfg).is_ok());
    let pc = compressed::validate_degas_compressed(&r, &cfg).unwrap();
    assert_eq!(pc.format, Some(FormatTag::DegasEliteCompressed));
}

#[test]
fn tier_one_wins_over_tier_three() {
    let r = classify(&resource_that_is_also_a_compressed_screen());
    assert_eq!(r.format, Some(FormatTag::GemResource));
    assert_eq!(r.format.map(|f| f.tier()), Some(Tier::Container));
}

#[test]
fn table_is_consulted_in_tier_order() {
    let tiers: Vec<u8> = VALIDATORS.iter().map(|v| v.tier.number()).collect();
    let mut sorted = tiers.clone();
    sorted.sort_unstable();
    assert_eq!(tiers, sorted);
    assert_eq!(tiers.first(), Some(&1));
    assert_eq!(tiers.last(), Some(&4));
}

#[test]
fn binary_fixtures_never_reach_text_scoring() {
    let fixtures = [
        crate::common::rsc(),
        crate::common::turboc(8, 0, 0),
        crate::common::gemdos_prg(),
        crate::common::degas_classic(0),
        crate::common::neochrome(),
        crate::common::stad(),
        crate::common::gem_img(),
    ];
    for data in fixtures {
        let format = classify(&data).format.expect("fixture recognized");
        assert_ne!(format.tier(), Tier::Text, "{format:?}");
    }
}
