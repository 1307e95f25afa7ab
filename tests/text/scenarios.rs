use stsift::classify::{ClassifierConfig, TextConfig};
use stsift::text::{analyze_text, Outcome, TextKind};
use stsift::{classify, Classifier, FormatTag};

use crate::common;

#[test]
fn define_heavy_header_beats_source_by_margin() {
    let text = common::c_header(25);
    let analysis = analyze_text(text.as_bytes(), &TextConfig::default()).unwrap();
    assert_eq!(analysis.resolution.outcome, Outcome::Winner(TextKind::CHeader));

    let score = |k: TextKind| analysis.cards.iter().find(|c| c.kind == k).unwrap().score;
    assert!(score(TextKind::CHeader) - score(TextKind::CSource) >= 3);

    let r = classify(text.as_bytes());
    assert_eq!(r.format, Some(FormatTag::CHeader));
    assert!(r.confidence >= 95, "{}", r.reason);
}

#[test]
fn source_makefile_and_assembly() {
    assert_eq!(classify(common::C_SOURCE.as_bytes()).extension, "C");
    assert_eq!(classify(common::MAKEFILE.as_bytes()).extension, "MAK");
    assert_eq!(classify(common::ASSEMBLY.as_bytes()).extension, "S");
}

#[test]
fn prose_falls_back_to_generic_text() {
    let r = classify(common::PROSE.as_bytes());
    assert_eq!(r.format, Some(FormatTag::PlainText));
    assert_eq!(r.confidence, 90);
}

#[test]
fn raising_the_margin_turns_a_win_into_generic_text() {
    let text = common::c_header(25);
    let score_gap = {
        let a = analyze_text(text.as_bytes(), &TextConfig::default()).unwrap();
        a.resolution.best.1 - a.resolution.runner_up.1
    };
    let mut cfg = ClassifierConfig::default();
    cfg.text.margin = score_gap + 1;
    let r = Classifier::new(cfg).classify(text.as_bytes());
    assert_eq!(r.format, Some(FormatTag::PlainText));
    assert!(r.reason.contains("ambiguous"), "{}", r.reason);
}

#[test]
fn embedded_name_survives_to_the_result() {
    let r = classify(common::C_SOURCE.as_bytes());
    assert_eq!(r.embedded_name.as_deref(), Some("HELLO"));
}

#[test]
fn latin1_comments_do_not_break_the_gate() {
    let mut text = common::C_SOURCE.as_bytes().to_vec();
    text.extend_from_slice(b"/* Gr\xfc\xdfe aus M\xfcnchen */\n");
    assert_eq!(classify(&text).extension, "C");
}

#[test]
fn prose_with_opcode_and_command_words_stays_generic() {
    for text in [
        "Copy the data files and the text to drive C.\nDo not move or delete them before the end of the install.\n",
        "Copy all files to the hard disk.\nSet the clock if the date is wrong.\n",
        common::PROSE,
    ] {
        let r = classify(text.as_bytes());
        assert_eq!(r.format, Some(FormatTag::PlainText), "{text:?}: {}", r.reason);
        assert_eq!(r.confidence, 90);
    }
}

#[test]
fn desktop_info_records() {
    let r = classify(common::DESKTOP_INF.as_bytes());
    assert_eq!(r.format, Some(FormatTag::DesktopInfo), "{}", r.reason);
    assert_eq!(r.extension, "INF");
    assert!(r.confidence >= 90);
}

#[test]
fn batch_project_and_resource_definition() {
    let cases = [
        (common::BATCH, FormatTag::BatchScript, "BAT"),
        (common::PROJECT, FormatTag::ProjectFile, "PRJ"),
        (common::RESOURCE_DEF, FormatTag::ResourceDefinition, "RSD"),
    ];
    for (text, format, ext) in cases {
        let r = classify(text.as_bytes());
        assert_eq!(r.format, Some(format), "{}", r.reason);
        assert_eq!(r.extension, ext);
        assert!(r.confidence >= 90);
    }
}

#[test]
fn embedded_name_breaks_a_near_tie() {
    let cfg = TextConfig::default();
    let bare = analyze_text(common::WINDOW_DECLS.as_bytes(), &cfg).unwrap();
    assert_eq!(bare.resolution.outcome, Outcome::Ambiguous);
    assert_eq!(bare.nudged, None);

    let named = format!("{}{}", common::WINDOW_BANNER, common::WINDOW_DECLS);
    let a = analyze_text(named.as_bytes(), &cfg).unwrap();
    assert_eq!(a.nudged, Some(TextKind::CHeader));
    assert_eq!(a.resolution.outcome, Outcome::Winner(TextKind::CHeader));
    let header = a.cards.iter().find(|c| c.kind == TextKind::CHeader).unwrap();
    assert!(header.evidence.contains(&("embedded name", cfg.embedded_name_nudge)));

    let r = classify(named.as_bytes());
    assert_eq!(r.extension, "H");
    assert_eq!(r.embedded_name.as_deref(), Some("WINDOW"));
    assert!(r.reason.contains("embedded name WINDOW.H"), "{}", r.reason);
    assert_eq!(classify(common::WINDOW_DECLS.as_bytes()).format, Some(FormatTag::PlainText));
}

#[test]
fn include_guard_needs_all_three_lines() {
    let cfg = TextConfig::default();
    let guard = |text: &str| {
        let a = analyze_text(text.as_bytes(), &cfg).unwrap();
        let h = a.cards.into_iter().find(|c| c.kind == TextKind::CHeader).unwrap();
        h.evidence.contains(&("include guard", 3))
    };
    assert!(guard(common::GUARDED_HEADER));
    assert!(!guard(&common::GUARDED_HEADER.replace("#endif\n", "")));
    assert_eq!(classify(common::GUARDED_HEADER.as_bytes()).extension, "H");
}

#[test]
fn column_zero_labels_count_against_c_source() {
    let source_card = |text: &str| {
        let a = analyze_text(text.as_bytes(), &TextConfig::default()).unwrap();
        a.cards.into_iter().find(|c| c.kind == TextKind::CSource).unwrap()
    };
    let labelled = source_card(common::C_WITH_LABELS);
    assert!(labelled.evidence.contains(&("rule lines", -3)), "{:?}", labelled.evidence);
    assert!(!source_card(common::C_SOURCE).evidence.iter().any(|(r, _)| *r == "rule lines"));
    assert_eq!(classify(common::C_WITH_LABELS.as_bytes()).extension, "C");
}
