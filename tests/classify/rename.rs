use std::path::Path;
use stsift::classify::{plan_rename, RenamePlan};
use stsift::classify;

use crate::common;

#[test]
fn classified_source_gets_embedded_stem() {
    let r = classify(common::C_SOURCE.as_bytes());
    assert_eq!(r.extension, "C");
    let plan = plan_rename(Path::new("recovered/00017.TXT"), &r);
    assert_eq!(plan, RenamePlan::Rename("00017-HELLO.C".to_string()));
}

#[test]
fn unknown_is_never_renamed() {
    let r = classify(&common::noise(1024, 11));
    assert!(matches!(plan_rename(Path::new("00018.TXT"), &r), RenamePlan::Skip(_)));
}

#[test]
fn generic_text_already_named_txt_is_skipped() {
    let r = classify(common::PROSE.as_bytes());
    assert_eq!(r.extension, "TXT");
    assert!(plan_rename(Path::new("00019.TXT"), &r).target().is_none());
    assert_eq!(plan_rename(Path::new("00019.DAT"), &r).target(), Some("00019.TXT"));
}

#[test]
fn extension_is_uppercase_and_short() {
    for data in [common::rsc(), common::gemdos_object(), common::neochrome()] {
        let r = classify(&data);
        if let RenamePlan::Rename(name) = plan_rename(Path::new("X"), &r) {
            let ext = name.rsplit_once('.').unwrap().1;
            assert!(ext.len() <= 3);
            assert_eq!(ext, ext.to_ascii_uppercase());
        } else {
            panic!("{r:?} not renamed");
        }
    }
}
