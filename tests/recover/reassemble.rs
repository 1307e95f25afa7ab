use stsift::oracle::encode_marker_run;
use stsift::recover::{FragmentHeader, FragmentWarning};
use stsift::{classify, reassemble, FormatTag, SiftError};

use crate::common;

fn push_fragment(stream: &mut Vec<u8>, payload: &[u8], compressed: bool, last: bool) {
    let header = FragmentHeader {
        len: payload.len() as u32,
        compressed,
        last,
    };
    stream.extend_from_slice(&header.to_bytes());
    stream.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        stream.push(0xEE);
    }
}

#[test]
fn recovered_files_are_classifiable() {
    let header = common::c_header(25);
    let (first, second) = header.as_bytes().split_at(101);
    let picture = common::degas_classic(0);

    let mut stream = Vec::new();
    push_fragment(&mut stream, first, false, false);
    push_fragment(&mut stream, second, false, true);
    push_fragment(&mut stream, &encode_marker_run(&picture), true, true);

    let re = reassemble(&stream).unwrap();
    assert!(re.is_clean(), "{:?}", re.warnings);
    assert_eq!(re.files.len(), 2);
    assert_eq!(re.files[0].name, "00001.TXT");
    assert_eq!(&re.files[0].data[..], header.as_bytes());
    assert_eq!(classify(&re.files[0].data).format, Some(FormatTag::CHeader));
    assert_eq!(re.files[1].name, "00002.TXT");
    assert_eq!(classify(&re.files[1].data).format, Some(FormatTag::DegasClassic));
}

#[test]
fn literal_marker_bytes_survive() {
    let data = [0xC7u8, 0x41, 0xC7, 0xC7];
    let mut stream = Vec::new();
    push_fragment(&mut stream, &encode_marker_run(&data), true, true);
    let re = reassemble(&stream).unwrap();
    assert_eq!(&re.files[0].data[..], &data);
}

#[test]
fn damaged_stream_reports_warnings() {
    let mut stream = Vec::new();
    push_fragment(&mut stream, b"first part ", false, false);
    push_fragment(&mut stream, &[0x41, 0xC7], true, false);
    push_fragment(&mut stream, b"end", false, false);
    let re = reassemble(&stream).unwrap();
    assert!(re.files.is_empty());
    assert_eq!(re.warnings.len(), 2);
    assert!(matches!(re.warnings[0], FragmentWarning::Decompression { fragment: 2, .. }));
    assert_eq!(re.warnings[1], FragmentWarning::IncompleteFile { pending: 14 });
}

#[test]
fn desynchronized_header_is_an_error() {
    let stream = [0u8, 0, 0, 2, 0x12, 0x34, 0, 1, b'o', b'k'];
    assert!(matches!(reassemble(&stream), Err(SiftError::Fragment { .. })));
}
