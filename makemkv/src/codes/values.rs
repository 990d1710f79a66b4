//! Canonical strings for enumeration codes.
//!
//! When an attribute value is a constant string, makemkvcon also sends the
//! message code of that string. These codes are stable across interface
//! languages, unlike the localized value text.

pub const VIDEO: u32 = 6201;
pub const AUDIO: u32 = 6202;
pub const SUBTITLES: u32 = 6203;
pub const DVD: u32 = 6206;
pub const BLURAY: u32 = 6209;
pub const HDDVD: u32 = 6212;
pub const MKV: u32 = 6213;

/// Resolves an enumeration code to its canonical string.
pub const fn special_value(code: u32) -> Option<&'static str> {
    match code {
        VIDEO => Some("video"),
        AUDIO => Some("audio"),
        SUBTITLES => Some("subtitles"),
        DVD => Some("DVD"),
        BLURAY => Some("BD"),
        HDDVD => Some("HDDVD"),
        MKV => Some("MKV"),
        _ => None,
    }
}

#[test]
fn disc_and_stream_types() {
    assert_eq!(special_value(6206), Some("DVD"));
    assert_eq!(special_value(6209), Some("BD"));
    assert_eq!(special_value(6212), Some("HDDVD"));
    assert_eq!(special_value(6213), Some("MKV"));
    assert_eq!(special_value(6201), Some("video"));
    assert_eq!(special_value(6203), Some("subtitles"));
    assert_eq!(special_value(6119), None);
}
