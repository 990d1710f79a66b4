//! Attribute translation.
//!
//! Turns the `id,code,value` triple of an info record into a report field
//! and a typed value.

use crate::codes::attributes::Field;
use crate::codes::language;
use crate::codes::values::special_value;
use crate::process::record::Tag;
use crate::structs::value::Value;
use crate::utils::errors::TranslateError;

/// Entity an info record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// `CINFO`
    Disc,
    /// `TINFO`
    Title,
    /// `SINFO`
    Stream,
}

impl Flag {
    pub fn tag(self) -> Tag {
        match self {
            Flag::Disc => Tag::Cinfo,
            Flag::Title => Tag::Tinfo,
            Flag::Stream => Tag::Sinfo,
        }
    }
}

/// Translates one attribute.
///
/// A non-zero `code` that has a canonical string replaces `raw`. Otherwise
/// all-digit values become integers and everything else is kept as trimmed
/// text. Language codes are shortened to ISO 639-1 or rejected.
pub fn translate(flag: Flag, id: u32, raw: &str, code: u32) -> Result<(Field, Value), TranslateError> {
    let mut field = Field::from_attribute(id).ok_or(TranslateError::UnknownAttribute(id))?;

    // Attribute 2 of an audio stream is its channel layout, not a name
    if flag == Flag::Stream && field == Field::Name {
        field = Field::Downmix;
    }

    let value = if code != 0 {
        match special_value(code) {
            Some(canonical) => Value::Text(canonical.to_string()),
            None => Value::Text(raw.trim().to_string()),
        }
    } else {
        Value::parse(raw)
    };

    if field.is_language_code() {
        let code = value.into_text();
        return match language::to_alpha2(&code) {
            Some(alpha2) => Ok((field, Value::Text(alpha2.to_string()))),
            None => Err(TranslateError::UnmappedLanguage(code)),
        };
    }

    Ok((field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_code_wins() {
        assert_eq!(
            translate(Flag::Disc, 1, "Blu-ray disc", 6209),
            Ok((Field::Type, Value::Text("BD".into())))
        );
        assert_eq!(
            translate(Flag::Stream, 1, "Audio", 6202),
            Ok((Field::Type, Value::Text("audio".into())))
        );
    }

    #[test]
    fn unknown_enumeration_code_keeps_raw_text() {
        assert_eq!(
            translate(Flag::Title, 30, " Foo ", 6119),
            Ok((Field::Information, Value::Text("Foo".into())))
        );
    }

    #[test]
    fn digits_become_integers() {
        assert_eq!(
            translate(Flag::Title, 11, "12300000", 0),
            Ok((Field::Size, Value::Integer(12_300_000)))
        );
        assert_eq!(
            translate(Flag::Title, 9, "1:23:45", 0),
            Ok((Field::Length, Value::Text("1:23:45".into())))
        );
    }

    #[test]
    fn stream_name_is_downmix() {
        assert_eq!(
            translate(Flag::Stream, 2, "Surround 7.1", 0),
            Ok((Field::Downmix, Value::Text("Surround 7.1".into())))
        );
        assert_eq!(
            translate(Flag::Title, 2, "Foo Bar", 0),
            Ok((Field::Name, Value::Text("Foo Bar".into())))
        );
    }

    #[test]
    fn language_codes() {
        assert_eq!(
            translate(Flag::Stream, 3, "eng", 0),
            Ok((Field::Langcode, Value::Text("en".into())))
        );
        assert_eq!(
            translate(Flag::Disc, 28, "ger", 0),
            Ok((Field::MetadataLangcode, Value::Text("de".into())))
        );
        assert_eq!(
            translate(Flag::Stream, 3, "und", 0),
            Err(TranslateError::UnmappedLanguage("und".into()))
        );
    }

    #[test]
    fn unknown_attribute() {
        assert_eq!(
            translate(Flag::Disc, 31, "<b>Source information</b><br>", 6119),
            Err(TranslateError::UnknownAttribute(31))
        );
    }
}
