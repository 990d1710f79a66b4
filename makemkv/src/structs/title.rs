use serde::{Deserialize, Serialize};

use crate::codes::attributes::Field;
use crate::structs::stream::Stream;
use crate::structs::value::Value;
use crate::structs::{integer, text};
use crate::utils::errors::TranslateError;

/// A title from `TINFO` records together with its streams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_count: Option<u32>,
    /// Duration as `h:mm:ss`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_human: Option<String>,
    /// Size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_angle: Option<u32>,
    /// Playlist or program chain the title comes from, e.g. `00001.mpls`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments_map: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_langcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub streams: Vec<Stream>,
}

impl Title {
    const ENTITY: &'static str = "title";

    /// Sets a translated attribute. Last write wins.
    pub fn set(&mut self, field: Field, value: Value) -> Result<(), TranslateError> {
        let entity = Self::ENTITY;
        match field {
            Field::Name => self.name = text(value),
            Field::ChapterCount => self.chapter_count = integer(entity, field, value)?,
            Field::Length => self.length = text(value),
            Field::SizeHuman => self.size_human = text(value),
            Field::Size => self.size = integer(entity, field, value)?,
            Field::VideoAngle => self.video_angle = integer(entity, field, value)?,
            Field::SourceFilename => self.source_filename = text(value),
            Field::DateTime => self.date_time = text(value),
            Field::OriginalTitleId => self.original_title_id = integer(entity, field, value)?,
            Field::SegmentsCount => self.segments_count = integer(entity, field, value)?,
            Field::SegmentsMap => self.segments_map = text(value),
            Field::FileOutput => self.file_output = text(value),
            Field::MetadataLangcode => self.metadata_langcode = text(value),
            Field::MetadataLanguage => self.metadata_language = text(value),
            Field::Information => self.information = text(value),
            Field::OrderWeight => self.order_weight = integer(entity, field, value)?,
            Field::Comment => self.comment = text(value),
            _ => return Err(TranslateError::NoSuchField { entity, field }),
        }
        Ok(())
    }

    /// Returns the stream at `ordinal`, appending empty streams until it
    /// exists.
    pub fn stream_mut(&mut self, ordinal: usize) -> &mut Stream {
        if ordinal >= self.streams.len() {
            self.streams.resize_with(ordinal + 1, Stream::default);
        }
        &mut self.streams[ordinal]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_fields_reject_text() {
        let mut title = Title::default();
        let err = title
            .set(Field::ChapterCount, Value::Text("many".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::InvalidValue {
                field: Field::ChapterCount,
                ..
            }
        ));
        assert_eq!(title.chapter_count, None);
    }

    #[test]
    fn text_fields_keep_digits() -> anyhow::Result<()> {
        let mut title = Title::default();
        title.set(Field::SegmentsMap, Value::Integer(123))?;
        assert_eq!(title.segments_map.as_deref(), Some("123"));
        Ok(())
    }

    #[test]
    fn stream_growth() {
        let mut title = Title::default();
        title.stream_mut(2);
        assert_eq!(title.streams.len(), 3);
        title.stream_mut(0);
        assert_eq!(title.streams.len(), 3);
    }
}
