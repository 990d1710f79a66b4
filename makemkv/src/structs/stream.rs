use serde::{Deserialize, Serialize};

use crate::codes::attributes::Field;
use crate::structs::value::{Framerate, StreamType, Value};
use crate::structs::{integer, parsed, text};
use crate::utils::errors::TranslateError;

/// An audio, video or subtitle stream from `SINFO` records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<StreamType>,
    /// Channel layout description of audio streams, e.g. `Surround 5.1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downmix: Option<String>,
    /// ISO 639-1 code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub langcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Matroska codec id, e.g. `V_MPEG4/ISO/AVC`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_short: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_long: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_angle: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samplerate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framerate: Option<Framerate>,
    /// `AP_AVStreamFlag_*` bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_langcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mkv_flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mkv_flags_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_codec_short: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_conversion_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_samplerate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_sample_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_channel_layout_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_channel_layout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_mix_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_sequence_id: Option<u32>,
}

impl Stream {
    const ENTITY: &'static str = "stream";

    /// Sets a translated attribute. Last write wins.
    pub fn set(&mut self, field: Field, value: Value) -> Result<(), TranslateError> {
        let entity = Self::ENTITY;
        match field {
            Field::Type => self.stream_type = parsed(entity, field, value)?,
            Field::Downmix => self.downmix = text(value),
            Field::Langcode => self.langcode = text(value),
            Field::Language => self.language = text(value),
            Field::CodecId => self.codec_id = text(value),
            Field::CodecShort => self.codec_short = text(value),
            Field::CodecLong => self.codec_long = text(value),
            Field::Bitrate => self.bitrate = text(value),
            Field::Channels => self.channels = integer(entity, field, value)?,
            Field::VideoAngle => self.video_angle = integer(entity, field, value)?,
            Field::Samplerate => self.samplerate = integer(entity, field, value)?,
            Field::SampleSize => self.sample_size = integer(entity, field, value)?,
            Field::Dimensions => self.dimensions = text(value),
            Field::AspectRatio => self.aspect_ratio = text(value),
            Field::Framerate => match Framerate::from_value(&value) {
                Some(rate) => self.framerate = Some(rate),
                None => {
                    return Err(TranslateError::InvalidValue {
                        entity,
                        field,
                        value,
                    });
                }
            },
            Field::StreamFlags => self.stream_flags = integer(entity, field, value)?,
            Field::MetadataLangcode => self.metadata_langcode = text(value),
            Field::MetadataLanguage => self.metadata_language = text(value),
            Field::Information => self.information = text(value),
            Field::MkvFlags => self.mkv_flags = text(value),
            Field::MkvFlagsText => self.mkv_flags_text = text(value),
            Field::ChannelLayout => self.channel_layout = text(value),
            Field::OutputCodecShort => self.output_codec_short = text(value),
            Field::OutputConversionType => self.output_conversion_type = text(value),
            Field::OutputSamplerate => self.output_samplerate = integer(entity, field, value)?,
            Field::OutputSampleSize => self.output_sample_size = integer(entity, field, value)?,
            Field::OutputChannels => self.output_channels = integer(entity, field, value)?,
            Field::OutputChannelLayoutName => self.output_channel_layout_name = text(value),
            Field::OutputChannelLayout => {
                self.output_channel_layout = integer(entity, field, value)?
            }
            Field::OutputMixDescription => self.output_mix_description = text(value),
            Field::OffsetSequenceId => self.offset_sequence_id = integer(entity, field, value)?,
            _ => return Err(TranslateError::NoSuchField { entity, field }),
        }
        Ok(())
    }
}
