//! Attribute ids carried by `CINFO`, `TINFO` and `SINFO` records.
//!
//! The ids follow `AP_ItemAttributeId` from makemkv's `apdefs.h`. Only the
//! attributes that end up in a report have a [`Field`]; everything else
//! (panel texts, output format descriptions, ...) is irrelevant to us.

use std::fmt::Display;

/// Named field of a disc, title or stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Type,
    Name,
    Downmix,
    Langcode,
    Language,
    CodecId,
    CodecShort,
    CodecLong,
    ChapterCount,
    Length,
    SizeHuman,
    Size,
    Bitrate,
    Channels,
    VideoAngle,
    SourceFilename,
    Samplerate,
    SampleSize,
    Dimensions,
    AspectRatio,
    Framerate,
    StreamFlags,
    DateTime,
    OriginalTitleId,
    SegmentsCount,
    SegmentsMap,
    FileOutput,
    MetadataLangcode,
    MetadataLanguage,
    Information,
    VolumeName,
    OrderWeight,
    MkvFlags,
    MkvFlagsText,
    ChannelLayout,
    OutputCodecShort,
    OutputConversionType,
    OutputSamplerate,
    OutputSampleSize,
    OutputChannels,
    OutputChannelLayoutName,
    OutputChannelLayout,
    OutputMixDescription,
    Comment,
    OffsetSequenceId,
}

impl Field {
    /// Looks up the field an attribute id is reported under.
    ///
    /// Returns `None` for ids that are unknown or irrelevant.
    pub const fn from_attribute(id: u32) -> Option<Self> {
        let field = match id {
            1 => Field::Type,
            2 => Field::Name,
            3 => Field::Langcode,
            4 => Field::Language,
            5 => Field::CodecId,
            6 => Field::CodecShort,
            7 => Field::CodecLong,
            8 => Field::ChapterCount,
            9 => Field::Length,
            10 => Field::SizeHuman,
            11 => Field::Size,
            13 => Field::Bitrate,
            14 => Field::Channels,
            15 => Field::VideoAngle,
            16 => Field::SourceFilename,
            17 => Field::Samplerate,
            18 => Field::SampleSize,
            19 => Field::Dimensions,
            20 => Field::AspectRatio,
            21 => Field::Framerate,
            22 => Field::StreamFlags,
            23 => Field::DateTime,
            24 => Field::OriginalTitleId,
            25 => Field::SegmentsCount,
            26 => Field::SegmentsMap,
            27 => Field::FileOutput,
            28 => Field::MetadataLangcode,
            29 => Field::MetadataLanguage,
            30 => Field::Information,
            32 => Field::VolumeName,
            33 => Field::OrderWeight,
            38 => Field::MkvFlags,
            39 => Field::MkvFlagsText,
            40 => Field::ChannelLayout,
            41 => Field::OutputCodecShort,
            42 => Field::OutputConversionType,
            43 => Field::OutputSamplerate,
            44 => Field::OutputSampleSize,
            45 => Field::OutputChannels,
            46 => Field::OutputChannelLayoutName,
            47 => Field::OutputChannelLayout,
            48 => Field::OutputMixDescription,
            49 => Field::Comment,
            50 => Field::OffsetSequenceId,
            _ => return None,
        };
        Some(field)
    }

    /// Whether the value of this field is a 3-letter language code that
    /// has to be shortened to its 2-letter form.
    pub const fn is_language_code(self) -> bool {
        matches!(self, Field::Langcode | Field::MetadataLangcode)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Name => "name",
            Field::Downmix => "downmix",
            Field::Langcode => "langcode",
            Field::Language => "language",
            Field::CodecId => "codec_id",
            Field::CodecShort => "codec_short",
            Field::CodecLong => "codec_long",
            Field::ChapterCount => "chapter_count",
            Field::Length => "length",
            Field::SizeHuman => "size_human",
            Field::Size => "size",
            Field::Bitrate => "bitrate",
            Field::Channels => "channels",
            Field::VideoAngle => "video_angle",
            Field::SourceFilename => "source_filename",
            Field::Samplerate => "samplerate",
            Field::SampleSize => "sample_size",
            Field::Dimensions => "dimensions",
            Field::AspectRatio => "aspect_ratio",
            Field::Framerate => "framerate",
            Field::StreamFlags => "stream_flags",
            Field::DateTime => "date_time",
            Field::OriginalTitleId => "original_title_id",
            Field::SegmentsCount => "segments_count",
            Field::SegmentsMap => "segments_map",
            Field::FileOutput => "file_output",
            Field::MetadataLangcode => "metadata_langcode",
            Field::MetadataLanguage => "metadata_language",
            Field::Information => "information",
            Field::VolumeName => "volume_name",
            Field::OrderWeight => "order_weight",
            Field::MkvFlags => "mkv_flags",
            Field::MkvFlagsText => "mkv_flags_text",
            Field::ChannelLayout => "channel_layout",
            Field::OutputCodecShort => "output_codec_short",
            Field::OutputConversionType => "output_conversion_type",
            Field::OutputSamplerate => "output_samplerate",
            Field::OutputSampleSize => "output_sample_size",
            Field::OutputChannels => "output_channels",
            Field::OutputChannelLayoutName => "output_channel_layout_name",
            Field::OutputChannelLayout => "output_channel_layout",
            Field::OutputMixDescription => "output_mix_description",
            Field::Comment => "comment",
            Field::OffsetSequenceId => "offset_sequence_id",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
