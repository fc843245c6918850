/*!
    Codec identification.
*/

use std::fmt;

/**
    Video codec identifiers.

    Codecs without a named variant are carried as [`CodecId::Other`]
    with the codec library's short name.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// H.264 / AVC
    H264,
    /// H.265 / HEVC
    H265,
    /// VP8
    Vp8,
    /// VP9
    Vp9,
    /// AV1
    Av1,
    /// MPEG-4 Part 2
    Mpeg4,
    /// MPEG-2 Video
    Mpeg2Video,
    /// Motion JPEG
    Mjpeg,
    /// Uncompressed video
    RawVideo,
    /// Any other codec, by codec library name
    Other(&'static str),
}

impl CodecId {
    /**
        Returns the codec library's short name for this codec.
    */
    pub const fn name(self) -> &'static str {
        match self {
            Self::H264 => "h264",
            Self::H265 => "hevc",
            Self::Vp8 => "vp8",
            Self::Vp9 => "vp9",
            Self::Av1 => "av1",
            Self::Mpeg4 => "mpeg4",
            Self::Mpeg2Video => "mpeg2video",
            Self::Mjpeg => "mjpeg",
            Self::RawVideo => "rawvideo",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
