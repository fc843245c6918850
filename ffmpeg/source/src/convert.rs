/*!
    Conversion utilities between ffmpeg-next types and ffmpeg-types.
*/

use std::time::Duration;

use ffmpeg_types::{CodecId, MediaDuration, PixelFormat, Pts, Rational};

/**
    Convert an ffmpeg_next::Rational to ours, or `None` if it is unset.
*/
pub fn rational_from_ffmpeg(r: ffmpeg_next::Rational) -> Option<Rational> {
    Rational::known(r.numerator(), r.denominator())
}

/**
    Convert an ffmpeg_next pixel format to our PixelFormat.
*/
pub fn pixel_format_from_ffmpeg(format: ffmpeg_next::format::Pixel) -> PixelFormat {
    match format.descriptor() {
        Some(descriptor) => PixelFormat::from_name(descriptor.name()),
        None => PixelFormat::Other("none"),
    }
}

/**
    Convert an ffmpeg_next codec ID to our CodecId.
*/
pub fn codec_id_from_ffmpeg(id: ffmpeg_next::codec::Id) -> CodecId {
    use ffmpeg_next::codec::Id;

    match id {
        Id::H264 => CodecId::H264,
        Id::HEVC => CodecId::H265,
        Id::VP8 => CodecId::Vp8,
        Id::VP9 => CodecId::Vp9,
        Id::AV1 => CodecId::Av1,
        Id::MPEG4 => CodecId::Mpeg4,
        Id::MPEG2VIDEO => CodecId::Mpeg2Video,
        Id::MJPEG => CodecId::Mjpeg,
        Id::RAWVIDEO => CodecId::RawVideo,
        other => CodecId::Other(other.name()),
    }
}

/**
    Convert a duration in stream ticks to a std Duration, if positive.
*/
pub fn stream_duration(ticks: i64, time_base: Option<Rational>) -> Option<Duration> {
    let time_base = time_base?;
    (ticks > 0).then(|| MediaDuration(ticks).to_duration(time_base))
}

/**
    Convert a container duration in `AV_TIME_BASE` units to a std Duration.
*/
pub fn container_duration(micros: i64) -> Option<Duration> {
    (micros > 0).then(|| Duration::from_micros(micros as u64))
}

/**
    Create a Pts from an optional i64 timestamp.
*/
pub fn pts_from_ffmpeg(pts: Option<i64>) -> Option<Pts> {
    pts.map(Pts)
}

#[cfg(test)]
mod tests {
    use ffmpeg_next::format::Pixel;

    use super::*;

    #[test]
    fn pixel_formats_use_library_names() {
        assert_eq!(pixel_format_from_ffmpeg(Pixel::YUV420P), PixelFormat::Yuv420p);
        assert_eq!(pixel_format_from_ffmpeg(Pixel::GRAY8), PixelFormat::Gray8);
        assert_eq!(pixel_format_from_ffmpeg(Pixel::NV12), PixelFormat::Nv12);
        assert_eq!(
            pixel_format_from_ffmpeg(Pixel::YUVA444P16LE),
            PixelFormat::Other("yuva444p16le")
        );
        assert_eq!(pixel_format_from_ffmpeg(Pixel::None), PixelFormat::Other("none"));
    }

    #[test]
    fn unset_rationals_are_unknown() {
        assert_eq!(rational_from_ffmpeg(ffmpeg_next::Rational::new(0, 1)), None);
        assert_eq!(
            rational_from_ffmpeg(ffmpeg_next::Rational::new(1, 25)),
            Some(Rational::new(1, 25))
        );
    }

    #[test]
    fn durations_require_positive_ticks() {
        let tb = Some(Rational::new(1, 1000));
        assert_eq!(stream_duration(40, tb), Some(Duration::from_millis(40)));
        assert_eq!(stream_duration(0, tb), None);
        assert_eq!(stream_duration(40, None), None);
        assert_eq!(container_duration(-1), None);
    }
}
