/*!
    Probing functionality for extracting media metadata.
*/

use std::path::Path;

use ffmpeg_next::{format::context::Input as InputContext, media::Type};

use ffmpeg_types::{MediaInfo, Rational, Result, VideoStreamInfo};

use crate::convert::{
    codec_id_from_ffmpeg, container_duration, pixel_format_from_ffmpeg, rational_from_ffmpeg,
    stream_duration,
};
use crate::source::open_input;

/// Fallback time base when a stream does not declare one.
pub(crate) const MICROSECONDS: Rational = Rational {
    num: 1,
    den: 1_000_000,
};

/**
    Probe a media file to extract metadata without decoding anything.

    # Example

    ```ignore
    let info = probe("video.mp4")?;
    if let Some(video) = &info.video {
        println!("Video: {}x{} {}", video.width, video.height, video.pixel_format);
    }
    ```
*/
pub fn probe<P: AsRef<Path>>(path: P) -> Result<MediaInfo> {
    let input_ctx = open_input(path.as_ref())?;
    Ok(extract_media_info(&input_ctx))
}

/**
    Extract MediaInfo from an already-opened input context.
*/
pub(crate) fn extract_media_info(input_ctx: &InputContext) -> MediaInfo {
    let video = extract_video_stream_info(input_ctx);

    // Prefer the container duration, fall back to the video stream's
    let duration = container_duration(input_ctx.duration())
        .or_else(|| video.as_ref().and_then(|v| v.duration));

    MediaInfo {
        format_name: input_ctx.format().name().to_string(),
        stream_count: input_ctx.nb_streams() as usize,
        duration,
        video,
    }
}

/**
    Extract information about the best video stream, as scored by the
    codec library's `av_find_best_stream`.
*/
fn extract_video_stream_info(input_ctx: &InputContext) -> Option<VideoStreamInfo> {
    let stream = input_ctx.streams().best(Type::Video)?;

    let time_base = rational_from_ffmpeg(stream.time_base());
    let duration = stream_duration(stream.duration(), time_base)
        .or_else(|| container_duration(input_ctx.duration()));

    // A throwaway decoder context exposes dimensions and pixel format
    let decoder_ctx =
        ffmpeg_next::codec::context::Context::from_parameters(stream.parameters()).ok()?;
    let decoder = decoder_ctx.decoder().video().ok()?;

    let frame_rate = rational_from_ffmpeg(stream.avg_frame_rate())
        .or_else(|| rational_from_ffmpeg(stream.rate()));

    // SAFETY: the parameters pointer is owned by the stream, which outlives this read
    let bitrate = unsafe {
        let ptr = stream.parameters().as_ptr();
        ((*ptr).bit_rate > 0).then(|| (*ptr).bit_rate as u64)
    };

    Some(VideoStreamInfo {
        index: stream.index(),
        width: decoder.width(),
        height: decoder.height(),
        pixel_format: pixel_format_from_ffmpeg(decoder.format()),
        frame_rate,
        time_base: time_base.unwrap_or(MICROSECONDS),
        duration,
        codec_id: codec_id_from_ffmpeg(stream.parameters().id()),
        bitrate,
    })
}
