/*!
    Stream information types.
*/

use std::time::Duration;

use crate::{CodecId, FrameLayout, PixelFormat, Rational};

/**
    Information about the selected video stream.
*/
#[derive(Clone, Debug)]
pub struct VideoStreamInfo {
    /// Index of the stream within the container.
    pub index: usize,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format the decoder will produce.
    pub pixel_format: PixelFormat,
    /// Frame rate (may be approximate or unavailable).
    pub frame_rate: Option<Rational>,
    /// Time base for timestamps.
    pub time_base: Rational,
    /// Total duration (may be unavailable for some streams).
    pub duration: Option<Duration>,
    /// Codec used.
    pub codec_id: CodecId,
    /// Bitrate in bits per second (if known).
    pub bitrate: Option<u64>,
}

impl VideoStreamInfo {
    /**
        Returns the layout every decoded picture of this stream should have.
    */
    pub fn layout(&self) -> FrameLayout {
        FrameLayout::new(self.width, self.height, self.pixel_format)
    }

    /**
        Returns the frame rate as fps, if available.
    */
    pub fn fps(&self) -> Option<f64> {
        self.frame_rate.map(|r| r.to_f64())
    }
}

/**
    Container-level information about an opened source.
*/
#[derive(Clone, Debug, Default)]
pub struct MediaInfo {
    /// Short name of the detected container format (e.g. `mov,mp4,m4a,3gp,3g2,mj2`).
    pub format_name: String,
    /// Number of streams of any kind in the container.
    pub stream_count: usize,
    /// Total duration of the media (may be unavailable).
    pub duration: Option<Duration>,
    /// Best video stream, if the container has one.
    pub video: Option<VideoStreamInfo>,
}

impl MediaInfo {
    /**
        Returns true if this media has video.
    */
    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }
}
