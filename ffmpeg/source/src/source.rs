/*!
    Media source implementation.
*/

use std::path::Path;

use ffmpeg_next::format::context::Input as InputContext;

use ffmpeg_types::{Error, MediaDuration, MediaInfo, Packet, Rational, Result, VideoStreamInfo};

use crate::codec_config::CodecConfig;
use crate::convert::pts_from_ffmpeg;
use crate::probe::extract_media_info;

/**
    An opened container that produces the encoded packets of its best
    video stream.

    Opening performs both the container open and the stream probe. The
    underlying format context is closed when the source is dropped.
*/
pub struct Source {
    /// The FFmpeg input context.
    input: InputContext,
    /// Path as given, used in diagnostics and the format dump.
    url: String,
    /// Cached media info.
    media_info: MediaInfo,
    /// Video codec config, until taken by a decoder.
    video_codec_config: Option<CodecConfig>,
    packets_read: u64,
    packets_skipped: u64,
}

impl Source {
    /**
        Open and probe a media file.

        A container without any video stream opens successfully; check
        [`Source::video_stream`] before decoding.

        # Example

        ```ignore
        let source = Source::open("video.mp4")?;
        println!("Duration: {:?}", source.media_info().duration);
        ```
    */
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let input = open_input(path)?;
        let media_info = extract_media_info(&input);

        let video_codec_config = media_info
            .video
            .as_ref()
            .and_then(|video| input.stream(video.index))
            .map(|stream| CodecConfig::new(stream.parameters()));

        Ok(Self {
            input,
            url: path.display().to_string(),
            media_info,
            video_codec_config,
            packets_read: 0,
            packets_skipped: 0,
        })
    }

    /**
        Get the media info for this source.
    */
    pub fn media_info(&self) -> &MediaInfo {
        &self.media_info
    }

    /**
        Get the selected video stream, if the container has one.
    */
    pub fn video_stream(&self) -> Option<&VideoStreamInfo> {
        self.media_info.video.as_ref()
    }

    /**
        Check if this source has video.
    */
    pub fn has_video(&self) -> bool {
        self.media_info.has_video()
    }

    /**
        Take the video codec configuration, if video is present.

        Pass this to `ffmpeg-decode` to create the decoder. Can only be
        taken once.
    */
    pub fn take_video_codec_config(&mut self) -> Option<CodecConfig> {
        self.video_codec_config.take()
    }

    /**
        Get the video stream time base, if video is present.
    */
    pub fn video_time_base(&self) -> Option<Rational> {
        self.video_stream().map(|v| v.time_base)
    }

    /**
        Number of packets read from the container so far, of any stream.
    */
    pub fn packets_read(&self) -> u64 {
        self.packets_read
    }

    /**
        Number of packets read so far that belonged to other streams.
    */
    pub fn packets_skipped(&self) -> u64 {
        self.packets_skipped
    }

    /**
        Print the codec library's description of the input layout to stderr
        (or wherever its log callback points).
    */
    pub fn dump(&self) {
        ffmpeg_next::format::context::input::dump(&self.input, 0, Some(&self.url));
    }

    /**
        Read the next packet of the selected video stream.

        Packets of other streams are read and discarded. Returns
        `Ok(None)` at end of input, and also immediately if the container
        has no video stream.
    */
    pub fn next_packet(&mut self) -> Result<Option<Packet>> {
        let Some(video) = self.media_info.video.as_ref() else {
            return Ok(None);
        };
        let video_index = video.index;
        let time_base = video.time_base;

        loop {
            let mut ffmpeg_packet = ffmpeg_next::Packet::empty();
            match ffmpeg_packet.read(&mut self.input) {
                Ok(()) => {}
                Err(ffmpeg_next::Error::Eof) => return Ok(None),
                Err(e) => return Err(Error::codec(format!("failed to read packet: {e}"))),
            }
            self.packets_read += 1;

            let stream_index = ffmpeg_packet.stream();
            if stream_index != video_index {
                self.packets_skipped += 1;
                continue;
            }

            let data = ffmpeg_packet.data().map(|d| d.to_vec()).unwrap_or_default();

            return Ok(Some(Packet {
                data,
                pts: pts_from_ffmpeg(ffmpeg_packet.pts()),
                dts: pts_from_ffmpeg(ffmpeg_packet.dts()),
                duration: MediaDuration(ffmpeg_packet.duration()),
                time_base,
                is_keyframe: ffmpeg_packet.is_key(),
                stream_index,
            }));
        }
    }
}

/**
    Open the container and read its stream information.
*/
pub(crate) fn open_input(path: &Path) -> Result<InputContext> {
    ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

    ffmpeg_next::format::input(&path).map_err(|e| {
        if e.to_string().contains("No such file") {
            Error::not_found(format!("{}: {e}", path.display()))
        } else {
            Error::codec(format!("{}: {e}", path.display()))
        }
    })
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("url", &self.url)
            .field("format", &self.media_info.format_name)
            .field("packets_read", &self.packets_read)
            .finish_non_exhaustive()
    }
}
