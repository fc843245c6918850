/*!
    One decoding run: open a source, decode its best video stream and
    write every picture to a raw video sink.
*/

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use ffmpeg_decode::{VideoDecoder, VideoDecoderConfig, VideoFrame};
use ffmpeg_sink::{Destination, RawVideoSink};
use ffmpeg_source::Source;
use ffmpeg_types::FrameLayout;

use crate::error::{Error, Result};
use crate::init::initialize;
use crate::ledger::{Held, Resource, ResourceLedger};

/**
    What to decode and where to put it.
*/
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub source: PathBuf,
    pub destination: Destination,
    pub decoder: VideoDecoderConfig,
}

impl SessionRequest {
    pub fn new(source: impl Into<PathBuf>, destination: Destination) -> Self {
        Self {
            source: source.into(),
            destination,
            decoder: VideoDecoderConfig::default(),
        }
    }

    pub fn with_decoder_config(mut self, decoder: VideoDecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }
}

/**
    Totals for a completed run.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeSummary {
    pub layout: FrameLayout,
    pub frame_size: usize,
    pub frames_decoded: u64,
    pub packets_read: u64,
    pub packets_skipped: u64,
    pub bytes_written: u64,
}

/**
    An opened source, decoder and sink.

    Fields drop in declaration order, which releases the decoder, then
    the source, then the destination file.
*/
#[derive(Debug)]
pub struct Session {
    decoder: Held<VideoDecoder>,
    source: Held<Source>,
    sink: Held<RawVideoSink>,
    frame_index: u64,
}

impl Session {
    /**
        Open the source, its best video stream's decoder and the sink, in that order.

        Nothing is created at the destination unless the source has a video
        stream and its decoder opened.
    */
    pub fn open(request: SessionRequest, ledger: Option<Arc<ResourceLedger>>) -> Result<Self> {
        initialize()?;
        let ledger = ledger.as_ref();

        let source = Source::open(&request.source).map_err(|source| Error::Open {
            path: request.source.clone(),
            source,
        })?;
        let mut source = Held::new(ledger, Resource::FormatHandle, source);

        let Some(stream) = source.video_stream().cloned() else {
            source.dump();
            return Err(Error::NoVideoStream {
                path: request.source,
            });
        };
        let codec_config = source
            .take_video_codec_config()
            .ok_or_else(|| Error::NoVideoStream {
                path: request.source.clone(),
            })?;
        debug!(
            index = stream.index,
            codec = %stream.codec_id,
            layout = %stream.layout(),
            fps = ?stream.fps(),
            "selected video stream"
        );

        let decoder = VideoDecoder::new(codec_config, stream.time_base, request.decoder)
            .map_err(Error::DecoderSetup)?;
        let decoder = Held::new(ledger, Resource::CodecContext, decoder);
        debug!(decoder = decoder.decoder_name(), "opened video decoder");

        let sink = RawVideoSink::create(
            request.destination.clone(),
            decoder.layout(),
            decoder.frame_size(),
        )
        .map_err(Error::Output)?;
        // Discarding sinks hold no file
        let sink_ledger = request.destination.path().and(ledger);
        let sink = Held::new(sink_ledger, Resource::DestinationFile, sink);

        source.dump();
        info!(
            "Demuxing video from file '{}' into '{}'",
            request.source.display(),
            request.destination
        );

        Ok(Self {
            decoder,
            source,
            sink,
            frame_index: 0,
        })
    }

    pub fn layout(&self) -> FrameLayout {
        self.decoder.layout()
    }

    pub fn frame_size(&self) -> usize {
        self.decoder.frame_size()
    }

    pub fn destination(&self) -> &Destination {
        self.sink.destination()
    }

    /**
        Decode every video packet, flush the decoder and close the sink.

        Any error stops the run; everything is still released when the
        session drops.
    */
    pub fn run(mut self) -> Result<DecodeSummary> {
        while let Some(packet) = self.source.next_packet().map_err(Error::Decode)? {
            let frames = self.decoder.decode(&packet).map_err(Error::Decode)?;
            self.write_frames(frames)?;
        }
        let frames = self.decoder.flush().map_err(Error::Decode)?;
        self.write_frames(frames)?;

        let hint = self.sink.playback_hint();
        let Self {
            decoder,
            source,
            sink,
            frame_index: _,
        } = self;

        let layout = decoder.layout();
        let frame_size = decoder.frame_size();
        let frames_decoded = decoder.frames_decoded();
        let packets_read = source.packets_read();
        let packets_skipped = source.packets_skipped();
        drop(decoder);
        drop(source);

        let Held { value: sink, guard } = sink;
        let stats = sink.finish().map_err(Error::Output)?;
        drop(guard);

        info!("Demuxing succeeded.");
        info!("Play the output video file with the command:\n{hint}");

        Ok(DecodeSummary {
            layout,
            frame_size,
            frames_decoded,
            packets_read,
            packets_skipped,
            bytes_written: stats.bytes_written,
        })
    }

    fn write_frames(&mut self, frames: Vec<VideoFrame>) -> Result<()> {
        for frame in frames {
            debug!("video_frame n:{}", self.frame_index);
            self.frame_index += 1;
            self.sink.write_frame(&frame).map_err(Error::Decode)?;
        }
        Ok(())
    }
}
