/*!
    Video decoder implementation.
*/

use std::os::raw::c_int;

use ffmpeg_next::{
    Dictionary,
    codec::{self, decoder::Video as VideoDecoderFFmpeg},
    ffi,
    format::Pixel,
    packet::Mut as PacketMut,
    util::frame::video::Video as VideoFrameFFmpeg,
};

use ffmpeg_source::{CodecConfig, pixel_format_from_ffmpeg};
use ffmpeg_types::{CodecId, Error, FrameLayout, Packet, Pts, Rational, Result, VideoFrame};

use crate::config::VideoDecoderConfig;

/**
    Video decoder for a single stream.

    Owns the codec context and one reusable frame buffer. Both are released
    when the decoder is dropped.
*/
pub struct VideoDecoder {
    decoder: VideoDecoderFFmpeg,
    /// Reused for every received picture, unreferenced after each copy.
    frame: VideoFrameFFmpeg,
    time_base: Rational,
    codec_id: CodecId,
    decoder_name: String,
    layout: FrameLayout,
    frame_size: usize,
    frames_decoded: u64,
}

impl VideoDecoder {
    /**
        Create and open a video decoder from codec configuration.

        # Arguments

        * `codec_config` - Codec configuration from the source
        * `time_base` - Time base for the video stream
        * `config` - Thread count and decoder overrides
    */
    pub fn new(
        codec_config: CodecConfig,
        time_base: Rational,
        config: VideoDecoderConfig,
    ) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

        let codec_id = codec_config.codec_id();
        let parameters = codec_config.into_parameters();
        let codec = find_decoder(parameters.id(), config.decoder_for(codec_id))?;
        let decoder_name = codec.name().to_string();

        let decoder_ctx = codec::context::Context::from_parameters(parameters).map_err(|e| {
            Error::codec(format!("failed to copy codec parameters to decoder context: {e}"))
        })?;

        let mut options = Dictionary::new();
        options.set("threads", &config.threads.to_string());

        let decoder = decoder_ctx
            .decoder()
            .open_as_with(codec, options)
            .and_then(|opened| opened.video())
            .map_err(|e| Error::codec(format!("failed to open {decoder_name} decoder: {e}")))?;

        let layout = FrameLayout::new(
            decoder.width(),
            decoder.height(),
            pixel_format_from_ffmpeg(decoder.format()),
        );
        let frame_size = packed_frame_size(decoder.format(), decoder.width(), decoder.height())?;

        Ok(Self {
            decoder,
            frame: VideoFrameFFmpeg::empty(),
            time_base,
            codec_id,
            decoder_name,
            layout,
            frame_size,
            frames_decoded: 0,
        })
    }

    /**
        Name of the decoder implementation that was opened.
    */
    pub fn decoder_name(&self) -> &str {
        &self.decoder_name
    }

    pub fn codec_id(&self) -> CodecId {
        self.codec_id
    }

    /**
        Get the time base for this decoder.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Layout of the pictures the stream declares.
    */
    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    /**
        Size in bytes of one packed picture of the declared layout.
    */
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /**
        Number of pictures produced so far.
    */
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /**
        Decode a packet, returning decoded frames.

        May return zero, one, or multiple frames depending on codec buffering.
        Packets without payload are ignored, since an empty packet would put
        the decoder into draining mode.
    */
    pub fn decode(&mut self, packet: &Packet) -> Result<Vec<VideoFrame>> {
        if packet.is_empty() {
            return Ok(Vec::new());
        }

        let mut ffmpeg_pkt = ffmpeg_next::Packet::copy(&packet.data);

        unsafe {
            let pkt_ptr = ffmpeg_pkt.as_mut_ptr();
            if let Some(pts) = packet.pts {
                (*pkt_ptr).pts = pts.0;
            }
            if let Some(dts) = packet.dts {
                (*pkt_ptr).dts = dts.0;
            }
            (*pkt_ptr).duration = packet.duration.0;
            if packet.is_keyframe {
                (*pkt_ptr).flags |= ffi::AV_PKT_FLAG_KEY;
            }
        }

        // EAGAIN means the decoder is full - receive frames first then retry
        match self.decoder.send_packet(&ffmpeg_pkt) {
            Ok(()) => {}
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                let mut all_frames = self.receive_frames()?;
                self.decoder
                    .send_packet(&ffmpeg_pkt)
                    .map_err(|e| Error::codec(format!("failed to send packet: {e}")))?;
                all_frames.extend(self.receive_frames()?);
                return Ok(all_frames);
            }
            Err(e) => return Err(Error::codec(format!("failed to send packet: {e}"))),
        }

        self.receive_frames()
    }

    /**
        Flush the decoder to get any remaining buffered frames.

        Call this once at end of input.
    */
    pub fn flush(&mut self) -> Result<Vec<VideoFrame>> {
        let mut all_frames = self.receive_frames()?;

        match self.decoder.send_eof() {
            Ok(()) => {}
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                all_frames.extend(self.receive_frames()?);
                let _ = self.decoder.send_eof();
            }
            Err(ffmpeg_next::Error::Eof) => {}
            Err(e) => return Err(Error::codec(format!("failed to flush decoder: {e}"))),
        }

        all_frames.extend(self.receive_frames()?);
        Ok(all_frames)
    }

    /**
        Receive all available frames from the decoder.
    */
    fn receive_frames(&mut self) -> Result<Vec<VideoFrame>> {
        let mut frames = Vec::new();

        loop {
            match self.decoder.receive_frame(&mut self.frame) {
                Ok(()) => {
                    let packed = self.pack_frame();
                    // SAFETY: the frame is exclusively owned by this decoder
                    unsafe { ffi::av_frame_unref(self.frame.as_mut_ptr()) };
                    frames.push(packed?);
                    self.frames_decoded += 1;
                }
                Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => break,
                Err(ffmpeg_next::Error::Eof) => break,
                Err(e) => return Err(Error::codec(format!("failed to decode frame: {e}"))),
            }
        }

        Ok(frames)
    }

    /**
        Copy the current frame into a tightly packed buffer.
    */
    fn pack_frame(&self) -> Result<VideoFrame> {
        let frame = &self.frame;
        let width = frame.width();
        let height = frame.height();

        if width == 0 || height == 0 {
            return Err(Error::invalid_data("frame has zero dimensions"));
        }

        let format = frame.format();
        let size = packed_frame_size(format, width, height)?;
        let mut data = vec![0u8; size];

        // SAFETY: data/linesize come from a frame the decoder just filled,
        // and the destination holds exactly the size the library computed
        let written = unsafe {
            let ptr = frame.as_ptr();
            ffi::av_image_copy_to_buffer(
                data.as_mut_ptr(),
                size as c_int,
                (*ptr).data.as_ptr() as *const *const u8,
                (*ptr).linesize.as_ptr(),
                format.into(),
                width as c_int,
                height as c_int,
                1,
            )
        };
        if written < 0 {
            return Err(Error::codec(format!(
                "failed to copy frame: {}",
                ffmpeg_next::Error::from(written)
            )));
        }

        let layout = FrameLayout::new(width, height, pixel_format_from_ffmpeg(format));
        Ok(VideoFrame::new(
            data,
            layout,
            frame.pts().map(Pts),
            self.time_base,
        ))
    }
}

/**
    Find the decoder to use, honoring a named override when it exists.
*/
fn find_decoder(id: codec::Id, preferred: Option<&str>) -> Result<ffmpeg_next::Codec> {
    if let Some(name) = preferred {
        if let Some(codec) = ffmpeg_next::decoder::find_by_name(name) {
            return Ok(codec);
        }
        eprintln!("[video_decode] decoder {name} not available, using default for {id:?}");
    }

    ffmpeg_next::decoder::find(id)
        .ok_or_else(|| Error::unsupported_format(format!("no decoder found for codec {id:?}")))
}

/**
    Size of one packed picture (alignment 1) as computed by the codec library.
*/
fn packed_frame_size(format: Pixel, width: u32, height: u32) -> Result<usize> {
    // SAFETY: pure computation on plain values
    let size =
        unsafe { ffi::av_image_get_buffer_size(format.into(), width as c_int, height as c_int, 1) };
    if size < 0 {
        return Err(Error::unsupported_format(format!(
            "cannot size a {width}x{height} {format:?} picture"
        )));
    }
    Ok(size as usize)
}

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("decoder", &self.decoder_name)
            .field("layout", &self.layout)
            .field("frames_decoded", &self.frames_decoded)
            .finish_non_exhaustive()
    }
}
