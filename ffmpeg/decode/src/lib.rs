/*!
    Single-stream video decoding to packed raw pictures.

    This crate turns the encoded packets of one video stream into decoded
    pictures, each copied out of the codec library's padded frame buffer into
    a tightly packed buffer ready to be written to a raw video file.

    # Example

    ```ignore
    use ffmpeg_decode::{VideoDecoder, VideoDecoderConfig};

    let mut source = ffmpeg_source::Source::open("video.mp4")?;
    let codec_config = source.take_video_codec_config().unwrap();
    let time_base = source.video_time_base().unwrap();
    let mut decoder = VideoDecoder::new(codec_config, time_base, VideoDecoderConfig::new())?;

    while let Some(packet) = source.next_packet()? {
        for frame in decoder.decode(&packet)? {
            // frame.data is frame_size() bytes of packed pixels
        }
    }

    // Drain pictures still buffered in the decoder
    let remaining = decoder.flush()?;
    ```
*/

pub use ffmpeg_source::CodecConfig;
pub use ffmpeg_types::{Error, Packet, Result, VideoFrame};

mod config;
mod video;

pub use config::VideoDecoderConfig;
pub use video::VideoDecoder;
