/*!
    Container opening, probing and video packet demuxing.

    This crate handles the input side of the decode pipeline. It opens a media
    file, lets the codec library probe its streams, picks the best video stream
    with the library's own scoring, and produces that stream's encoded packets
    while discarding packets of every other stream.
*/

mod codec_config;
mod convert;
mod probe;
mod source;

pub use codec_config::CodecConfig;
pub use ffmpeg_types::{Error, MediaInfo, Packet, Result, VideoStreamInfo};
pub use probe::probe;
pub use convert::pixel_format_from_ffmpeg;
pub use source::Source;
