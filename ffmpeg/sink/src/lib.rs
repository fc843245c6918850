/*!
    Raw video output for decoded pictures.

    This crate handles the output side of the decode pipeline. It writes
    packed pictures one after another into a headerless "rawvideo" file, or
    discards them when no destination was requested. A raw file carries no
    metadata, so the sink enforces that every picture has the same layout and
    size, and can print the player command needed to view the result.
*/

mod sink;

pub use ffmpeg_types::{Error, FrameLayout, Result, VideoFrame};
pub use sink::{Destination, RawVideoSink, SinkStats};
