/*!
    Shared types for decoding media to raw video.

    This crate defines the vocabulary that crosses crate boundaries in the
    workspace. It has no dependency on FFmpeg, so everything here can be
    constructed and tested without the native libraries.

    # Core Types

    - [`Rational`] - Rational numbers for time bases and frame rates
    - [`Pts`] and [`MediaDuration`] - Timestamps in time_base units
    - [`Packet`] - Encoded packet data of the selected stream
    - [`VideoFrame`] - Decoded, tightly packed picture data

    # Format Types

    - [`PixelFormat`] - Video pixel formats and their codec library names
    - [`FrameLayout`] - Width, height and pixel format of a picture
    - [`CodecId`] - Codec identifiers

    # Stream Information

    - [`VideoStreamInfo`] - Metadata of the selected video stream
    - [`MediaInfo`] - Container-level information

    # Error Handling

    - [`Error`] and [`Result`] - Common error types
*/

mod codec;
mod error;
mod format;
mod frame;
mod packet;
mod rational;
mod stream;
mod timestamp;

pub use codec::CodecId;
pub use error::{Error, Result};
pub use format::{FrameLayout, PixelFormat};
pub use frame::VideoFrame;
pub use packet::Packet;
pub use rational::Rational;
pub use stream::{MediaInfo, VideoStreamInfo};
pub use timestamp::{MediaDuration, Pts};
