/*!
    Encoded packet type.
*/

use crate::{MediaDuration, Pts, Rational};

/**
    An encoded packet of the selected stream.

    Packets are the unit of data between the demuxer and the decoder.
*/
#[derive(Clone, Debug)]
pub struct Packet {
    /// Compressed data.
    pub data: Vec<u8>,
    /// Presentation timestamp.
    pub pts: Option<Pts>,
    /// Decode timestamp (may differ from PTS for B-frames).
    pub dts: Option<Pts>,
    /// Duration of this packet's content.
    pub duration: MediaDuration,
    /// Time base for interpreting timestamps.
    pub time_base: Rational,
    /// Whether this is a keyframe.
    pub is_keyframe: bool,
    /// Index of the container stream this packet came from.
    pub stream_index: usize,
}

impl Packet {
    /**
        Returns true if the packet carries no payload.
    */
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

static_assertions::assert_impl_all!(Packet: Send, Sync);
