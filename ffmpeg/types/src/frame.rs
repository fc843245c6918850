/*!
    Decoded frame type.
*/

use crate::{FrameLayout, Pts, Rational};

/**
    A decoded video frame.

    `data` holds the picture tightly packed (alignment 1, no row padding),
    planes one after another, exactly as it is written to a raw video file.
*/
#[derive(Clone, Debug)]
pub struct VideoFrame {
    /// Packed pixel data.
    pub data: Vec<u8>,
    /// Width, height and pixel format of the picture.
    pub layout: FrameLayout,
    /// Presentation timestamp (None for frames without timing).
    pub pts: Option<Pts>,
    /// Time base for interpreting the PTS.
    pub time_base: Rational,
}

impl VideoFrame {
    /**
        Create a new video frame.
    */
    pub fn new(data: Vec<u8>, layout: FrameLayout, pts: Option<Pts>, time_base: Rational) -> Self {
        Self {
            data,
            layout,
            pts,
            time_base,
        }
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }
}

static_assertions::assert_impl_all!(VideoFrame: Send, Sync);
