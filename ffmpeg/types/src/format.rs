/*!
    Pixel format and picture layout types.
*/

use std::fmt;

/**
    Video pixel formats.

    The named variants are the formats callers commonly match on; anything
    else the codec library produces is carried as [`PixelFormat::Other`]
    with the library's own format name, and still decodes and writes fine.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Planar YUV 4:2:0, full range (JPEG/MJPEG output)
    Yuvj420p,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Packed BGRA, 32bpp
    Bgra,
    /// Packed RGBA, 32bpp
    Rgba,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:2:0, 10-bit little-endian (HDR content)
    Yuv420p10,
    /// Semi-planar YUV 4:2:0, 10-bit little-endian (HDR hardware decoder output)
    P010le,
    /// Single-plane 8-bit luma
    Gray8,
    /// Any other format, by codec library name
    Other(&'static str),
}

impl PixelFormat {
    /**
        Look up a format by the codec library's name for it.

        Unknown names are kept as [`PixelFormat::Other`].
    */
    pub fn from_name(name: &'static str) -> Self {
        match name {
            "yuv420p" => Self::Yuv420p,
            "yuvj420p" => Self::Yuvj420p,
            "nv12" => Self::Nv12,
            "bgra" => Self::Bgra,
            "rgba" => Self::Rgba,
            "rgb24" => Self::Rgb24,
            "bgr24" => Self::Bgr24,
            "yuv422p" => Self::Yuv422p,
            "yuv444p" => Self::Yuv444p,
            "yuv420p10le" => Self::Yuv420p10,
            "p010le" => Self::P010le,
            "gray" => Self::Gray8,
            other => Self::Other(other),
        }
    }

    /**
        Returns the codec library's name for this format, as accepted
        by `ffplay -pix_fmt`.
    */
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yuv420p => "yuv420p",
            Self::Yuvj420p => "yuvj420p",
            Self::Nv12 => "nv12",
            Self::Bgra => "bgra",
            Self::Rgba => "rgba",
            Self::Rgb24 => "rgb24",
            Self::Bgr24 => "bgr24",
            Self::Yuv422p => "yuv422p",
            Self::Yuv444p => "yuv444p",
            Self::Yuv420p10 => "yuv420p10le",
            Self::P010le => "p010le",
            Self::Gray8 => "gray",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/**
    Width, height and pixel format of a picture.

    A raw video file has no header, so every picture written to one
    must share the same layout.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameLayout {
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
}

impl FrameLayout {
    pub const fn new(width: u32, height: u32, pixel_format: PixelFormat) -> Self {
        Self {
            width,
            height,
            pixel_format,
        }
    }

    /**
        Returns the `WxH` string used by `ffplay -video_size`.
    */
    pub fn video_size(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl fmt::Display for FrameLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "width = {}, height = {}, format = {}",
            self.width, self.height, self.pixel_format
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_formats_keep_their_name() {
        let format = PixelFormat::from_name("yuva444p16le");
        assert_eq!(format, PixelFormat::Other("yuva444p16le"));
        assert_eq!(format.name(), "yuva444p16le");
    }

    #[test]
    fn names_round_trip_through_lookup() {
        for format in [
            PixelFormat::Yuv420p,
            PixelFormat::Yuvj420p,
            PixelFormat::Nv12,
            PixelFormat::Yuv420p10,
            PixelFormat::Gray8,
        ] {
            assert_eq!(PixelFormat::from_name(format.name()), format);
        }
    }

    #[test]
    fn layout_display_and_video_size() {
        let layout = FrameLayout::new(64, 48, PixelFormat::Yuv420p);
        assert_eq!(layout.video_size(), "64x48");
        assert_eq!(
            layout.to_string(),
            "width = 64, height = 48, format = yuv420p"
        );
    }
}
