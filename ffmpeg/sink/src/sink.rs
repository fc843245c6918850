/*!
    Raw video sink implementation.
*/

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ffmpeg_types::{Error, FrameLayout, Result, VideoFrame};

/**
    Where decoded pictures go.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Write pictures to this file, truncating it.
    File(PathBuf),
    /// Discard pictures.
    Null,
}

impl Destination {
    /**
        File destination if a path was given, the null destination otherwise.
    */
    pub fn from_optional<P: Into<PathBuf>>(path: Option<P>) -> Self {
        match path {
            Some(path) => Self::File(path.into()),
            None => Self::Null,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Null => None,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Null => f.write_str("/dev/null"),
        }
    }
}

enum Output {
    File(BufWriter<File>),
    Null(io::Sink),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(w) => w.write(buf),
            Self::Null(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(w) => w.flush(),
            Self::Null(w) => w.flush(),
        }
    }
}

/**
    Totals reported when a sink is finished.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub frames_written: u64,
    pub bytes_written: u64,
}

/**
    Headerless raw video writer.

    Every picture must match the layout and packed size given at creation.
    The file is closed when the sink is dropped; call [`RawVideoSink::finish`]
    to flush and surface write errors first.
*/
pub struct RawVideoSink {
    output: Output,
    destination: Destination,
    layout: FrameLayout,
    frame_size: usize,
    stats: SinkStats,
}

impl RawVideoSink {
    /**
        Open a sink for the given destination.
    */
    pub fn create(destination: Destination, layout: FrameLayout, frame_size: usize) -> Result<Self> {
        if frame_size == 0 {
            return Err(Error::invalid_data("raw video frame size cannot be zero"));
        }

        let output = match &destination {
            Destination::File(path) => {
                let file = File::create(path).map_err(|e| {
                    Error::Io(io::Error::new(
                        e.kind(),
                        format!("could not open destination file {}: {e}", path.display()),
                    ))
                })?;
                Output::File(BufWriter::new(file))
            }
            Destination::Null => Output::Null(io::sink()),
        };

        Ok(Self {
            output,
            destination,
            layout,
            frame_size,
            stats: SinkStats::default(),
        })
    }

    /**
        Open a sink writing to a file.
    */
    pub fn file<P: Into<PathBuf>>(path: P, layout: FrameLayout, frame_size: usize) -> Result<Self> {
        Self::create(Destination::File(path.into()), layout, frame_size)
    }

    /**
        Open a sink that discards everything.
    */
    pub fn null(layout: FrameLayout, frame_size: usize) -> Result<Self> {
        Self::create(Destination::Null, layout, frame_size)
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn stats(&self) -> SinkStats {
        self.stats
    }

    /**
        Append one picture.

        Fails without writing anything if the picture's layout or size differs
        from the sink's, since a raw file cannot describe a change.
    */
    pub fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        if frame.layout != self.layout {
            return Err(Error::invalid_data(format!(
                "width, height and pixel format have to be constant in a rawvideo file, \
                 but the input video changed: old: {}, new: {}",
                self.layout, frame.layout
            )));
        }
        if frame.data.len() != self.frame_size {
            return Err(Error::invalid_data(format!(
                "packed frame is {} bytes, expected {}",
                frame.data.len(),
                self.frame_size
            )));
        }

        self.output.write_all(&frame.data)?;
        self.stats.frames_written += 1;
        self.stats.bytes_written += frame.data.len() as u64;
        Ok(())
    }

    /**
        Flush buffered data and close the sink.
    */
    pub fn finish(mut self) -> Result<SinkStats> {
        self.output.flush()?;
        Ok(self.stats)
    }

    /**
        Command line that plays the written file back.

        Raw files carry no metadata, so the player has to be told the
        pixel format and dimensions.
    */
    pub fn playback_hint(&self) -> String {
        format!(
            "ffplay -f rawvideo -pix_fmt {} -video_size {} {}",
            self.layout.pixel_format,
            self.layout.video_size(),
            self.destination
        )
    }
}

impl fmt::Debug for RawVideoSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawVideoSink")
            .field("destination", &self.destination)
            .field("layout", &self.layout)
            .field("frame_size", &self.frame_size)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffmpeg_types::{PixelFormat, Rational};

    const LAYOUT: FrameLayout = FrameLayout::new(4, 4, PixelFormat::Yuv420p);
    const FRAME_SIZE: usize = 24;

    fn frame(layout: FrameLayout, len: usize, fill: u8) -> VideoFrame {
        VideoFrame::new(vec![fill; len], layout, None, Rational::new(1, 25))
    }

    #[test]
    fn writes_frames_back_to_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.raw");

        let mut sink = RawVideoSink::file(&path, LAYOUT, FRAME_SIZE).unwrap();
        sink.write_frame(&frame(LAYOUT, FRAME_SIZE, 1)).unwrap();
        sink.write_frame(&frame(LAYOUT, FRAME_SIZE, 2)).unwrap();
        let stats = sink.finish().unwrap();

        assert_eq!(stats.frames_written, 2);
        assert_eq!(stats.bytes_written, 48);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 48);
        assert!(bytes[..24].iter().all(|b| *b == 1));
        assert!(bytes[24..].iter().all(|b| *b == 2));
    }

    #[test]
    fn rejects_layout_change() {
        let mut sink = RawVideoSink::null(LAYOUT, FRAME_SIZE).unwrap();
        let bigger = FrameLayout::new(8, 4, PixelFormat::Yuv420p);
        let err = sink.write_frame(&frame(bigger, 48, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidData { .. }));
        assert!(err.to_string().contains("old: width = 4"));
        assert_eq!(sink.stats().frames_written, 0);
    }

    #[test]
    fn rejects_wrong_size() {
        let mut sink = RawVideoSink::null(LAYOUT, FRAME_SIZE).unwrap();
        assert!(sink.write_frame(&frame(LAYOUT, 23, 0)).is_err());
    }

    #[test]
    fn null_sink_counts_but_creates_nothing() {
        let mut sink = RawVideoSink::null(LAYOUT, FRAME_SIZE).unwrap();
        sink.write_frame(&frame(LAYOUT, FRAME_SIZE, 0)).unwrap();
        assert_eq!(sink.destination().path(), None);
        assert_eq!(sink.finish().unwrap().bytes_written, 24);
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.raw");
        let err = RawVideoSink::file(&path, LAYOUT, FRAME_SIZE).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("could not open destination file"));
    }

    #[test]
    fn playback_hint_names_format_and_size() {
        let sink = RawVideoSink::null(FrameLayout::new(64, 48, PixelFormat::Nv12), 4608).unwrap();
        assert_eq!(
            sink.playback_hint(),
            "ffplay -f rawvideo -pix_fmt nv12 -video_size 64x48 /dev/null"
        );
    }

    #[test]
    fn destination_from_optional() {
        assert_eq!(Destination::from_optional(None::<PathBuf>), Destination::Null);
        assert_eq!(
            Destination::from_optional(Some("/tmp/out.raw")),
            Destination::File(PathBuf::from("/tmp/out.raw"))
        );
    }
}
