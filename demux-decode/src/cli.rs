use std::path::PathBuf;

use clap::Parser;

use ffmpeg_sink::Destination;

use crate::logging::LibraryLogLevel;

/**
    Decode the best video stream of a media file into a headerless raw video file.
*/
#[derive(Parser, Debug, Clone)]
#[command(name = "demux-decode", version)]
#[command(about = "Decode the best video stream of a media file into raw video")]
pub struct Args {
    /// Media file to read
    #[arg(allow_hyphen_values = true)]
    pub source: PathBuf,

    /// File to write packed raw pictures to; pictures are discarded if omitted
    #[arg(allow_hyphen_values = true)]
    pub video_output: Option<PathBuf>,

    /// Minimum severity of codec library messages
    #[arg(long, value_enum, default_value_t = LibraryLogLevel::Info)]
    pub ffmpeg_log_level: LibraryLogLevel,
}

impl Args {
    pub fn destination(&self) -> Destination {
        Destination::from_optional(self.video_output.clone())
    }
}
