/*!
    Decode the best video stream of a media file into a headerless raw
    video file.

    [`run`] is the whole program: it takes command line style arguments,
    runs one [`Session`] and returns a process exit status. Platform
    wrappers call it with a synthesized argument list.
*/

pub mod cli;
pub mod error;
pub mod init;
pub mod ledger;
pub mod logging;
pub mod session;

use std::ffi::OsString;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::error;

pub use ffmpeg_decode::VideoDecoderConfig;
pub use ffmpeg_sink::Destination;
pub use ffmpeg_types::CodecId;

pub use self::cli::Args;
pub use self::error::{Error, Result};
pub use self::init::{initialize, is_initialized};
pub use self::ledger::{Resource, ResourceLedger};
pub use self::session::{DecodeSummary, Session, SessionRequest};

/**
    Run the program with default decoders.

    Returns 0 on success and 1 on any failure, including bad arguments.
    `--help` and `--version` print and return 0.
*/
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    run_with(args, VideoDecoderConfig::new())
}

/**
    Run the program, choosing decoders through `decoder_config`.

    The thread count in `decoder_config` is ignored; decoding is always
    single threaded.
*/
pub fn run_with<I, T>(args: I, decoder_config: VideoDecoderConfig) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                kind => {
                    let e = Error::Usage(kind.to_string());
                    error!(kind = e.kind(), "{e}");
                    e.exit_code()
                }
            };
        }
    };

    match execute(&args, decoder_config) {
        Ok(_) => 0,
        Err(e) => {
            error!(kind = e.kind(), "{e}");
            e.exit_code()
        }
    }
}

/**
    Run one session for already parsed arguments.
*/
pub fn execute(args: &Args, decoder_config: VideoDecoderConfig) -> Result<DecodeSummary> {
    if !logging::install_ffmpeg_log_bridge(logging::TracingSink, args.ffmpeg_log_level) {
        logging::set_library_log_level(args.ffmpeg_log_level);
    }

    let request = SessionRequest::new(&args.source, args.destination())
        .with_decoder_config(decoder_config.with_threads(1));
    Session::open(request, None)?.run()
}
