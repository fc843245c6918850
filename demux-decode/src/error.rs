use std::path::PathBuf;

use thiserror::Error;

use ffmpeg_types::Error as MediaError;

/**
    Every way a decoding run can fail.

    All of them end the run; nothing is retried.
*/
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("failed to initialize the codec library: {0}")]
    Init(String),

    #[error("could not open source file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: MediaError,
    },

    #[error("could not find video stream in input file '{}'", path.display())]
    NoVideoStream { path: PathBuf },

    #[error("failed to set up video decoder: {0}")]
    DecoderSetup(#[source] MediaError),

    #[error("output failed: {0}")]
    Output(#[source] MediaError),

    #[error("error decoding video: {0}")]
    Decode(#[source] MediaError),
}

impl Error {
    /**
        Process exit status for this error.
    */
    pub fn exit_code(&self) -> i32 {
        1
    }

    /**
        Short machine-friendly name of the failure class, used as a log field.
    */
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::Init(_) => "init",
            Self::Open { .. } => "open",
            Self::NoVideoStream { .. } => "no_video_stream",
            Self::DecoderSetup(_) => "decoder_setup",
            Self::Output(_) => "output",
            Self::Decode(_) => "decode",
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn open_error_names_path_and_cause() {
        let err = Error::Open {
            path: PathBuf::from("missing.mp4"),
            source: MediaError::not_found("No such file or directory"),
        };
        let text = err.to_string();
        assert!(text.starts_with("could not open source file missing.mp4"));
        assert!(text.contains("No such file or directory"));
        assert!(err.source().is_some());
        assert_eq!(err.kind(), "open");
    }

    #[test]
    fn every_kind_exits_with_one() {
        let errors = [
            Error::Usage("missing source".into()),
            Error::Init("boom".into()),
            Error::NoVideoStream {
                path: PathBuf::from("audio.wav"),
            },
            Error::DecoderSetup(MediaError::unsupported_format("no decoder")),
            Error::Output(MediaError::invalid_data("short write")),
            Error::Decode(MediaError::codec("corrupt slice")),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1, "{}", err.kind());
        }
    }
}
