/*!
    Decoder configuration types.
*/

use ffmpeg_types::CodecId;

/**
    Configuration for the video decoder.

    Defaults to a single decoding thread and the codec library's default
    decoder for every codec.
*/
#[derive(Clone, Debug)]
pub struct VideoDecoderConfig {
    /// Number of decoding threads passed as the `threads` decoder option.
    pub threads: usize,
    /// Named decoders to prefer for specific codecs, e.g. a MediaCodec-backed
    /// H.264 decoder. Falls back to the default decoder if the named one is
    /// not built into the library.
    pub decoder_overrides: Vec<(CodecId, String)>,
}

impl Default for VideoDecoderConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            decoder_overrides: Vec::new(),
        }
    }
}

impl VideoDecoderConfig {
    /**
        Create a new config with default settings (one thread, default decoders).
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Set the number of decoding threads.
    */
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /**
        Prefer the decoder named `decoder` for streams using `codec`.

        A later override for the same codec replaces the earlier one.
    */
    pub fn with_decoder_for(mut self, codec: CodecId, decoder: impl Into<String>) -> Self {
        self.decoder_overrides.retain(|(c, _)| *c != codec);
        self.decoder_overrides.push((codec, decoder.into()));
        self
    }

    /**
        Returns the preferred decoder name for `codec`, if one is configured.
    */
    pub fn decoder_for(&self, codec: CodecId) -> Option<&str> {
        self.decoder_overrides
            .iter()
            .find(|(c, _)| *c == codec)
            .map(|(_, name)| name.as_str())
    }
}
