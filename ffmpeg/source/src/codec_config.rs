/*!
    Decoder setup data for the selected video stream.
*/

use ffmpeg_next::codec;

use ffmpeg_types::CodecId;

use crate::convert::codec_id_from_ffmpeg;

/**
    Codec parameters of the selected video stream, taken out of the source
    with [`Source::take_video_codec_config`](crate::Source::take_video_codec_config)
    and handed to `ffmpeg-decode`.
*/
#[derive(Clone)]
pub struct CodecConfig {
    parameters: codec::Parameters,
}

impl CodecConfig {
    pub(crate) fn new(parameters: codec::Parameters) -> Self {
        Self { parameters }
    }

    pub fn codec_id(&self) -> CodecId {
        codec_id_from_ffmpeg(self.parameters.id())
    }

    pub fn into_parameters(self) -> codec::Parameters {
        self.parameters
    }
}

impl std::fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CodecConfig").field(&self.codec_id()).finish()
    }
}
