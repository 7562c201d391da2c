// Static per-backend capability records

use super::backend::Backend;
use super::error::{Result, TranscodeError};
use super::types::{TranscodeConfig, VideoCodec};

/// What a backend can encode and what it needs to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderCapabilityProfile {
    pub supported_codecs: &'static [VideoCodec],
    /// Backend cannot initialise without a render device handle
    pub requires_device: bool,
    /// Appended to the codec name as `{codec}_{suffix}` (e.g. `h264_nvenc`)
    pub codec_suffix: Option<&'static str>,
}

const ALL_CODECS: &[VideoCodec] = &[VideoCodec::H264, VideoCodec::Hevc, VideoCodec::Vp9];

const X264: EncoderCapabilityProfile = EncoderCapabilityProfile {
    supported_codecs: &[VideoCodec::H264],
    requires_device: false,
    codec_suffix: None,
};

const X265: EncoderCapabilityProfile = EncoderCapabilityProfile {
    supported_codecs: &[VideoCodec::Hevc],
    requires_device: false,
    codec_suffix: None,
};

const VP9: EncoderCapabilityProfile = EncoderCapabilityProfile {
    supported_codecs: &[VideoCodec::Vp9],
    requires_device: false,
    codec_suffix: None,
};

// Thumbnails never assign a video codec, so the target codec is irrelevant.
const THUMBNAIL: EncoderCapabilityProfile = EncoderCapabilityProfile {
    supported_codecs: ALL_CODECS,
    requires_device: false,
    codec_suffix: None,
};

const NVENC: EncoderCapabilityProfile = EncoderCapabilityProfile {
    supported_codecs: &[VideoCodec::H264, VideoCodec::Hevc],
    requires_device: false,
    codec_suffix: Some("nvenc"),
};

const QSV: EncoderCapabilityProfile = EncoderCapabilityProfile {
    supported_codecs: ALL_CODECS,
    requires_device: true,
    codec_suffix: Some("qsv"),
};

const VAAPI: EncoderCapabilityProfile = EncoderCapabilityProfile {
    supported_codecs: ALL_CODECS,
    requires_device: true,
    codec_suffix: Some("vaapi"),
};

impl EncoderCapabilityProfile {
    pub fn for_backend(backend: Backend) -> &'static Self {
        match backend {
            Backend::X264 => &X264,
            Backend::X265 => &X265,
            Backend::Vp9 => &VP9,
            Backend::Thumbnail => &THUMBNAIL,
            Backend::Nvenc => &NVENC,
            Backend::Qsv => &QSV,
            Backend::Vaapi => &VAAPI,
        }
    }

    pub fn supports(&self, codec: VideoCodec) -> bool {
        self.supported_codecs.contains(&codec)
    }

    /// Encoder name passed to `-c:v`
    pub fn video_codec_name(&self, codec: VideoCodec) -> String {
        match self.codec_suffix {
            Some(suffix) => format!("{}_{}", codec.as_str(), suffix),
            None => codec.as_str().to_string(),
        }
    }
}

/// Fails when the configured codec is not in the backend's capability set
pub fn check_supported(backend: Backend, config: &TranscodeConfig) -> Result<()> {
    let codec = config.target_video_codec;
    if EncoderCapabilityProfile::for_backend(backend).supports(codec) {
        Ok(())
    } else {
        Err(TranscodeError::UnsupportedConfiguration { backend, codec })
    }
}
