// Backend selection - one variant per encoder family; every policy hook
// matches on it

use std::fmt;

use super::types::{TranscodeHwAccel, VideoCodec};

/// Encoder families the option builder can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    // Software encoders
    X264,
    X265,
    Vp9,

    // Still frame extraction from a video (software)
    Thumbnail,

    // Hardware encoders
    Nvenc,
    Qsv,
    Vaapi,
}

impl Backend {
    /// Pick the backend for a codec and acceleration mode.
    ///
    /// Hardware modes map directly to their accelerator; whether the codec is
    /// usable there is checked against the capability profile afterwards.
    pub fn select(codec: VideoCodec, accel: TranscodeHwAccel) -> Self {
        match accel {
            TranscodeHwAccel::Disabled => match codec {
                VideoCodec::H264 => Self::X264,
                VideoCodec::Hevc => Self::X265,
                VideoCodec::Vp9 => Self::Vp9,
            },
            TranscodeHwAccel::Nvenc => Self::Nvenc,
            TranscodeHwAccel::Qsv => Self::Qsv,
            TranscodeHwAccel::Vaapi => Self::Vaapi,
        }
    }

    pub fn is_hardware(&self) -> bool {
        matches!(self, Self::Nvenc | Self::Qsv | Self::Vaapi)
    }

    /// Short name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::X264 => "x264",
            Self::X265 => "x265",
            Self::Vp9 => "libvpx-vp9",
            Self::Thumbnail => "thumbnail",
            Self::Nvenc => "NVENC",
            Self::Qsv => "QSV",
            Self::Vaapi => "VAAPI",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
