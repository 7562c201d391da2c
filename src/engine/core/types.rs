// Config, stream metadata and option types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Target video codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    #[default]
    H264,
    Hevc,
    Vp9,
}

impl VideoCodec {
    /// FFmpeg codec name (also the prefix of hardware encoder names)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H264 => "h264",
            Self::Hevc => "hevc",
            Self::Vp9 => "vp9",
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target audio codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    #[default]
    Aac,
    Mp3,
    Libopus,
}

impl AudioCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Mp3 => "mp3",
            Self::Libopus => "libopus",
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware acceleration mode. Exactly one is active per config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscodeHwAccel {
    #[default]
    Disabled,
    Nvenc,
    Qsv,
    Vaapi,
}

impl TranscodeHwAccel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Nvenc => "nvenc",
            Self::Qsv => "qsv",
            Self::Vaapi => "vaapi",
        }
    }

    pub fn is_hardware(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl fmt::Display for TranscodeHwAccel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tone-mapping algorithm used when converting HDR sources to SDR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneMapping {
    Disabled,
    #[default]
    Hable,
    Mobius,
    Reinhard,
}

impl ToneMapping {
    /// Name understood by FFmpeg's `tonemap` filter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Hable => "hable",
            Self::Mobius => "mobius",
            Self::Reinhard => "reinhard",
        }
    }
}

impl fmt::Display for ToneMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-side pixel count to scale down to, or keep the source resolution.
///
/// Serialized as the string `"original"` or a decimal number (`"720"`), which
/// is how it appears in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetResolution {
    Original,
    Pixels(u32),
}

impl Default for TargetResolution {
    fn default() -> Self {
        Self::Pixels(720)
    }
}

impl fmt::Display for TargetResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::Pixels(px) => write!(f, "{}", px),
        }
    }
}

impl std::str::FromStr for TargetResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("original") {
            return Ok(Self::Original);
        }
        s.parse::<u32>()
            .map(Self::Pixels)
            .map_err(|_| format!("invalid target resolution '{}': expected \"original\" or a pixel count", s))
    }
}

impl Serialize for TargetResolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TargetResolution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u32),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Number(px) => Ok(Self::Pixels(px)),
        }
    }
}

fn default_preset() -> String {
    "ultrafast".to_string()
}
fn default_crf() -> u32 {
    23
}
fn default_max_bitrate() -> String {
    "0".to_string()
}
fn default_bframes() -> i32 {
    -1
}

/// System-wide transcoding policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscodeConfig {
    #[serde(default)]
    pub target_video_codec: VideoCodec,

    #[serde(default)]
    pub target_audio_codec: AudioCodec,

    #[serde(default)]
    pub accel: TranscodeHwAccel,

    /// x264-style preset name; unknown names are passed through where the
    /// encoder takes a name and ignored where it takes an index
    #[serde(default = "default_preset")]
    pub preset: String,

    #[serde(default = "default_crf")]
    pub crf: u32,

    /// Bitrate cap such as "4500k" or "10M". "0" disables the cap.
    #[serde(default = "default_max_bitrate")]
    pub max_bitrate: String,

    /// Encoder thread budget (<= 0 leaves threading to the encoder)
    #[serde(default)]
    pub threads: i32,

    #[serde(default)]
    pub two_pass: bool,

    #[serde(default)]
    pub target_resolution: TargetResolution,

    #[serde(default)]
    pub tonemap: ToneMapping,

    #[serde(default = "default_bframes")]
    pub bframes: i32,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            target_video_codec: VideoCodec::default(),
            target_audio_codec: AudioCodec::default(),
            accel: TranscodeHwAccel::default(),
            preset: default_preset(),
            crf: default_crf(),
            max_bitrate: default_max_bitrate(),
            threads: 0,
            two_pass: false,
            target_resolution: TargetResolution::default(),
            tonemap: ToneMapping::default(),
            bframes: default_bframes(),
        }
    }
}

/// Probed video stream metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoStreamInfo {
    pub index: u32,
    pub height: u32,
    pub width: u32,
    /// Display rotation in degrees (may be negative)
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub is_hdr: bool,
}

impl VideoStreamInfo {
    pub fn is_rotated(&self) -> bool {
        self.rotation.unsigned_abs() == 90
    }

    pub fn is_vertical(&self) -> bool {
        self.height > self.width || self.is_rotated()
    }

    /// Length of the shorter side in pixels
    pub fn short_side(&self) -> u32 {
        self.height.min(self.width)
    }
}

/// Probed audio stream metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudioStreamInfo {
    pub index: u32,
}

/// Bitrate triple derived from the configured cap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitrateDistribution {
    pub max: i64,
    pub target: i64,
    /// Half of `target`; fractional for odd targets
    pub min: f64,
    pub unit: String,
}

/// Final option set for one FFmpeg invocation.
///
/// Every entry is a single option with its value (`"-c:v:0 h264"`). Order is
/// significant and must be kept by whoever runs the command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranscodeOptions {
    pub input_options: Vec<String>,
    pub output_options: Vec<String>,
    pub two_pass: bool,
}

/// Split option tokens into argv words, honouring shell quoting
/// (`-x264-params "pools=none"` becomes `["-x264-params", "pools=none"]`).
fn split_tokens(tokens: &[String]) -> Vec<String> {
    let mut args = Vec::new();
    for token in tokens {
        match shlex::split(token) {
            Some(words) => args.extend(words),
            // Unbalanced quotes: fall back to whitespace splitting
            None => args.extend(token.split_whitespace().map(str::to_string)),
        }
    }
    args
}

impl TranscodeOptions {
    /// Input options as individual argv words
    pub fn input_args(&self) -> Vec<String> {
        split_tokens(&self.input_options)
    }

    /// Output options as individual argv words
    pub fn output_args(&self) -> Vec<String> {
        split_tokens(&self.output_options)
    }

    /// Full argv after the program name: input options, `-i input`,
    /// output options, output
    pub fn command_args(&self, input: &str, output: &str) -> Vec<String> {
        let mut args = self.input_args();
        args.push("-i".to_string());
        args.push(input.to_string());
        args.extend(self.output_args());
        args.push(output.to_string());
        args
    }

    /// Human-readable command line for dry runs
    pub fn format_command(&self, input: &str, output: &str) -> String {
        let args = self.command_args(input, output);
        let line = shlex::try_join(args.iter().map(String::as_str))
            .unwrap_or_else(|_| args.join(" "));
        format!("ffmpeg {}", line)
    }
}
