// Transcode option engine - pure, no I/O

mod backend;
mod bitrate;
mod builder;
mod capability;
mod devices;
mod error;
mod preset;
mod scaling;
mod threads;
mod tonemap;
mod types;

pub use backend::Backend;
pub use bitrate::{
    MAX_TO_TARGET_RATIO, bitrate_distribution, bitrate_unit, is_bitrate_constrained,
    max_bitrate_value,
};
pub use builder::{TranscodeOptionBuilder, build_transcode_options, two_pass_eligible};
pub use capability::{EncoderCapabilityProfile, check_supported};
pub use devices::select_devices;
pub use error::{Result, TranscodeError};
pub use preset::{PRESETS, preset_index, preset_options};
pub use scaling::{scaling, should_scale, target_resolution};
pub use threads::thread_options;
pub use tonemap::{BT601, BT709, ColorTriple, colors, nominal_peak_luminance, should_tone_map, tone_mapping};
pub use types::{
    AudioCodec, AudioStreamInfo, BitrateDistribution, TargetResolution, ToneMapping,
    TranscodeConfig, TranscodeHwAccel, TranscodeOptions, VideoCodec, VideoStreamInfo,
};
