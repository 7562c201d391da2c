// Preset name to per-encoder speed flags

use super::backend::Backend;
use super::types::TranscodeConfig;

/// x264-style preset names, slowest/best first
pub const PRESETS: &[&str] = &[
    "veryslow",
    "slower",
    "slow",
    "medium",
    "fast",
    "faster",
    "veryfast",
    "superfast",
    "ultrafast",
];

/// libvpx speeds above 5 need realtime mode, which overrides -crf and -threads
const VP9_MAX_CPU_USED: i32 = 5;

/// Position of the configured preset in `PRESETS`, or -1 when unknown
pub fn preset_index(config: &TranscodeConfig) -> i32 {
    PRESETS
        .iter()
        .position(|p| *p == config.preset)
        .map_or(-1, |i| i as i32)
}

/// Preset flags for the backend; empty when the preset has no mapping
pub fn preset_options(backend: Backend, config: &TranscodeConfig) -> Vec<String> {
    let index = preset_index(config);

    match backend {
        Backend::X264 | Backend::X265 => vec![format!("-preset {}", config.preset)],
        Backend::Thumbnail => vec![],
        Backend::Vp9 => {
            let speed = index.min(VP9_MAX_CPU_USED);
            if speed >= 0 {
                vec![format!("-cpu-used {}", speed)]
            } else {
                vec![]
            }
        }
        _ if index < 0 => vec![],
        // p1-p7, where p7 is the highest quality
        Backend::Nvenc => vec![format!("-preset p{}", 7 - index.min(6))],
        // 1-7, where 7 is the fastest
        Backend::Qsv => vec![format!("-preset {}", index.min(6) + 1)],
        Backend::Vaapi => vec![format!("-compression_level {}", index.min(6) + 1)],
    }
}
