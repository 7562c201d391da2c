// Downscale decision and scale filter arguments

use super::backend::Backend;
use super::types::{TargetResolution, TranscodeConfig, VideoStreamInfo};

/// Short-side size the output should have
pub fn target_resolution(config: &TranscodeConfig, stream: &VideoStreamInfo) -> u32 {
    match config.target_resolution {
        TargetResolution::Original => stream.short_side(),
        TargetResolution::Pixels(px) => px,
    }
}

/// Only downscale; sources at or below the target are left alone
pub fn should_scale(config: &TranscodeConfig, stream: &VideoStreamInfo) -> bool {
    stream.short_side() > target_resolution(config, stream)
}

/// `w:h` arguments for a scale filter.
///
/// The short side gets the target; the other axis is a negative multiple so
/// the filter keeps the aspect ratio. `scale_qsv` rejects values below -1.
pub fn scaling(backend: Backend, config: &TranscodeConfig, stream: &VideoStreamInfo) -> String {
    let target = target_resolution(config, stream);
    let mult = match backend {
        Backend::Qsv => 1,
        _ => 2,
    };

    if stream.is_vertical() {
        format!("{}:-{}", target, mult)
    } else {
        format!("-{}:{}", mult, target)
    }
}
