// HDR to SDR tone mapping filters

use super::backend::Backend;
use super::types::{ToneMapping, TranscodeConfig, VideoStreamInfo};

/// Primaries/transfer/matrix triple for the final zscale stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTriple {
    pub primaries: &'static str,
    pub transfer: &'static str,
    pub matrix: &'static str,
}

/// HD colours for video outputs
pub const BT709: ColorTriple = ColorTriple {
    primaries: "bt709",
    transfer: "bt709",
    matrix: "bt709",
};

/// JPEG and WebP thumbnails only understand BT.601, so convert straight to
/// it to avoid a colour shift in a later conversion
pub const BT601: ColorTriple = ColorTriple {
    primaries: "bt470bg",
    transfer: "601",
    matrix: "bt470bg",
};

pub fn colors(backend: Backend) -> ColorTriple {
    match backend {
        Backend::Thumbnail => BT601,
        _ => BT709,
    }
}

pub fn should_tone_map(config: &TranscodeConfig, stream: &VideoStreamInfo) -> bool {
    stream.is_hdr && config.tonemap != ToneMapping::Disabled
}

/// Nominal peak luminance for linearisation. Lower values brighten the
/// output; hable is already darker than the others so it gets 100.
pub fn nominal_peak_luminance(tonemap: ToneMapping) -> u32 {
    match tonemap {
        ToneMapping::Hable => 100,
        _ => 250,
    }
}

/// Linearise, tone map, convert to the backend's colour triple
pub fn tone_mapping(backend: Backend, config: &TranscodeConfig) -> Vec<String> {
    let colors = colors(backend);
    vec![
        format!("zscale=t=linear:npl={}", nominal_peak_luminance(config.tonemap)),
        format!("tonemap={}:desat=0", config.tonemap),
        format!(
            "zscale=p={}:t={}:m={}:range=pc",
            colors.primaries, colors.transfer, colors.matrix
        ),
    ]
}
