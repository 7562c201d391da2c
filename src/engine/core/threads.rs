// Encoder threading flags

use super::backend::Backend;
use super::types::TranscodeConfig;

fn generic_threads(config: &TranscodeConfig) -> Vec<String> {
    if config.threads <= 0 {
        return vec![];
    }
    vec![format!("-threads {}", config.threads)]
}

/// x264/x265 size their thread pools independently of `-threads`, so both
/// the pool and the frame-thread count have to be set
fn codec_pool_threads(params_flag: &str, config: &TranscodeConfig) -> Vec<String> {
    if config.threads <= 0 {
        return vec![];
    }
    let mut options = generic_threads(config);
    options.push(format!("{} \"pools=none\"", params_flag));
    options.push(format!("{} \"frame-threads={}\"", params_flag, config.threads));
    options
}

/// Thread-control flags for the backend
pub fn thread_options(backend: Backend, config: &TranscodeConfig) -> Vec<String> {
    match backend {
        Backend::X264 => codec_pool_threads("-x264-params", config),
        Backend::X265 => codec_pool_threads("-x265-params", config),
        Backend::Vp9 => {
            let mut options = vec!["-row-mt 1".to_string()];
            options.extend(generic_threads(config));
            options
        }
        Backend::Thumbnail => generic_threads(config),
        // Encoding runs on the GPU
        Backend::Nvenc | Backend::Qsv | Backend::Vaapi => vec![],
    }
}
