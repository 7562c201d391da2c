// Option assembly shared by every backend
//
// `build` always runs the same steps in the same order: input options, base
// output options, `-v verbose`, `-vf` (only when there are filters), preset,
// threads, bitrate/quality. Backends differ only in what each step returns.

use tracing::{debug, warn};

use super::backend::Backend;
use super::bitrate::{bitrate_distribution, is_bitrate_constrained};
use super::capability::{EncoderCapabilityProfile, check_supported};
use super::devices::select_devices;
use super::error::{Result, TranscodeError};
use super::preset::preset_options;
use super::scaling::{scaling, should_scale};
use super::threads::thread_options;
use super::tonemap::{should_tone_map, tone_mapping};
use super::types::{
    AudioStreamInfo, TranscodeConfig, TranscodeHwAccel, TranscodeOptions, VideoCodec,
    VideoStreamInfo,
};

const VERBOSITY: &str = "-v verbose";

/// Two-pass is only offered on software video encoders, and only when it is
/// requested and either a bitrate cap is set or the codec is VP9
pub fn two_pass_eligible(backend: Backend, config: &TranscodeConfig) -> bool {
    match backend {
        Backend::X264 | Backend::X265 | Backend::Vp9 => {
            config.two_pass
                && config.accel == TranscodeHwAccel::Disabled
                && (is_bitrate_constrained(config) || config.target_video_codec == VideoCodec::Vp9)
        }
        // A thumbnail is one frame, so it never reports two-pass even when
        // the config asks for it with a cap
        Backend::Thumbnail => false,
        Backend::Nvenc | Backend::Qsv | Backend::Vaapi => false,
    }
}

fn base_input_options(backend: Backend, devices: &[String]) -> Result<Vec<String>> {
    let requires_device = EncoderCapabilityProfile::for_backend(backend).requires_device;
    let device = devices.first();
    if requires_device && device.is_none() {
        return Err(TranscodeError::MissingDevice { backend });
    }

    let options = match (backend, device) {
        (Backend::Nvenc, _) => vec![
            "-init_hw_device cuda=cuda:0".to_string(),
            "-filter_hw_device cuda".to_string(),
        ],
        (Backend::Qsv, _) => vec![
            "-init_hw_device qsv=hw".to_string(),
            "-filter_hw_device hw".to_string(),
        ],
        (Backend::Vaapi, Some(device)) => vec![
            format!("-init_hw_device vaapi=accel:/dev/dri/{}", device),
            "-filter_hw_device accel".to_string(),
        ],
        _ => vec![],
    };
    Ok(options)
}

fn stream_output_options(
    backend: Backend,
    config: &TranscodeConfig,
    video: &VideoStreamInfo,
    audio: &AudioStreamInfo,
) -> Vec<String> {
    let video_codec = EncoderCapabilityProfile::for_backend(backend)
        .video_codec_name(config.target_video_codec);
    vec![
        format!("-c:v:{} {}", video.index, video_codec),
        format!("-c:a:{} {}", audio.index, config.target_audio_codec),
        format!("-bf {}", config.bframes),
        // Moves the moov atom to the front for faster playback start
        "-movflags faststart".to_string(),
        "-fps_mode passthrough".to_string(),
    ]
}

fn base_output_options(
    backend: Backend,
    config: &TranscodeConfig,
    video: &VideoStreamInfo,
    audio: &AudioStreamInfo,
) -> Vec<String> {
    match backend {
        Backend::Thumbnail => vec!["-ss 00:00:00.000".to_string(), "-frames:v 1".to_string()],
        // Latency-tolerant high quality settings from NVIDIA's FFmpeg guide
        Backend::Nvenc => {
            let mut options: Vec<String> = [
                "-tune hq",
                "-qmin 0",
                "-g 250",
                "-b_ref_mode middle",
                "-temporal-aq 1",
                "-rc-lookahead 20",
                "-i_qfactor 0.75",
                "-b_qfactor 1.1",
            ]
            .into_iter()
            .map(str::to_string)
            .collect();
            options.extend(stream_output_options(backend, config, video, audio));
            options
        }
        // Settings from Intel's media-delivery benchmarks
        Backend::Qsv => {
            let mut options: Vec<String> = ["-g 256", "-extbrc 1", "-refs 5"]
                .into_iter()
                .map(str::to_string)
                .collect();
            options.extend(stream_output_options(backend, config, video, audio));
            // vp9_qsv only works in low power mode
            if config.target_video_codec == VideoCodec::Vp9 {
                options.push("-low_power 1".to_string());
            }
            options
        }
        Backend::X264 | Backend::X265 | Backend::Vp9 | Backend::Vaapi => {
            stream_output_options(backend, config, video, audio)
        }
    }
}

fn filter_options(
    backend: Backend,
    config: &TranscodeConfig,
    video: &VideoStreamInfo,
) -> Vec<String> {
    let tone_map = should_tone_map(config, video);
    let scale = should_scale(config, video);

    let mut filters = Vec::new();
    match backend {
        Backend::X264 | Backend::X265 | Backend::Vp9 | Backend::Thumbnail => {
            if scale {
                let mut expr = format!("scale={}", scaling(backend, config, video));
                if backend == Backend::Thumbnail && !tone_map {
                    expr.push_str(":out_color_matrix=bt601:out_range=pc");
                }
                filters.push(expr);
            }
            if tone_map {
                filters.extend(tone_mapping(backend, config));
            }
            filters.push("format=yuv420p".to_string());
        }
        // Tone mapping runs on CPU frames, so it goes before the upload
        Backend::Nvenc | Backend::Qsv | Backend::Vaapi => {
            if tone_map {
                filters.extend(tone_mapping(backend, config));
            }
            let (upload, scaler) = match backend {
                Backend::Nvenc => ("hwupload_cuda", "scale_cuda"),
                Backend::Qsv => ("hwupload=extra_hw_frames=64", "scale_qsv"),
                _ => ("hwupload", "scale_vaapi"),
            };
            filters.push("format=nv12".to_string());
            filters.push(upload.to_string());
            if scale {
                filters.push(format!("{}={}", scaler, scaling(backend, config, video)));
            }
        }
    }
    filters
}

fn bitrate_options(backend: Backend, config: &TranscodeConfig) -> Vec<String> {
    let bitrates = bitrate_distribution(config);
    let unit = &bitrates.unit;
    let crf = config.crf;
    let constrained = bitrates.max > 0;

    match backend {
        Backend::Thumbnail => vec![],
        Backend::X264 | Backend::X265 | Backend::Vp9 if two_pass_eligible(backend, config) => vec![
            format!("-b:v {}{}", bitrates.target, unit),
            format!("-minrate {}{}", bitrates.min, unit),
            format!("-maxrate {}{}", bitrates.max, unit),
        ],
        // libvpx treats -b:v as the cap in constrained quality mode; 0 means unconstrained
        Backend::Vp9 => vec![format!("-crf {}", crf), format!("-b:v {}{}", bitrates.max, unit)],
        // -maxrate is the rolling average limit, -bufsize the peak at any moment
        Backend::X264 | Backend::X265 if constrained => vec![
            format!("-crf {}", crf),
            format!("-maxrate {}{}", bitrates.max, unit),
            format!("-bufsize {}{}", bitrates.max.saturating_mul(2), unit),
        ],
        Backend::X264 | Backend::X265 => vec![format!("-crf {}", crf)],
        Backend::Nvenc if constrained && config.two_pass => vec![
            format!("-b:v {}{}", bitrates.target, unit),
            format!("-maxrate {}{}", bitrates.max, unit),
            format!("-bufsize {}{}", bitrates.target, unit),
            "-multipass 2".to_string(),
        ],
        Backend::Nvenc if constrained => vec![
            format!("-cq:v {}", crf),
            format!("-maxrate {}{}", bitrates.max, unit),
            format!("-bufsize {}{}", bitrates.target, unit),
        ],
        Backend::Nvenc => vec![format!("-cq:v {}", crf)],
        Backend::Qsv => {
            let mut options = if config.target_video_codec == VideoCodec::Vp9 {
                vec![format!("-q:v {}", crf)]
            } else {
                vec![format!("-global_quality {}", crf)]
            };
            if constrained {
                options.push(format!("-maxrate {}{}", bitrates.max, unit));
                options.push(format!("-bufsize {}{}", bitrates.max.saturating_mul(2), unit));
            }
            options
        }
        Backend::Vaapi => {
            let mut options = Vec::new();
            if config.target_video_codec == VideoCodec::Vp9 {
                options.push("-bsf:v vp9_raw_reorder,vp9_superframe".to_string());
            }
            // VAAPI cannot combine a quality target with a bitrate cap
            if constrained {
                options.push(format!("-b:v {}{}", bitrates.target, unit));
                options.push(format!("-maxrate {}{}", bitrates.max, unit));
                options.push(format!("-minrate {}{}", bitrates.min, unit));
                options.push("-rc_mode 3".to_string()); // VBR
            } else {
                options.push(format!("-qp {}", crf));
                options.push(format!("-global_quality {}", crf));
                options.push("-rc_mode 1".to_string()); // CQP
            }
            options
        }
    }
}

/// Builds `TranscodeOptions` for one backend and one immutable config.
#[derive(Debug, Clone)]
pub struct TranscodeOptionBuilder<'a> {
    backend: Backend,
    config: &'a TranscodeConfig,
    devices: Vec<String>,
}

impl<'a> TranscodeOptionBuilder<'a> {
    /// Select the backend for `config` and validate it.
    ///
    /// `devices` are raw DRI node names (`renderD128`, `card0`, ...); they are
    /// filtered and ordered for hardware backends and ignored otherwise. An
    /// empty result is not an error here: `build` reports it for backends that
    /// need a device.
    pub fn new<S: AsRef<str>>(config: &'a TranscodeConfig, devices: &[S]) -> Result<Self> {
        let backend = Backend::select(config.target_video_codec, config.accel);
        check_supported(backend, config)?;

        let devices = if backend.is_hardware() {
            select_devices(devices)
        } else {
            Vec::new()
        };

        if EncoderCapabilityProfile::for_backend(backend).requires_device && devices.is_empty() {
            warn!(backend = %backend, "no usable render device for hardware backend");
        }
        debug!(backend = %backend, codec = %config.target_video_codec, devices = ?devices, "selected transcode backend");

        Ok(Self {
            backend,
            config,
            devices,
        })
    }

    /// Builder for extracting the first frame of a video as a still image
    pub fn thumbnail(config: &'a TranscodeConfig) -> Self {
        Self {
            backend: Backend::Thumbnail,
            config,
            devices: Vec::new(),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Devices in preference order
    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    pub fn two_pass_eligible(&self) -> bool {
        two_pass_eligible(self.backend, self.config)
    }

    pub fn build(&self, video: &VideoStreamInfo, audio: &AudioStreamInfo) -> Result<TranscodeOptions> {
        let backend = self.backend;
        let config = self.config;

        let input_options = base_input_options(backend, &self.devices)?;

        let mut output_options = base_output_options(backend, config, video, audio);
        output_options.push(VERBOSITY.to_string());

        let filters = filter_options(backend, config, video);
        if !filters.is_empty() {
            output_options.push(format!("-vf {}", filters.join(",")));
        }

        output_options.extend(preset_options(backend, config));
        output_options.extend(thread_options(backend, config));
        output_options.extend(bitrate_options(backend, config));

        let options = TranscodeOptions {
            input_options,
            output_options,
            two_pass: self.two_pass_eligible(),
        };

        debug!(
            backend = %backend,
            inputs = options.input_options.len(),
            outputs = options.output_options.len(),
            two_pass = options.two_pass,
            "built transcode options"
        );

        Ok(options)
    }
}

/// Select a backend for `config` and build its options in one call
pub fn build_transcode_options<S: AsRef<str>>(
    config: &TranscodeConfig,
    video: &VideoStreamInfo,
    audio: &AudioStreamInfo,
    devices: &[S],
) -> Result<TranscodeOptions> {
    TranscodeOptionBuilder::new(config, devices)?.build(video, audio)
}
