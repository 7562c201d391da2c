// Integration tests for the software encoder backends (x264, x265, libvpx-vp9)

use ffplan::engine::{TargetResolution, ToneMapping, TranscodeConfig, TranscodeHwAccel, VideoCodec};

use crate::common::assertions::*;
use crate::common::helpers::*;

// ============================================================================
// Quality mode vs bitrate caps
// ============================================================================

#[test]
fn test_h264_quality_mode_with_threads() {
    let config = TranscodeConfig {
        crf: 23,
        max_bitrate: "0".to_string(),
        threads: 4,
        preset: "medium".to_string(),
        ..config(VideoCodec::H264, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1000, 800), NO_DEVICES);
    let out = &options.output_options;

    assert!(options.input_options.is_empty());
    assert_has_option(out, "-threads 4");
    assert_has_option(out, "-x264-params \"pools=none\"");
    assert_has_option(out, "-x264-params \"frame-threads=4\"");
    assert_has_option(out, "-preset medium");
    assert_eq!(out.last().map(String::as_str), Some("-crf 23"));
    assert_no_flag(out, "-maxrate");
    assert_no_flag(out, "-bufsize");
    assert!(!options.two_pass);
}

#[test]
fn test_capped_quality_sets_maxrate_and_bufsize() {
    let config = TranscodeConfig {
        max_bitrate: "4500k".to_string(),
        ..config(VideoCodec::H264, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);
    let out = &options.output_options;

    assert_flag_value(out, "-crf", "23");
    assert_flag_value(out, "-maxrate", "4500k");
    assert_flag_value(out, "-bufsize", "9000k");
    assert_no_flag(out, "-minrate");
    assert!(!options.two_pass);
}

#[test]
fn test_two_pass_uses_bitrate_distribution() {
    let config = TranscodeConfig {
        max_bitrate: "4500k".to_string(),
        two_pass: true,
        ..config(VideoCodec::Hevc, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);
    let out = &options.output_options;

    assert!(options.two_pass);
    assert_flag_value(out, "-b:v", "3104k");
    assert_flag_value(out, "-minrate", "1552k");
    assert_flag_value(out, "-maxrate", "4500k");
    assert_no_flag(out, "-crf");
    assert_ordered(out, "-b:v", "-minrate");
    assert_ordered(out, "-minrate", "-maxrate");
}

#[test]
fn test_two_pass_without_cap_falls_back_to_crf() {
    let config = TranscodeConfig {
        two_pass: true,
        ..config(VideoCodec::H264, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);

    assert!(!options.two_pass);
    assert_flag_value(&options.output_options, "-crf", "23");
}

// ============================================================================
// Codec specifics
// ============================================================================

#[test]
fn test_hevc_uses_x265_params() {
    let config = TranscodeConfig {
        threads: 2,
        ..config(VideoCodec::Hevc, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);
    let out = &options.output_options;

    assert_flag_value(out, "-c:v:0", "hevc");
    assert_has_option(out, "-x265-params \"pools=none\"");
    assert_has_option(out, "-x265-params \"frame-threads=2\"");
    assert!(!out.iter().any(|o| o.contains("x264")));
}

#[test]
fn test_vp9_constrained_quality() {
    let config = config(VideoCodec::Vp9, TranscodeHwAccel::Disabled);
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);
    let out = &options.output_options;

    assert_flag_value(out, "-c:v:0", "vp9");
    assert_flag_value(out, "-cpu-used", "5");
    assert_has_option(out, "-row-mt 1");
    assert_no_flag(out, "-threads");
    assert_flag_value(out, "-crf", "23");
    assert_flag_value(out, "-b:v", "0");
    assert_no_flag(out, "-preset");
}

#[test]
fn test_vp9_two_pass_is_eligible_without_cap() {
    let config = TranscodeConfig {
        two_pass: true,
        preset: "slow".to_string(),
        ..config(VideoCodec::Vp9, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);
    let out = &options.output_options;

    assert!(options.two_pass);
    assert_flag_value(out, "-cpu-used", "2");
    assert_flag_value(out, "-b:v", "0");
    assert_flag_value(out, "-minrate", "0");
    assert_flag_value(out, "-maxrate", "0");
}

#[test]
fn test_vp9_capped_bitrate_keeps_unit() {
    let config = TranscodeConfig {
        max_bitrate: "3M".to_string(),
        ..config(VideoCodec::Vp9, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);

    assert_flag_value(&options.output_options, "-b:v", "3M");
    assert_no_flag(&options.output_options, "-maxrate");
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_base_output_order() {
    let config = config(VideoCodec::H264, TranscodeHwAccel::Disabled);
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);

    assert_eq!(
        options.output_options[..7],
        [
            "-c:v:0 h264",
            "-c:a:1 aac",
            "-bf -1",
            "-movflags faststart",
            "-fps_mode passthrough",
            "-v verbose",
            "-vf scale=-2:720,format=yuv420p",
        ]
    );
    assert_ordered(&options.output_options, "-vf", "-preset");
    assert_ordered(&options.output_options, "-preset", "-crf");
}

#[test]
fn test_small_source_is_not_scaled() {
    let config = config(VideoCodec::H264, TranscodeHwAccel::Disabled);
    let options = build(&config, &landscape(640, 360), NO_DEVICES);

    assert_flag_value(&options.output_options, "-vf", "format=yuv420p");
}

#[test]
fn test_original_resolution_never_scales() {
    let config = TranscodeConfig {
        target_resolution: TargetResolution::Original,
        ..config(VideoCodec::H264, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(3840, 2160), NO_DEVICES);

    assert_flag_value(&options.output_options, "-vf", "format=yuv420p");
}

#[test]
fn test_vertical_source_scales_width() {
    let config = config(VideoCodec::H264, TranscodeHwAccel::Disabled);
    let options = build(&config, &landscape(1080, 1920), NO_DEVICES);

    assert_flag_value(&options.output_options, "-vf", "scale=720:-2,format=yuv420p");
}

#[test]
fn test_hdr_source_is_tone_mapped() {
    let config = TranscodeConfig {
        tonemap: ToneMapping::Reinhard,
        ..config(VideoCodec::H264, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &hdr(3840, 2160), NO_DEVICES);

    assert_flag_value(
        &options.output_options,
        "-vf",
        "scale=-2:720,zscale=t=linear:npl=250,tonemap=reinhard:desat=0,zscale=p=bt709:t=bt709:m=bt709:range=pc,format=yuv420p",
    );
}

#[test]
fn test_tone_mapping_disabled_leaves_hdr_alone() {
    let config = TranscodeConfig {
        tonemap: ToneMapping::Disabled,
        ..config(VideoCodec::H264, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &hdr(3840, 2160), NO_DEVICES);

    assert!(!options.output_options.iter().any(|o| o.contains("tonemap")));
}

#[test]
fn test_stream_indices_are_used() {
    let config = TranscodeConfig {
        target_audio_codec: ffplan::engine::AudioCodec::Libopus,
        ..config(VideoCodec::Vp9, TranscodeHwAccel::Disabled)
    };
    let video = ffplan::engine::VideoStreamInfo {
        index: 2,
        ..landscape(1280, 720)
    };
    let options = ffplan::engine::build_transcode_options(
        &config,
        &video,
        &ffplan::engine::AudioStreamInfo { index: 5 },
        NO_DEVICES,
    )
    .unwrap();

    assert_has_option(&options.output_options, "-c:v:2 vp9");
    assert_has_option(&options.output_options, "-c:a:5 libopus");
}

#[test]
fn test_over_long_cap_does_not_overflow() {
    let config = TranscodeConfig {
        max_bitrate: "99999999999999999999M".to_string(),
        ..config(VideoCodec::H264, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);
    let out = &options.output_options;
    let max = i64::MAX.to_string();

    assert_flag_value(out, "-maxrate", &max);
    assert_flag_value(out, "-bufsize", &max);
}

#[test]
fn test_argv_splits_quoted_params() {
    let config = TranscodeConfig {
        threads: 2,
        ..config(VideoCodec::H264, TranscodeHwAccel::Disabled)
    };
    let options = build(&config, &landscape(1920, 1080), NO_DEVICES);
    let args = options.command_args("in put.mov", "out.mp4");

    assert_eq!(args[0], "-i");
    assert_eq!(args[1], "in put.mov");
    assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    let pools = args.iter().position(|a| a == "pools=none").unwrap();
    assert_eq!(args[pools - 1], "-x264-params");
    assert!(!args.iter().any(|a| a.contains('"')));
}
