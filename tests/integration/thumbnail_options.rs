// Integration tests for first-frame thumbnail extraction

use ffplan::engine::{
    Backend, TranscodeConfig, TranscodeHwAccel, TranscodeOptionBuilder, VideoCodec,
};

use crate::common::assertions::*;
use crate::common::helpers::*;

#[test]
fn test_thumbnail_sdr_options() {
    let config = config(VideoCodec::H264, TranscodeHwAccel::Disabled);
    let options = build_thumbnail(&config, &landscape(1920, 1080));

    assert!(options.input_options.is_empty());
    assert_eq!(
        options.output_options,
        vec![
            "-ss 00:00:00.000",
            "-frames:v 1",
            "-v verbose",
            "-vf scale=-2:720:out_color_matrix=bt601:out_range=pc,format=yuv420p",
        ]
    );
    assert!(!options.two_pass);
}

#[test]
fn test_thumbnail_hdr_uses_bt601_triple() {
    let config = config(VideoCodec::H264, TranscodeHwAccel::Disabled);
    let thumb = build_thumbnail(&config, &hdr(3840, 2160));
    let video = build(&config, &hdr(3840, 2160), NO_DEVICES);

    assert_flag_value(
        &thumb.output_options,
        "-vf",
        "scale=-2:720,zscale=t=linear:npl=100,tonemap=hable:desat=0,zscale=p=bt470bg:t=601:m=bt470bg:range=pc,format=yuv420p",
    );
    assert_ne!(
        flag_value(&thumb.output_options, "-vf"),
        flag_value(&video.output_options, "-vf")
    );
}

#[test]
fn test_thumbnail_skips_preset_and_bitrate() {
    let config = TranscodeConfig {
        preset: "medium".to_string(),
        max_bitrate: "10M".to_string(),
        two_pass: true,
        threads: 2,
        ..config(VideoCodec::Hevc, TranscodeHwAccel::Disabled)
    };
    let options = build_thumbnail(&config, &landscape(640, 360));
    let out = &options.output_options;

    assert_no_flag(out, "-preset");
    assert_no_flag(out, "-crf");
    assert_no_flag(out, "-maxrate");
    assert_no_flag(out, "-c:v:0");
    assert_flag_value(out, "-threads", "2");
    assert_flag_value(out, "-vf", "format=yuv420p");
    assert!(!options.two_pass);
}

#[test]
fn test_thumbnail_ignores_hardware_settings() {
    let config = config(VideoCodec::Vp9, TranscodeHwAccel::Qsv);
    let builder = TranscodeOptionBuilder::thumbnail(&config);
    assert_eq!(builder.backend(), Backend::Thumbnail);

    let options = builder.build(&landscape(1920, 1080), &audio()).unwrap();
    assert!(options.input_options.is_empty());
    assert_flag_value(
        &options.output_options,
        "-vf",
        "scale=-2:720:out_color_matrix=bt601:out_range=pc,format=yuv420p",
    );
}
