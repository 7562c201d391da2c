//! Transcode configuration engine.
//!
//! `engine::core` maps a [`engine::TranscodeConfig`] and probed stream
//! metadata to the exact FFmpeg options for one of seven backends (x264,
//! x265, libvpx-vp9, NVENC, QSV, VAAPI, thumbnail). It does no I/O.
//! `engine::probe`, `engine::hardware` and [`config`] are the adapters that
//! gather its inputs.

pub mod config;
pub mod engine;
