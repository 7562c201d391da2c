// Stream probing using ffprobe

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

use super::core::{AudioStreamInfo, VideoStreamInfo};

/// Transfer characteristics that mark a stream as HDR (PQ and HLG)
const HDR_TRANSFERS: &[&str] = &["smpte2084", "arib-std-b67"];

#[derive(Debug, Deserialize)]
struct FfprobeSideData {
    rotation: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    rotate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: u32,
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    color_transfer: Option<String>,
    #[serde(default)]
    side_data_list: Vec<FfprobeSideData>,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

/// First video and (optional) audio stream of a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedStreams {
    pub video: VideoStreamInfo,
    pub audio: Option<AudioStreamInfo>,
}

impl FfprobeStream {
    fn rotation(&self) -> i32 {
        // Display matrix side data wins over the legacy rotate tag
        self.side_data_list
            .iter()
            .find_map(|sd| sd.rotation)
            .or_else(|| self.tags.rotate.as_deref().and_then(|r| r.trim().parse().ok()))
            .unwrap_or(0)
    }

    fn is_hdr(&self) -> bool {
        self.color_transfer
            .as_deref()
            .is_some_and(|t| HDR_TRANSFERS.contains(&t))
    }
}

/// Parse `ffprobe -print_format json -show_streams` output
pub fn parse_stream_info(json: &str) -> Result<ProbedStreams> {
    let probe: FfprobeOutput =
        serde_json::from_str(json).context("Failed to parse ffprobe JSON")?;

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .context("No video stream found")?;

    let width = video_stream
        .width
        .context("Failed to get video width")?;
    let height = video_stream
        .height
        .context("Failed to get video height")?;

    let video = VideoStreamInfo {
        index: video_stream.index,
        height,
        width,
        rotation: video_stream.rotation(),
        is_hdr: video_stream.is_hdr(),
    };

    let audio = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .map(|s| AudioStreamInfo { index: s.index });

    Ok(ProbedStreams { video, audio })
}

/// Run ffprobe on a file and parse its streams
pub fn probe_streams(path: &Path) -> Result<ProbedStreams> {
    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()
        .context("Failed to execute ffprobe. Is ffprobe installed and in PATH?")?;

    if !output.status.success() {
        anyhow::bail!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    parse_stream_info(&json_str).with_context(|| format!("Failed to probe {}", path.display()))
}
