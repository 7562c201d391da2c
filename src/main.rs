mod cli;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use tracing::Level;

use cli::{Commands, PlanArgs};
use ffplan::config::Config;
use ffplan::engine::hardware;
use ffplan::engine::probe::{self, ProbedStreams};
use ffplan::engine::{
    AudioStreamInfo, TranscodeError, TranscodeOptionBuilder, TranscodeOptions,
    VideoStreamInfo, select_devices,
};

/// `plan --json` output
#[derive(Serialize)]
struct PlanOutput<'a> {
    backend: String,
    #[serde(flatten)]
    options: &'a TranscodeOptions,
    /// argv after `ffmpeg`
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Plan(args) => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            plan(&config, &args)
        }
        Commands::Devices { dir } => {
            let raw = hardware::list_dri_devices(&dir)
                .with_context(|| format!("Failed to read {}", dir.display()))?;
            let devices = select_devices(&raw);
            if devices.is_empty() {
                println!("No render devices found in {}", dir.display());
            }
            for device in devices {
                println!("{}", dir.join(device).display());
            }
            Ok(())
        }
        Commands::InitConfig => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };
            if Config::ensure_default_at(&path)? {
                println!("Created default config: {}", path.display());
            } else {
                println!("Config file exists: {}", path.display());
            }
            Ok(())
        }
    }
}

fn source_streams(args: &PlanArgs) -> Result<ProbedStreams> {
    if let Some(input) = &args.input {
        return probe::probe_streams(input);
    }

    if let Some(probe_path) = &args.probe {
        let json = fs::read_to_string(probe_path)
            .with_context(|| format!("Failed to read probe file: {}", probe_path.display()))?;
        return probe::parse_stream_info(&json);
    }

    match (args.width, args.height) {
        (Some(width), Some(height)) => Ok(ProbedStreams {
            video: VideoStreamInfo {
                index: 0,
                height,
                width,
                rotation: args.rotation,
                is_hdr: args.hdr,
            },
            audio: Some(AudioStreamInfo { index: 0 }),
        }),
        _ => anyhow::bail!("Provide an INPUT file, --probe FILE, or --width and --height"),
    }
}

fn plan(config: &Config, args: &PlanArgs) -> Result<()> {
    let streams = source_streams(args)?;
    let audio = streams.audio.clone().unwrap_or_else(|| {
        tracing::warn!("source has no audio stream, assuming index 0");
        AudioStreamInfo::default()
    });

    let devices = if args.devices.is_empty() {
        hardware::detect_dri_devices()
    } else {
        args.devices.clone()
    };

    let builder = if args.thumbnail {
        TranscodeOptionBuilder::thumbnail(&config.ffmpeg)
    } else {
        TranscodeOptionBuilder::new(&config.ffmpeg, &devices)?
    };

    let options = match builder.build(&streams.video, &audio) {
        Ok(options) => options,
        Err(e @ TranscodeError::MissingDevice { .. }) => {
            return Err(e).context("Set accel = \"disabled\" to transcode in software instead");
        }
        Err(e) => return Err(e.into()),
    };

    let input = args
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "input".to_string());

    if args.json {
        let output = PlanOutput {
            backend: builder.backend().to_string(),
            options: &options,
            args: options.command_args(&input, &args.output),
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize options")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Backend:  {}", builder.backend());
    println!("Two-pass: {}", if options.two_pass { "yes" } else { "no" });
    println!();
    println!("{}", options.format_command(&input, &args.output));

    Ok(())
}
