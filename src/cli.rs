use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffplan")]
#[command(about = "Plan FFmpeg transcode options from a policy and source metadata", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config location)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the options a transcode would use (dry run)
    Plan(PlanArgs),

    /// List usable render devices in preference order
    Devices {
        /// DRI directory to scan
        #[arg(long, default_value = "/dev/dri")]
        dir: PathBuf,
    },

    /// Show config status and location, or create default config if missing
    InitConfig,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Source file to probe with ffprobe
    #[arg(value_name = "INPUT", conflicts_with_all = ["probe", "width"])]
    pub input: Option<PathBuf>,

    /// Saved `ffprobe -print_format json -show_streams` output
    #[arg(long, value_name = "FILE", conflicts_with = "width")]
    pub probe: Option<PathBuf>,

    /// Source width (use with --height instead of probing)
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Source height
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Source rotation in degrees
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub rotation: i32,

    /// Source is HDR
    #[arg(long)]
    pub hdr: bool,

    /// Render devices to consider (defaults to /dev/dri contents)
    #[arg(long = "device", value_name = "NAME")]
    pub devices: Vec<String>,

    /// Plan a first-frame thumbnail extraction instead of a transcode
    #[arg(long)]
    pub thumbnail: bool,

    /// Print options as JSON
    #[arg(long)]
    pub json: bool,

    /// Output path shown in the printed command
    #[arg(long, default_value = "output.mp4")]
    pub output: String,
}

pub fn parse() -> Cli {
    Cli::parse()
}
