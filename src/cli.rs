use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sub-downloader")]
#[command(about = "Download subtitles for video files from shooter.cn")]
pub struct Cli {
    /// Display log
    #[arg(long)]
    pub log: bool,

    /// Ignore SSL certificate errors
    #[arg(long)]
    pub ise: bool,

    /// Download subtitles for every video under this directory
    #[arg(short = 'r', long = "dir", conflicts_with = "file")]
    pub dir: Option<PathBuf>,

    /// Download subtitles for a single video file
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
}
