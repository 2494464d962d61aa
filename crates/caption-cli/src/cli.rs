//! Command line definition

use crate::config::RenderConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Render animated word-level captions
#[derive(Parser, Debug)]
#[command(name = "caption", author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print group and line windows of a transcript
    Timeline {
        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the word primitives of one frame as JSON
    Frame {
        #[command(flatten)]
        render: RenderArgs,

        /// Frame index
        #[arg(short, long)]
        frame: i64,

        /// Also rasterize the frame to this PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Rasterize a frame range to numbered PNG files
    Export {
        #[command(flatten)]
        render: RenderArgs,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// First frame
        #[arg(long, default_value_t = 0)]
        start: i64,

        /// One past the last frame, defaults to the composition end
        #[arg(long)]
        end: Option<i64>,
    },
}

/// Inputs shared by every command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Transcript JSON
    pub transcript: PathBuf,

    /// TOML render config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Style id
    #[arg(short, long)]
    pub style: Option<String>,

    /// Partial style override JSON
    #[arg(long)]
    pub style_override: Option<PathBuf>,

    /// Frame width
    #[arg(long)]
    pub width: Option<u32>,

    /// Frame height
    #[arg(long)]
    pub height: Option<u32>,

    /// Frames per second
    #[arg(long)]
    pub fps: Option<f64>,

    /// Additional font directory, may repeat
    #[arg(long = "font-dir")]
    pub font_dirs: Vec<PathBuf>,

    /// Frames per export batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Export worker threads
    #[arg(long)]
    pub threads: Option<usize>,
}

impl RenderArgs {
    /// Layer command line flags over `config`
    pub fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(style) = &self.style {
            config.style = style.clone();
        }
        if let Some(path) = &self.style_override {
            config.style_override = Some(path.clone());
        }
        if let Some(width) = self.width {
            config.composition.width = width;
        }
        if let Some(height) = self.height {
            config.composition.height = height;
        }
        if let Some(fps) = self.fps {
            config.composition.fps = fps;
        }
        config.font_dirs.extend(self.font_dirs.iter().cloned());
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        config
    }
}
