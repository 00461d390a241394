//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AutoFlow - Turn recorded screen workflows into automation scripts
#[derive(Parser, Debug)]
#[command(name = "autoflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record frames from a video source, then analyze them
    Record {
        /// Directory of still images to play back as the video source
        #[arg(short, long)]
        frames: PathBuf,

        /// Maximum recording duration in seconds (0 = until the source ends
        /// or the frame cap is reached)
        #[arg(short, long, default_value = "0")]
        duration: u64,

        /// Write the suggestion list to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze a directory of already-captured frames without recording
    Analyze {
        /// Directory of JPEG/PNG frames, in filename order
        #[arg(short, long)]
        input: PathBuf,

        /// Write the suggestion list to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
