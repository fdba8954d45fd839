//! Command line arguments backing the `textframe` binary.
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "textframe",
  about = "Replays captured frames through text detection and reports the overlay boxes drawn for each frame",
  version
)]
pub struct Args {
  #[command(subcommand)]
  pub command: Commands,
}

/// Options shared by every command that maps a recording
#[derive(ClapArgs, Debug)]
pub struct MappingArgs {
  /// Recording JSON file with frames and their detection results
  pub recording: PathBuf,

  /// Surface width in pixels (overrides the config file)
  #[arg(long)]
  pub width: Option<f64>,

  /// Surface height in pixels (overrides the config file)
  #[arg(long)]
  pub height: Option<f64>,

  /// JSON config file
  #[arg(long, short = 'c')]
  pub config: Option<PathBuf>,

  /// Write the report here instead of stdout
  #[arg(long, short = 'o')]
  pub output: Option<PathBuf>,

  /// Enable debug logging
  #[arg(long, short = 'v')]
  pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Run the recording through the capture/detection/render pipeline
  Overlay {
    #[command(flatten)]
    mapping: MappingArgs,

    /// Drop frames while detection is busy instead of waiting
    #[arg(long)]
    drop_frames: bool,
  },
  /// Map each recorded frame directly, without the pipeline
  Map {
    #[command(flatten)]
    mapping: MappingArgs,
  },
}
