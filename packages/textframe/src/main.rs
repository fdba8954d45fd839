mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Commands, MappingArgs};
use std::sync::Arc;
use textframe::config::{Config, FrameDelivery};
use textframe::logging::initialize_logging;
use textframe::pipeline::{FramePipeline, PipelineOptions};
use textframe::replay::Recording;
use textframe::report::OverlayReport;
use textframe::surface::RecordingSurface;

#[tokio::main]
async fn main() {
  let args = Args::parse();

  if let Err(e) = run(args).await {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}

async fn run(args: Args) -> Result<()> {
  match args.command {
    Commands::Version => {
      println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
      Ok(())
    }
    Commands::Overlay { mapping, drop_frames } => {
      let (mut config, recording) = prepare(&mapping).await?;
      if drop_frames {
        config.frame_delivery = FrameDelivery::DropWhenFull;
      }

      let pipeline = FramePipeline::new(
        Box::new(recording.capture()),
        Arc::new(recording.detector()),
        RecordingSurface::new(config.surface),
        PipelineOptions::from(&config),
      );
      let run = pipeline.run().await?;

      OverlayReport::from_run(run).write(mapping.output.as_deref()).await
    }
    Commands::Map { mapping } => {
      let (config, recording) = prepare(&mapping).await?;
      OverlayReport::map_recording(&recording, config.surface, &config.theme)
        .write(mapping.output.as_deref())
        .await
    }
  }
}

async fn prepare(mapping: &MappingArgs) -> Result<(Config, Recording)> {
  let config = Config::load(mapping.config.as_deref())?.with_overrides(
    mapping.width,
    mapping.height,
    mapping.verbose,
  )?;
  initialize_logging(config.verbose);
  match &mapping.config {
    Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
    None => tracing::debug!("using default config"),
  }

  let recording = Recording::load(&mapping.recording).await?;
  tracing::info!(
    frames = recording.frames.len(),
    surface = %config.surface,
    "loaded recording {}",
    mapping.recording.display()
  );

  Ok((config, recording))
}
