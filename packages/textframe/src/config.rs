//! Runtime configuration, loaded from an optional JSON file and then
//! overridden by command line flags.
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use textframe_vision::{OverlayTheme, SurfaceSize};

/// How the capture side hands frames to detection when detection is busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameDelivery {
    /// Wait for room in the queue. Every frame is processed.
    #[default]
    Wait,
    /// Drop the incoming frame when the queue is full, as a live camera does.
    DropWhenFull,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Pixel size of the surface the overlay is drawn on
    pub surface: SurfaceSize,
    /// Frames that may wait for detection before delivery policy applies
    pub channel_capacity: usize,
    pub frame_delivery: FrameDelivery,
    pub theme: OverlayTheme,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surface: SurfaceSize::new(1080.0, 1920.0),
            channel_capacity: 2,
            frame_delivery: FrameDelivery::default(),
            theme: OverlayTheme::default(),
            verbose: false,
        }
    }
}

impl Config {
    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            bail!("channelCapacity must be at least 1");
        }
        let SurfaceSize { width, height } = self.surface;
        if !(width.is_finite() && height.is_finite()) {
            bail!("surface size must be finite, got {}", self.surface);
        }
        if width < 0.0 || height < 0.0 {
            bail!("surface size must be non-negative, got {}", self.surface);
        }
        Ok(())
    }

    /// Applies command line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        width: Option<f64>,
        height: Option<f64>,
        verbose: bool,
    ) -> Result<Self> {
        if let Some(width) = width {
            self.surface.width = width;
        }
        if let Some(height) = height {
            self.surface.height = height;
        }
        self.verbose |= verbose;
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use textframe_vision::OutlineColor;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.channel_capacity, 2);
        assert_eq!(config.frame_delivery, FrameDelivery::Wait);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"surface":{{"width":390,"height":844}},"frameDelivery":"dropWhenFull","theme":{{"character":{{"strokeWidth":0.5,"color":"red"}}}}}}"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.surface, SurfaceSize::new(390.0, 844.0));
        assert_eq!(config.frame_delivery, FrameDelivery::DropWhenFull);
        assert_eq!(config.channel_capacity, 2);
        assert_eq!(config.theme.character.color, OutlineColor::Red);
        assert_eq!(config.theme.word, OverlayTheme::default().word);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"channelCapacity":0}}"#).unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("channelCapacity"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/textframe.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_overrides(Some(100.0), None, true)
            .unwrap();
        assert_eq!(config.surface, SurfaceSize::new(100.0, 1920.0));
        assert!(config.verbose);

        assert!(Config::default().with_overrides(Some(-1.0), None, false).is_err());
    }

    #[test]
    fn test_non_finite_surface_rejected() {
        let err = Config::default()
            .with_overrides(Some(f64::INFINITY), None, false)
            .unwrap_err();
        assert!(err.to_string().contains("finite"), "{err}");

        assert!(Config::default().with_overrides(None, Some(f64::NAN), false).is_err());
        assert!(Config::default().with_overrides(Some(0.0), Some(0.0), false).is_ok());
    }
}
