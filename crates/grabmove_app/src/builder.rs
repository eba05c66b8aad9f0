use std::path::Path;

use anyhow::Context as _;
use grabmove_core::glam::Vec3;
use grabmove_core::{BoundsMover, GrabConfig, RigPose};
use serde::{Deserialize, Serialize};

use crate::traits::GrabApp;

/// Axis-aligned play area the rig is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsConfig {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundsConfig {
    pub fn mover(&self) -> BoundsMover {
        BoundsMover::new(self.min, self.max)
    }
}

/// Startup configuration for the runner and the locomotion controller.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes:
///
/// ```toml
/// title = "pinch test"
/// frames = 720
/// log_level = "debug"
///
/// [locomotion]
/// input_mode = "ContinuousPinch"
/// activation_threshold = 0.6
/// release_threshold = 0.4
///
/// [bounds]
/// min = [-4.0, 0.0, -4.0]
/// max = [4.0, 3.0, 4.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Simulation rate in Hz.
    pub frame_rate: f32,
    /// Pace frames against the wall clock instead of stepping a fixed
    /// `1 / frame_rate` as fast as possible.
    pub realtime: bool,
    /// Stop after this many frames; `None` runs until the app requests exit.
    pub frames: Option<u64>,
    pub log_level: String,
    pub start_position: Vec3,
    pub bounds: Option<BoundsConfig>,
    pub locomotion: GrabConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "grabmove".to_string(),
            frame_rate: 72.0,
            realtime: false,
            frames: None,
            log_level: "info".to_string(),
            start_position: Vec3::ZERO,
            bounds: None,
            locomotion: GrabConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in config {}", path.display()))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("parsing TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            anyhow::bail!("frame_rate must be positive, got {}", self.frame_rate);
        }
        if let Some(bounds) = &self.bounds {
            if !bounds.mover().contains(self.start_position) {
                anyhow::bail!(
                    "start_position {} lies outside [bounds] {} .. {}",
                    self.start_position,
                    bounds.min,
                    bounds.max
                );
            }
        }
        self.locomotion
            .validate()
            .context("invalid [locomotion] section")?;
        Ok(())
    }

    /// Seconds per frame.
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate
    }

    pub fn start_pose(&self) -> RigPose {
        RigPose::from_position(self.start_position)
    }
}

/// Entry point.  Use the builder methods to tweak the configuration, then
/// [`run`](App::run).
pub struct App<A: GrabApp> {
    config: AppConfig,
    app_state: A,
}

impl<A: GrabApp> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            app_state,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_frames(mut self, frames: u64) -> Self {
        self.config.frames = Some(frames);
        self
    }

    pub fn with_frame_rate(mut self, hz: f32) -> Self {
        self.config.frame_rate = hz;
        self
    }

    pub fn with_locomotion(mut self, locomotion: GrabConfig) -> Self {
        self.config.locomotion = locomotion;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the frame loop to completion and return the final rig pose.
    pub fn run(self) -> anyhow::Result<RigPose> {
        crate::runner::run_internal(self.config, self.app_state)
    }
}
