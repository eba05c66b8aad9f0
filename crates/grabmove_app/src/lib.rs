//! Headless application shell for grab locomotion.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use grabmove_app::{App, AppConfig, GestureScript, ScriptedHands};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load("grabmove.toml")?;
//!     grabmove_app::logging::init(grabmove_app::logging::parse_level(&config.log_level)?)?;
//!     let pose = App::new(ScriptedHands::new(GestureScript::pull_and_turn()))
//!         .with_config(config)
//!         .run()?;
//!     println!("rig ended at {:?}", pose.position);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod logging;
mod runner;
pub mod script;
pub mod traits;

pub use builder::{App, AppConfig, BoundsConfig};
pub use context::AppContext;
pub use script::{GestureScript, HandKey, Keyframe, ScriptedHands};
pub use traits::GrabApp;

// ── Re-export the most-used grabmove_core types ────────────────────────────
pub use grabmove_core::{
    FrameInput, GrabConfig, GrabEvent, GrabLocomotion, Hand, HandAnchor, HandInput, InputMode,
    MotionReport, Rig, RigPose, Time,
};

// glam math types, re-exported for convenience
pub use grabmove_core::glam::{Quat, Vec3};
