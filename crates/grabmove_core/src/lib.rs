//! grabmove_core: two-handed grab locomotion for VR player rigs.
//!
//! Per frame, hand-anchor poses and per-hand engagement signals go in; the
//! rig's position, yaw and uniform scale come out.
//!
//! ```rust,ignore
//! use grabmove_core::{FrameInput, GrabConfig, GrabLocomotion, HandAnchor, HandInput, Rig};
//! use grabmove_core::glam::Vec3;
//!
//! let mut locomotion = GrabLocomotion::new(GrabConfig::controllers())?;
//! let mut rig = Rig::default();
//!
//! let left = HandInput::pressed(HandAnchor::at(Vec3::new(-0.2, 1.0, -0.3)), true);
//! let right = HandInput::missing();
//! locomotion.update(&FrameInput::new(left, right, 1.0 / 72.0), &mut rig);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod locomotion;
pub mod math;
pub mod mover;
pub mod rig;
pub mod time;
pub mod transform;

pub use config::{GrabConfig, InputMode, ScaleRange};
pub use error::ConfigError;
pub use input::{FrameInput, Hand, HandAnchor, HandInput};
pub use locomotion::{
    DragMode, EngagementState, EngagementTracker, EngagementUpdate, GrabEvent, GrabLocomotion,
    MotionIntegrator, MotionReport, RigBaseline, TwoHandBaseline,
};
pub use mover::{BoundsMover, CollisionMover};
pub use rig::Rig;
pub use time::{Time, TimeClock};
pub use transform::RigPose;

// re-export glam so callers can build inputs without a direct dependency
pub use glam;
