//! Grab locomotion: engagement tracking feeding rig motion integration.

pub mod controller;
pub mod engagement;
pub mod motion;

pub use controller::GrabLocomotion;
pub use engagement::{
    EngagementState, EngagementTracker, EngagementUpdate, GrabEvent, RigBaseline, TwoHandBaseline,
};
pub use motion::{DragMode, MotionIntegrator, MotionReport};
