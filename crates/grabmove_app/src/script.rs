//! Keyframed hand gestures for headless runs and regression scenarios.
//!
//! A script is a list of keyframes, each giving both hands' anchor position
//! (or nothing, for an untracked hand) and engagement signal.  Positions and
//! signals are interpolated linearly between keyframes.
//!
//! ```toml
//! looped = false
//!
//! [[keyframes]]
//! time = 0.0
//! left = { position = [-0.3, 1.2, -0.4], engagement = 1.0 }
//!
//! [[keyframes]]
//! time = 0.5
//! left = { position = [-0.3, 1.2, 0.0], engagement = 1.0 }
//! ```

use std::path::Path;

use anyhow::Context as _;
use grabmove_core::glam::Vec3;
use grabmove_core::{HandAnchor, HandInput};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::traits::GrabApp;

/// One hand at one keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandKey {
    /// `None` means the hand is not tracked.
    pub position: Option<Vec3>,
    pub engagement: f32,
}

impl HandKey {
    pub fn held(position: Vec3) -> Self {
        Self {
            position: Some(position),
            engagement: 1.0,
        }
    }

    pub fn open(position: Vec3) -> Self {
        Self {
            position: Some(position),
            engagement: 0.0,
        }
    }

    fn input(&self) -> HandInput {
        self.lerp(self, 0.0)
    }

    fn lerp(&self, to: &Self, t: f32) -> HandInput {
        let engagement = self.engagement + (to.engagement - self.engagement) * t;
        match (self.position, to.position) {
            (Some(a), Some(b)) => HandInput::strength(HandAnchor::at(a.lerp(b, t)), engagement),
            // tracking gaps do not interpolate
            (Some(a), None) => HandInput::strength(HandAnchor::at(a), self.engagement),
            (None, _) => HandInput::missing(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds from the start of the script.
    pub time: f32,
    #[serde(default)]
    pub left: HandKey,
    #[serde(default)]
    pub right: HandKey,
}

/// A whole gesture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureScript {
    pub keyframes: Vec<Keyframe>,
    /// Restart from the first keyframe after the last one.
    pub looped: bool,
}

impl GestureScript {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading gesture script {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in gesture script {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let mut script: Self = toml::from_str(text).context("parsing TOML")?;
        script.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        if script.keyframes.iter().any(|k| !k.time.is_finite() || k.time < 0.0) {
            anyhow::bail!("keyframe times must be finite and non-negative");
        }
        Ok(script)
    }

    /// Built-in demo: a one-hand pull, release, then a two-hand grab that
    /// swings the hands a quarter turn.
    pub fn pull_and_turn() -> Self {
        let (l0, r0) = (Vec3::new(-0.3, 1.2, -0.4), Vec3::new(0.3, 1.2, -0.4));
        let (l1, r1) = (Vec3::new(0.0, 1.2, -0.7), Vec3::new(0.0, 1.2, -0.1));
        let pulled = l0 + Vec3::new(0.0, 0.0, 0.4);
        let keyframes = vec![
            Keyframe { time: 0.0, left: HandKey::open(l0), right: HandKey::open(r0) },
            Keyframe { time: 0.2, left: HandKey::held(l0), right: HandKey::open(r0) },
            Keyframe { time: 0.8, left: HandKey::held(pulled), right: HandKey::open(r0) },
            Keyframe { time: 0.85, left: HandKey::open(pulled), right: HandKey::open(r0) },
            Keyframe { time: 0.9, left: HandKey::open(l0), right: HandKey::open(r0) },
            Keyframe { time: 1.2, left: HandKey::held(l0), right: HandKey::held(r0) },
            Keyframe { time: 2.2, left: HandKey::held(l1), right: HandKey::held(r1) },
            Keyframe { time: 2.3, left: HandKey::held(l1), right: HandKey::held(r1) },
            Keyframe { time: 2.35, left: HandKey::open(l1), right: HandKey::open(r1) },
            Keyframe { time: 2.5, left: HandKey::open(l0), right: HandKey::open(r0) },
        ];
        Self { keyframes, looped: false }
    }

    pub fn duration(&self) -> f32 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    /// Hand samples at `time` seconds.
    pub fn sample(&self, time: f32) -> (HandInput, HandInput) {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            return (HandInput::missing(), HandInput::missing());
        };
        let duration = self.duration();
        let t = if self.looped && duration > 0.0 { time.rem_euclid(duration) } else { time };

        if t <= first.time {
            return (first.left.input(), first.right.input());
        }
        if t >= last.time {
            return (last.left.input(), last.right.input());
        }

        let next = self.keyframes.partition_point(|k| k.time <= t);
        let (a, b) = (&self.keyframes[next - 1], &self.keyframes[next]);
        let span = b.time - a.time;
        let w = if span > 0.0 { (t - a.time) / span } else { 1.0 };
        (a.left.lerp(&b.left, w), a.right.lerp(&b.right, w))
    }
}

/// Plays a [`GestureScript`] as the hand input, exiting when a non-looping
/// script runs out.
pub struct ScriptedHands {
    script: GestureScript,
}

impl ScriptedHands {
    pub fn new(script: GestureScript) -> Self {
        Self { script }
    }
}

impl GrabApp for ScriptedHands {
    fn sample_hands(&mut self, ctx: &mut AppContext) -> (HandInput, HandInput) {
        let elapsed = ctx.time.elapsed as f32;
        if !self.script.looped && elapsed > self.script.duration() {
            ctx.request_exit();
        }
        self.script.sample(elapsed)
    }

    fn after_update(&mut self, ctx: &mut AppContext) {
        for event in ctx.events {
            info!("t={:.3}s {event:?}", ctx.time.elapsed);
        }
        if ctx.driving {
            debug!(
                "t={:.3}s {:?} rig at {:?} yaw {:.1}°",
                ctx.time.elapsed,
                ctx.report.mode,
                ctx.rig.position,
                ctx.rig.yaw().to_degrees()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::App;

    #[test]
    fn interpolates_between_keys() {
        let script = GestureScript {
            keyframes: vec![
                Keyframe { time: 0.0, left: HandKey::open(Vec3::ZERO), right: HandKey::default() },
                Keyframe { time: 1.0, left: HandKey::held(Vec3::X), right: HandKey::default() },
            ],
            looped: false,
        };
        let (l, r) = script.sample(0.25);
        assert!(l.position().unwrap().abs_diff_eq(Vec3::X * 0.25, 1e-6));
        assert!((l.engagement - 0.25).abs() < 1e-6);
        assert!(r.anchor.is_none());

        // clamped at both ends
        assert_eq!(script.sample(-1.0).0.position(), Some(Vec3::ZERO));
        assert_eq!(script.sample(5.0).0.position(), Some(Vec3::X));
    }

    #[test]
    fn looping_wraps_time() {
        let mut script = GestureScript::pull_and_turn();
        script.looped = true;
        let d = script.duration();
        assert_eq!(script.sample(0.5), script.sample(0.5 + d));
    }

    #[test]
    fn parses_and_sorts_toml() {
        let script = GestureScript::from_toml(
            r#"
            [[keyframes]]
            time = 1.0
            left = { position = [0.0, 1.0, 0.0], engagement = 1.0 }

            [[keyframes]]
            time = 0.0
            right = { position = [1.0, 1.0, 0.0] }
            "#,
        )
        .unwrap();
        assert_eq!(script.keyframes[0].time, 0.0);
        assert_eq!(script.keyframes[0].right.engagement, 0.0);
        assert!(script.keyframes[0].left.position.is_none());
        assert_eq!(script.duration(), 1.0);
    }

    #[test]
    fn shipped_spread_script_scales_rig() {
        let script = GestureScript::from_toml(include_str!("../../../demos/spread.toml")).unwrap();
        let config =
            crate::AppConfig::from_toml(include_str!("../../../demos/grabmove.toml")).unwrap();
        let pose = App::new(ScriptedHands::new(script)).with_config(config).run().unwrap();
        assert!(pose.scale > 1.5 && pose.scale <= 2.0, "{}", pose.scale);
        assert!(pose.position.length() < 1e-4, "{:?}", pose.position);
    }

    #[test]
    fn negative_time_rejected() {
        assert!(GestureScript::from_toml("[[keyframes]]\ntime = -1.0\n").is_err());
    }

    #[test]
    fn demo_script_pulls_rig_forward_then_turns() {
        let pose = App::new(ScriptedHands::new(GestureScript::pull_and_turn()))
            .run()
            .unwrap();
        // the left hand pulls toward +Z while held, so the rig is dragged
        // toward -Z
        assert!(pose.position.z < -0.1, "{:?}", pose.position);
        // hands swung from left→right (+X) to front→back (+Z): a -90° turn
        assert!((pose.yaw().to_degrees() + 90.0).abs() < 5.0, "{}", pose.yaw().to_degrees());
        assert_eq!(pose.scale, 1.0);
    }
}
