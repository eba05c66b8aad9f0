use grabmove_core::{HandInput, Rig};

use crate::context::AppContext;

/// The trait every grabmove application implements.
///
/// Only [`sample_hands`](GrabApp::sample_hands) is required; it is the
/// input collaborator that turns devices (or a script) into per-frame hand
/// samples.  The runner supplies `dt` and drives the locomotion controller.
///
/// ```rust,ignore
/// struct Replay { frames: Vec<(HandInput, HandInput)> }
///
/// impl GrabApp for Replay {
///     fn sample_hands(&mut self, ctx: &mut AppContext) -> (HandInput, HandInput) {
///         let i = ctx.time.frame_count as usize;
///         self.frames.get(i).copied().unwrap_or_else(|| {
///             ctx.request_exit();
///             (HandInput::missing(), HandInput::missing())
///         })
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait GrabApp {
    /// Called once before the first frame.  Attach a collision mover or
    /// reposition the rig here.
    fn setup(&mut self, rig: &mut Rig) {}

    /// Left and right hand samples for this frame.
    fn sample_hands(&mut self, ctx: &mut AppContext) -> (HandInput, HandInput);

    /// Called every frame after the rig has been moved.
    fn after_update(&mut self, ctx: &mut AppContext) {}
}
