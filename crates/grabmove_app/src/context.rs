use grabmove_core::{GrabEvent, MotionReport, RigPose, Time};

/// Per-frame context passed to every [`GrabApp`](crate::GrabApp) callback.
///
/// The rig pose is read-only here: the locomotion controller is its only
/// writer.  Apps steer the runner through the request methods instead.
///
/// ```rust,ignore
/// fn after_update(&mut self, ctx: &mut AppContext) {
///     if ctx.time.elapsed > 30.0 {
///         ctx.request_exit();
///     }
/// }
/// ```
pub struct AppContext<'a> {
    // ── Read-only ──────────────────────────────────────────────────────────
    /// Frame timing: delta, elapsed, frame count.
    pub time: Time,

    /// Rig pose as of the start of the callback.
    pub rig: &'a RigPose,

    /// What the integrator did this frame (idle before the first update).
    pub report: MotionReport,

    /// Grab transitions from this frame's engagement update.
    pub events: &'a [GrabEvent],

    /// Locomotion is active and at least one hand is grabbing.
    pub driving: bool,

    // ── Requests ───────────────────────────────────────────────────────────
    pub(crate) exit_requested: bool,
    pub(crate) active_request: Option<bool>,
}

impl<'a> AppContext<'a> {
    pub(crate) fn new(time: Time, rig: &'a RigPose) -> Self {
        Self {
            time,
            rig,
            report: MotionReport::idle(),
            events: &[],
            driving: false,
            exit_requested: false,
            active_request: None,
        }
    }

    /// Stop the frame loop after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Switch grab locomotion on or off from the next frame.
    pub fn set_locomotion_active(&mut self, active: bool) {
        self.active_request = Some(active);
    }
}
