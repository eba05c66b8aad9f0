use std::time::Duration;

use anyhow::Context as _;
use grabmove_core::{FrameInput, GrabLocomotion, Rig, RigPose, TimeClock};
use log::{debug, info};

use crate::builder::AppConfig;
use crate::context::AppContext;
use crate::traits::GrabApp;

/// Headless frame loop: sample hands, update locomotion, notify the app.
pub(crate) fn run_internal<A: GrabApp>(config: AppConfig, mut app: A) -> anyhow::Result<RigPose> {
    config.validate()?;
    let mut locomotion = GrabLocomotion::new(config.locomotion.clone())
        .context("creating grab locomotion")?;

    let mut rig = Rig::new(config.start_pose());
    if let Some(bounds) = config.bounds {
        rig.set_mover(bounds.mover());
    }
    app.setup(&mut rig);

    let frame_dt = config.frame_dt();
    let mut clock = if config.realtime {
        TimeClock::new()
    } else {
        TimeClock::fixed(frame_dt)
    };

    info!(
        "{}: {} Hz{}, {:?} mode, mover {}",
        config.title,
        config.frame_rate,
        if config.realtime { " (realtime)" } else { "" },
        config.locomotion.input_mode,
        if rig.has_active_mover() { "on" } else { "off" }
    );

    loop {
        if config.frames.is_some_and(|n| clock.peek().frame_count >= n) {
            break;
        }
        let time = clock.tick();

        let pose = rig.pose;
        let mut ctx = AppContext::new(time, &pose);
        ctx.driving = locomotion.is_driving();
        let (left, right) = app.sample_hands(&mut ctx);
        let (mut exit, request) = (ctx.exit_requested, ctx.active_request);
        if let Some(active) = request {
            locomotion.set_active(active);
        }

        let report = locomotion.update(&FrameInput::new(left, right, time.delta), &mut rig);

        let pose = rig.pose;
        let mut ctx = AppContext::new(time, &pose);
        ctx.report = report;
        ctx.events = locomotion.last_events();
        ctx.driving = locomotion.is_driving();
        app.after_update(&mut ctx);
        exit |= ctx.exit_requested;
        if let Some(active) = ctx.active_request {
            locomotion.set_active(active);
        }

        if exit {
            debug!("exit requested at frame {}", time.frame_count);
            break;
        }
        if config.realtime {
            let spent = clock.peek().delta;
            if spent < frame_dt {
                std::thread::sleep(Duration::from_secs_f32(frame_dt - spent));
            }
        }
    }

    let frames = clock.peek().frame_count;
    info!(
        "{}: finished after {frames} frames at {:?}, yaw {:.1}°, scale {:.2}",
        config.title,
        rig.pose.position,
        rig.pose.yaw().to_degrees(),
        rig.pose.scale
    );
    Ok(rig.pose)
}
