//! `grabmove [CONFIG.toml] [SCRIPT.toml]`
//!
//! Replays a hand gesture through the grab locomotion controller and logs
//! the rig pose.  Without a script the built-in pull-and-turn demo plays.

use anyhow::Context as _;
use grabmove_app::{logging, App, AppConfig, GestureScript, ScriptedHands};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    logging::init(logging::parse_level(&config.log_level)?)?;

    let script = match args.next() {
        Some(path) => GestureScript::load(&path)?,
        None => GestureScript::pull_and_turn(),
    };
    if script.looped && config.frames.is_none() {
        anyhow::bail!("a looped gesture script needs `frames` set in the config");
    }
    if script.keyframes.is_empty() {
        log::warn!("gesture script has no keyframes; hands stay untracked");
    }

    let pose = App::new(ScriptedHands::new(script))
        .with_config(config)
        .run()
        .context("running gesture playback")?;

    println!(
        "position {:.3} {:.3} {:.3}  yaw {:.1}°  scale {:.3}",
        pose.position.x,
        pose.position.y,
        pose.position.z,
        pose.yaw().to_degrees(),
        pose.scale
    );
    Ok(())
}
