//! Logger setup.  Every crate logs through the `log` facade; the binary
//! installs a `fern` dispatcher once at startup.

use std::time::Instant;

use anyhow::Context as _;
use log::LevelFilter;
use once_cell::sync::Lazy;

static START: Lazy<Instant> = Lazy::new(Instant::now);

/// Parse a level name (`"off"`, `"error"` … `"trace"`, case-insensitive).
pub fn parse_level(name: &str) -> anyhow::Result<LevelFilter> {
    name.parse::<LevelFilter>()
        .with_context(|| format!("unknown log level `{name}`"))
}

/// Install the global logger writing to stderr.
///
/// Lines look like `[   1.250s DEBUG grabmove_core::locomotion] message`,
/// with the timestamp measured from process start.  Fails if a logger was
/// already installed.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    Lazy::force(&START);
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:>8.3}s {:<5} {}] {}",
                START.elapsed().as_secs_f32(),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("a global logger is already installed")
}
