//! Logging utilities and structured logging support
//!
//! The library only emits `log` records. Binaries decide whether and how to
//! install a logger.

pub use log::{debug, info, warn, error, trace};

/// Initialize logging with a default filter, still overridable by `RUST_LOG`
///
/// Unknown level names fall back to `info`. Calling this twice is harmless;
/// the second installation attempt is ignored.
pub fn init_with_level(level: &str) {
    let filter = parse_level(level);
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init();
}

/// Map a configuration level name onto a `log` filter
pub fn parse_level(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or(log::LevelFilter::Info)
}
