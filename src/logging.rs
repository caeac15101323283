//! Log output setup.
//!
//! The crate logs through the `log` facade. Hosts that do not install their
//! own logger can call [`init`] to get `env_logger` output; `RUST_LOG`, when
//! set, takes precedence over the level passed in.

use crate::config::LogLevel;

/// Installs `env_logger` at `level`. Calling it again (or after another
/// logger was installed) is a no-op.
pub fn init(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.into());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_err() {
        log::debug!("logger already installed, keeping it");
    }
}
