//! Logging setup plus module-gated logging macros.
//!
//! Modules that log on hot or chatty paths define a `const ENABLE_LOGS: bool`
//! and use `log_info!` / `log_warn!` so the output can be silenced per module
//! without touching `RUST_LOG`. Errors that must always surface go through
//! `log::error!` directly.

/// Install `env_logger` as the `log` backend.
///
/// `RUST_LOG` overrides the default `Info` level. Calling this more than once
/// is harmless; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}
