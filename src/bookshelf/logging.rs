//! Logger bootstrap for the binary.
//!
//! Library code only talks to the `log` facade. The binary calls
//! [`init_logging`] once to route those records to stderr through
//! `flexi_logger`. `RUST_LOG` wins over the level picked here.

use flexi_logger::{Logger, LoggerHandle};

pub const DEFAULT_LEVEL: &str = "warn";
pub const VERBOSE_LEVEL: &str = "debug";

pub fn level_for(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LEVEL
    } else {
        DEFAULT_LEVEL
    }
}

/// Start logging to stderr. The returned handle must be kept alive.
///
/// Initialization failures are returned as text; callers are expected to
/// carry on without logging rather than abort.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle, String> {
    let level = level_for(verbose);
    Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}
