//! This module provides the logging hooks for the memconv pipeline.
//!
//! Stage kernels stay silent; the orchestrator reports what it did through the
//! `log` facade. The `log_metric!` macro emits one structured key/value line per
//! event at `debug` level, and `init_logging` wires an `env_logger` backend for
//! binaries and tests that want to see it.

use std::fs::OpenOptions;
use std::sync::Once;

use log::LevelFilter;

use crate::error::MemconvError;

/// Logs a structured key-value metric line at `debug` level.
///
/// # Example
/// ```
/// use memconv::log_metric;
/// let rows = 4;
/// log_metric!("event"="convolve", "rows"=&rows);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if $crate::__log::log_enabled!($crate::__log::Level::Debug) {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::__log::debug!("MEMCONV_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs the `env_logger` backend once per process.
///
/// Output is formatted as `[LEVEL] message`. When `log_file` is given, records are
/// appended to that file instead of stderr. A file that cannot be opened returns
/// `Io` and installs nothing, so a later call may still install the backend. Once
/// one call has installed it, later calls are no-ops.
pub fn init_logging(level: LevelFilter, log_file: Option<&str>) -> Result<(), MemconvError> {
    let target = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.is_test(false);
        builder.filter_level(level);

        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        });

        if let Some(file) = target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
