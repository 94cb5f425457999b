//! Debug logging for par-shape.
//!
//! Routes every `log` record (from this crate and the `par-shape-*` crates)
//! to a debug log file:
//! - /tmp/par_shape_debug.log on Unix/macOS
//! - %TEMP%\par_shape_debug.log on Windows
//!
//! When `RUST_LOG` is set, records are mirrored to stderr as well. Stdout is
//! left alone so `--json` output stays machine readable.
//!
//! Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then the config
//! file's `log_level` (applied with [`apply_config_level`] once the config is
//! loaded).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Global log bridge
struct DebugLogger {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
    /// Set when the CLI flag or `RUST_LOG` chose the level
    level_locked: bool,
}

impl DebugLogger {
    fn new(mirror_stderr: bool, level_locked: bool) -> Self {
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            Ok(mut f) => {
                // Write header
                let _ = write!(
                    f,
                    "\n{}\npar-shape debug session started at {}\n{}\n",
                    "=".repeat(80),
                    get_timestamp(),
                    "=".repeat(80)
                );
                Some(f)
            }
            // Logging must never stop the shaper from running
            Err(_) => None,
        };

        DebugLogger {
            file: Mutex::new(file),
            mirror_stderr,
            level_locked,
        }
    }
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );

        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<DebugLogger> = OnceLock::new();

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(not(windows))]
    let log_path = PathBuf::from("/tmp/par_shape_debug.log");
    #[cfg(windows)]
    let log_path = std::env::temp_dir().join("par_shape_debug.log");
    log_path
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Most verbose level named in a `RUST_LOG` value.
///
/// Accepts both bare levels (`debug`) and per-target directives
/// (`par_shape_core=trace,warn`). Returns `None` if no directive names a
/// level.
pub fn parse_rust_log(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?.trim();
            level.parse::<LevelFilter>().ok()
        })
        .max()
}

/// Install the log bridge.
///
/// `cli_level` wins over `RUST_LOG`. With neither, logging stays off until
/// [`apply_config_level`] runs. Calling this more than once is harmless.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_level = rust_log.as_deref().and_then(parse_rust_log);
    let level = cli_level.or(env_level).unwrap_or(LevelFilter::Off);
    let level_locked = cli_level.is_some() || env_level.is_some();

    let logger = LOGGER.get_or_init(|| DebugLogger::new(rust_log.is_some(), level_locked));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

/// Apply the config file's level unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LevelFilter) {
    match LOGGER.get() {
        Some(logger) if !logger.level_locked => log::set_max_level(level),
        _ => {}
    }
}
