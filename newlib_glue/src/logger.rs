//! `log` backend writing to stderr through the write syscall.
//!
//! The level is fixed at build time by the `LOG` environment variable
//! (`ERROR`, `WARN`, `INFO`, `DEBUG`, `TRACE`); anything else turns logging off.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("[{:>5}] {}", level_tag(record.level()), record.args());
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

pub fn level_filter(name: Option<&str>) -> LevelFilter {
    match name {
        Some("ERROR") => LevelFilter::Error,
        Some("WARN") => LevelFilter::Warn,
        Some("INFO") => LevelFilter::Info,
        Some("DEBUG") => LevelFilter::Debug,
        Some("TRACE") => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// Install the logger. Calling it again is harmless.
pub fn init() {
    static LOGGER: Logger = Logger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_filter(option_env!("LOG")));
    }
}

#[cfg(all(unix, test))]
mod test {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(Some("TRACE")), LevelFilter::Trace);
        assert_eq!(level_filter(Some("WARN")), LevelFilter::Warn);
        assert_eq!(level_filter(Some("warn")), LevelFilter::Off);
        assert_eq!(level_filter(Some("")), LevelFilter::Off);
        assert_eq!(level_filter(None), LevelFilter::Off);
    }

    #[test]
    fn test_level_tag() {
        assert_eq!(level_tag(Level::Error), "ERROR");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }
}
