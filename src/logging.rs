// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

use env_logger::{Builder, Env, Target};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "mastermind.log";

/// Where log records end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// A file under the user's cache directory; the TUI owns the terminal.
    CacheFile,
}

/// Path of the log file used by [`LogTarget::CacheFile`].
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("mastermind").join(LOG_FILE_NAME))
}

/// Install the global logger. `RUST_LOG` wins over `verbose`.
pub fn init(target: LogTarget, verbose: bool) -> io::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::CacheFile => {
            let path = log_file_path()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no cache directory"))?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            builder.target(Target::Pipe(Box::new(File::create(&path)?)));
        }
    }

    install(builder, target)
}

fn install(mut builder: Builder, target: LogTarget) -> io::Result<()> {
    match builder.try_init() {
        Ok(()) => Ok(()),
        // A second stderr init (tests, embedding) keeps the first logger
        Err(_) if target == LogTarget::Stderr => Ok(()),
        Err(e) => Err(io::Error::other(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_under_app_dir() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("mastermind/mastermind.log"));
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(LogTarget::Stderr, false).unwrap();
        init(LogTarget::Stderr, true).unwrap();
        crate::info_log!("logger initialised");
    }

    #[test]
    fn test_file_logger_that_cannot_install_is_an_error() {
        init(LogTarget::Stderr, false).unwrap();
        let err = install(Builder::new(), LogTarget::CacheFile).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
