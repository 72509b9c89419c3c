//! Run log
//!
//! A [`Logger`] appends plain lines to an optional log file. Installed as the
//! global logger it also receives every `log` record and echoes it to the
//! console.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

/// File-backed logger
pub struct Logger {
    /// Log file, absent when the run log is disabled
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a logger writing to a new (truncated) log file
    pub fn new<P: AsRef<Path>>(log_file: P) -> io::Result<Self> {
        let file = File::create(log_file.as_ref())?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// A logger that discards everything
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.lock().map(|file| file.is_some()).unwrap_or(false)
    }

    /// Writes one line to the log file
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Writes the summary of a finished command
    ///
    /// # Arguments
    ///
    /// * `command` - Subcommand name
    /// * `target` - File or directory the command worked on
    /// * `report` - Counts collected by the command
    pub fn log_report(&self, command: &str, target: &Path, report: &dyn fmt::Display) -> io::Result<()> {
        self.log(&format!("{} {}:", command, target.display()))?;
        self.log(&format!("  {}", report))
    }

    /// Installs a logger for the `log` crate writing to `log_file`
    ///
    /// The installed logger is returned so the run summaries go through the
    /// same file handle as the log records.
    pub fn init_global_logger<P: AsRef<Path>>(log_file: P, level: LevelFilter) -> io::Result<&'static Logger> {
        let global_logger: &'static Logger = Box::leak(Box::new(Logger::new(log_file)?));

        if log::set_logger(global_logger).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(global_logger)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            println!("{}", message);
        }
    }

    fn flush(&self) {
        // every line is flushed when written
    }
}
