//! `log` backend writing plain-text lines to a file or stderr.
//!
//! Line format: `<unix millis> <LEVEL> <target>: <message>`.

use std::fs::OpenOptions;
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::AppError;

/// Where log lines go.
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    /// Nothing is logged; stdout/stderr belong to the terminal view
    Discard,
}

pub struct LineLogger {
    level: LevelFilter,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl LineLogger {
    pub fn new(level: LevelFilter, sink: Box<dyn Write + Send>) -> Self {
        Self {
            level,
            sink: Mutex::new(sink),
        }
    }
}

impl Log for LineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            now_ms(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", line);
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub fn format_line(ts_ms: u128, level: log::Level, target: &str, message: &str) -> String {
    format!("{} {:<5} {}: {}", ts_ms, level, target, message)
}

/// Install the process-wide logger. Call once, before anything logs.
pub fn init(level: LevelFilter, target: LogTarget<'_>) -> Result<(), AppError> {
    let (level, sink): (LevelFilter, Box<dyn Write + Send>) = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::Logging(format!("{}: {}", path.display(), e)))?;
            (level, Box::new(LineWriter::new(file)))
        }
        LogTarget::Stderr => (level, Box::new(io::stderr())),
        LogTarget::Discard => (LevelFilter::Off, Box::new(io::sink())),
    };

    // The logger lives for the rest of the process
    let logger: &'static LineLogger = Box::leak(Box::new(LineLogger::new(level, sink)));
    log::set_logger(logger).map_err(|e| AppError::Logging(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
