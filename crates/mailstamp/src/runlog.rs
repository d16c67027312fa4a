//! Append-only run log file.
//!
//! One timestamped line per message, one run appended per invocation. The
//! file is for human review only and is never read back by the tool.

use chrono::{Local, SecondsFormat};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Handle to the append-only run log.
#[derive(Debug)]
pub struct RunLog {
    file: File,
}

impl RunLog {
    /// Opens the log for appending, creating it if missing. Never truncates.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Appends one `<timestamp> <message>` line.
    pub fn line(&mut self, message: &str) -> io::Result<()> {
        let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        writeln!(self.file, "{timestamp} {message}")
    }
}
