//! JSON-lines output of lag records

use crate::lag::error::{PollError, PollResult};
use crate::lag::transform::flatten;
use crate::lag::types::ConsumerStatus;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Shape of the emitted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One group record followed by one record per partition
    #[default]
    Flat,
    /// The full decoded status, one line per consumer
    Status,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["flat", "status"];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(OutputFormat::Flat),
            "status" => Ok(OutputFormat::Status),
            other => Err(format!(
                "Unknown output format '{}' (expected one of: {})",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Flat => write!(f, "flat"),
            OutputFormat::Status => write!(f, "status"),
        }
    }
}

/// Writes one JSON document per line
pub struct RecordWriter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Emit the records for one consumer status, returning the number of
    /// partition records written
    pub fn write_status(&mut self, status: &ConsumerStatus) -> PollResult<usize> {
        match self.format {
            OutputFormat::Flat => {
                let records = flatten(status);
                // Encode everything first so a failure leaves no partial group behind
                let mut lines = Vec::with_capacity(records.partitions.len() + 1);
                lines.push(encode(&status.group, &records.group)?);
                for partition in &records.partitions {
                    lines.push(encode(&status.group, partition)?);
                }
                for line in &lines {
                    self.write_line(line)?;
                }
                Ok(records.partitions.len())
            }
            OutputFormat::Status => {
                let line = encode(&status.group, status)?;
                self.write_line(&line)?;
                Ok(status.partitions.len())
            }
        }
    }

    pub fn flush(&mut self) -> PollResult<()> {
        self.writer
            .flush()
            .map_err(|e| PollError::Output { source: e })
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) -> PollResult<()> {
        writeln!(self.writer, "{}", line).map_err(|e| PollError::Output { source: e })
    }
}

/// Output file that is only created (and truncated) by the first write, or
/// by [`LazyFile::create`]
///
/// A run that fails before emitting a record leaves an existing file as it was.
pub struct LazyFile {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl LazyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Create the file now if nothing has been written to it yet
    pub fn create(&mut self) -> io::Result<()> {
        self.open().map(|_| ())
    }

    fn open(&mut self) -> io::Result<&mut BufWriter<File>> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                log::debug!("Writing records to {}", self.path.display());
                BufWriter::new(File::create(&self.path)?)
            }
        };
        Ok(self.file.insert(file))
    }
}

impl Write for LazyFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.file {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

fn encode<T: Serialize>(group: &str, value: &T) -> PollResult<String> {
    serde_json::to_string(value).map_err(|e| PollError::Encode {
        group: group.to_string(),
        source: e,
    })
}
