//! Output management
//!
//! Buffered sinks for the token stream: a counting file writer and a stdout
//! wrapper behind one enum so the run loop does not care where tokens go.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default buffer size for file writing (8MB)
const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Buffered file writer that tracks lines and bytes written
pub struct OutputWriter {
    writer: BufWriter<std::fs::File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::with_buffer_size(path, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(path: PathBuf, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write one token as a line
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Where accepted tokens end up
pub enum OutputSink {
    File(OutputWriter),
    Stdout {
        writer: BufWriter<io::Stdout>,
        lines_written: u64,
        bytes_written: u64,
    },
}

impl OutputSink {
    /// File sink when a path is given, stdout otherwise
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::File(OutputWriter::new(path)?)),
            None => Ok(Self::Stdout {
                writer: BufWriter::new(io::stdout()),
                lines_written: 0,
                bytes_written: 0,
            }),
        }
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        match self {
            Self::File(writer) => writer.write_line(line),
            Self::Stdout {
                writer,
                lines_written,
                bytes_written,
            } => {
                writeln!(writer, "{}", line)?;
                *lines_written += 1;
                *bytes_written += line.len() as u64 + 1;
                Ok(())
            }
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        match self {
            Self::File(writer) => writer.flush(),
            Self::Stdout { writer, .. } => {
                writer.flush()?;
                Ok(())
            }
        }
    }

    pub fn lines_written(&self) -> u64 {
        match self {
            Self::File(writer) => writer.lines_written(),
            Self::Stdout { lines_written, .. } => *lines_written,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        match self {
            Self::File(writer) => writer.bytes_written(),
            Self::Stdout { bytes_written, .. } => *bytes_written,
        }
    }

    /// Path of the file sink, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(writer) => Some(writer.path()),
            Self::Stdout { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut writer = OutputWriter::new(path.clone()).unwrap();
        writer.write_line("alpha").unwrap();
        writer.write_line("beta").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.bytes_written(), 11);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "alpha\nbeta\n");
    }

    #[test]
    fn test_flush_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        {
            let mut writer = OutputWriter::new(path.clone()).unwrap();
            writer.write_line("token").unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "token\n");
    }

    #[test]
    fn test_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale content\n").unwrap();

        let mut writer = OutputWriter::new(path.clone()).unwrap();
        writer.write_line("fresh").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_sink_selects_file_when_path_given() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut sink = OutputSink::new(Some(path.clone())).unwrap();
        sink.write_line("word").unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.lines_written(), 1);
        assert_eq!(sink.path(), Some(path.as_path()));
    }
}
