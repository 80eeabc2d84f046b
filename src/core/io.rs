//! Stream selection and line reading
//!
//! Inputs and outputs are described by [`InputSource`] and [`OutputSink`]
//! and opened explicitly by the pipeline entry points, so the pipelines
//! themselves only ever see `BufRead` / `Write`.

use crate::core::error::{BedQueryError, Result};
use crate::formats::bed::BedParseError;
use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for readers and writers (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Where a pipeline reads its lines from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Path(PathBuf),
}

impl InputSource {
    /// Map an optional CLI path to a source; `None` and `-` mean stdin
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => InputSource::Path(p),
            _ => InputSource::Stdin,
        }
    }

    /// Open the source as a buffered reader, decompressing if needed
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            InputSource::Stdin => Ok(Box::new(BufReader::with_capacity(
                DEFAULT_BUFFER_SIZE,
                io::stdin(),
            ))),
            InputSource::Path(path) => open_path(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Where a pipeline writes its records to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    Path(PathBuf),
}

impl OutputSink {
    /// Map an optional CLI path to a sink; `None` and `-` mean stdout
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => OutputSink::Path(p),
            _ => OutputSink::Stdout,
        }
    }

    /// Open the sink as a buffered writer, creating or truncating the file
    pub fn open(&self) -> Result<Box<dyn Write>> {
        match self {
            OutputSink::Stdout => Ok(Box::new(BufWriter::with_capacity(
                DEFAULT_BUFFER_SIZE,
                io::stdout(),
            ))),
            OutputSink::Path(path) => {
                let file =
                    File::create(path).map_err(|e| BedQueryError::unavailable(path, e))?;
                Ok(Box::new(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file)))
            }
        }
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSink::Stdout => write!(f, "<stdout>"),
            OutputSink::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip or bgzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression from the file extension, falling back to magic bytes
///
/// - .gz extension or gzip magic bytes (1f 8b)
/// - .bz2 extension or bzip2 magic bytes (42 5a 68)
/// - Plain text otherwise
pub fn detect_compression(path: &Path, magic: &[u8]) -> CompressionFormat {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if extension == "gz" || magic.starts_with(&[0x1f, 0x8b]) {
        CompressionFormat::Gzip
    } else if extension == "bz2" || magic.starts_with(b"BZh") {
        CompressionFormat::Bzip2
    } else {
        CompressionFormat::Plain
    }
}

fn open_path(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| BedQueryError::unavailable(path, e))?;
    let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);

    let format = {
        let magic = reader.fill_buf()?;
        detect_compression(path, magic)
    };
    debug!("Opened {} ({:?})", path.display(), format);

    Ok(match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            MultiGzDecoder::new(reader),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            BzDecoder::new(reader),
        )),
        CompressionFormat::Plain => Box::new(reader),
    })
}

/// Line iterator that reuses a buffer to avoid allocations
///
/// Consumes its reader lazily, one line per call, and counts lines so
/// callers can report where a failure happened. Lines are read as bytes,
/// so a line that is not valid UTF-8 is reported with its line number.
pub struct LineIterator<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(1024),
            line_number: 0,
        }
    }

    /// Read the next line into the internal buffer
    /// Returns None at EOF, Some(Ok((line_number, &str))) on success, Some(Err) on error
    pub fn next_line(&mut self) -> Option<Result<(usize, &str)>> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                    if self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                }
                match std::str::from_utf8(&self.buffer) {
                    Ok(line) => Some(Ok((self.line_number, line))),
                    Err(_) => Some(Err(BedQueryError::malformed(
                        self.line_number,
                        &String::from_utf8_lossy(&self.buffer),
                        BedParseError::InvalidUtf8,
                    ))),
                }
            }
            Err(e) => Some(Err(e.into())),
        }
    }

    /// 1-based number of the line last returned (0 before the first read)
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Lines that carry no record: blanks, comments and UCSC header lines
///
/// A UCSC header is recognised only when its first token is exactly
/// `track` or `browser`, so contigs such as `track_1` stay records.
pub fn is_header_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || matches!(trimmed.split_whitespace().next(), Some("track") | Some("browser"))
}
