//! BED format records
//!
//! Parses BED-like lines (chrom, start, end, any number of extra fields)
//! and writes them back in canonical tab-separated form. The cleanup
//! pipeline lives here too: it is nothing more than parse-then-format
//! over a stream.

use crate::core::io::{is_header_line, InputSource, LineIterator, OutputSink};
use crate::core::{BedQueryError, Result};
use log::{debug, info};
use memchr::memchr_iter;
use std::fmt;
use std::io::{BufRead, Write};
use std::time::Instant;

/// How fields are separated on input lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// Exactly one tab between fields; empty fields are kept
    #[default]
    Tab,
    /// Any run of whitespace between fields
    Whitespace,
}

/// BED parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BedParseError {
    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Wrong number of fields: expected {expected}, found {found}")]
    WrongFieldCount { expected: usize, found: usize },

    #[error("Invalid number in field {0}: '{1}'")]
    InvalidNumber(&'static str, String),

    #[error("Invalid range: end ({end}) < start ({start})")]
    InvalidRange { start: u64, end: u64 },

    #[error("Invalid query range: end ({end}) < start ({start})")]
    InvalidQueryRange { start: i64, end: i64 },

    #[error("Invalid UTF-8 in line")]
    InvalidUtf8,
}

/// One genomic interval: `[start, end)` on `chrom`, plus trailing fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BedRecord {
    chrom: String,
    start: u64,
    end: u64,
    extra_fields: Vec<String>,
}

impl BedRecord {
    /// Build a record, rejecting `end < start`
    pub fn new(
        chrom: impl Into<String>,
        start: u64,
        end: u64,
        extra_fields: Vec<String>,
    ) -> std::result::Result<Self, BedParseError> {
        if end < start {
            return Err(BedParseError::InvalidRange { start, end });
        }
        Ok(Self {
            chrom: chrom.into(),
            start,
            end,
            extra_fields,
        })
    }

    /// Parse one line. A trailing newline (`\n` or `\r\n`) is ignored.
    pub fn parse(line: &str, delimiter: Delimiter) -> std::result::Result<Self, BedParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields = match delimiter {
            Delimiter::Tab => split_tabs(line),
            Delimiter::Whitespace => line.split_whitespace().collect(),
        };

        if fields.len() < 3 {
            return Err(BedParseError::TooFewFields {
                expected: 3,
                found: fields.len(),
            });
        }

        let start = parse_coord("start", fields[1])?;
        let end = parse_coord("end", fields[2])?;
        let extra_fields = fields[3..].iter().map(|f| f.to_string()).collect();

        Self::new(fields[0], start, end, extra_fields)
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Fields after `end`, in their original order
    pub fn extra_fields(&self) -> &[String] {
        &self.extra_fields
    }

    /// Interval length; zero for point features
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Canonical line: fields joined by tabs, terminated by one newline
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }

    /// Write the canonical line to `writer`
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self)
    }
}

impl fmt::Display for BedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.end)?;
        for field in &self.extra_fields {
            write!(f, "\t{}", field)?;
        }
        Ok(())
    }
}

/// Split on single tabs using memchr
fn split_tabs(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return Vec::new();
    }
    let mut fields = Vec::with_capacity(12);
    let mut field_start = 0;
    for tab_pos in memchr_iter(b'\t', line.as_bytes()) {
        fields.push(&line[field_start..tab_pos]);
        field_start = tab_pos + 1;
    }
    fields.push(&line[field_start..]);
    fields
}

pub(crate) fn parse_coord<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> std::result::Result<T, BedParseError> {
    value
        .parse()
        .map_err(|_| BedParseError::InvalidNumber(field, value.to_string()))
}

/// Cleanup statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormatStats {
    /// Records parsed and written
    pub records: usize,
    /// Blank, comment and header lines skipped
    pub skipped: usize,
}

/// Streams for the cleanup pipeline
#[derive(Debug, Clone)]
pub struct FormatConfig {
    pub input: InputSource,
    pub output: OutputSink,
}

/// Clean up a BED stream
///
/// Each line is split on whitespace, parsed, and written back with single
/// tabs. Lines are processed one at a time; the first malformed line aborts
/// the run.
pub fn format_bed<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<FormatStats> {
    let mut lines = LineIterator::new(reader);
    let mut stats = FormatStats::default();

    while let Some(next) = lines.next_line() {
        let (line_number, line) = next?;
        if is_header_line(line) {
            stats.skipped += 1;
            continue;
        }

        let record = BedRecord::parse(line, Delimiter::Whitespace)
            .map_err(|e| BedQueryError::malformed(line_number, line, e))?;
        record.write_to(&mut writer)?;
        stats.records += 1;
    }

    writer.flush()?;
    Ok(stats)
}

/// Open the configured streams and run [`format_bed`]
pub fn format_bed_with(config: &FormatConfig) -> Result<FormatStats> {
    let start = Instant::now();
    let reader = config.input.open()?;
    let writer = config.output.open()?;
    debug!("Formatting {} -> {}", config.input, config.output);

    let stats = format_bed(reader, writer)?;
    info!(
        "Formatted {} records ({} header lines skipped) in {:.2}s",
        stats.records,
        stats.skipped,
        start.elapsed().as_secs_f64()
    );
    Ok(stats)
}
