//! In-memory feature store
//!
//! Records are bucketed by chromosome and kept in insertion order. Queries
//! scan one bucket linearly and select records by start-point containment:
//! a record matches `[start, end)` when its own start lies in that range.
//! Its end coordinate is never consulted, so this is not an overlap test.

use crate::core::error::{BedQueryError, Result};
use crate::core::io::{is_header_line, InputSource, LineIterator};
use crate::formats::bed::{BedRecord, Delimiter};
use crate::formats::query::Query;
use log::debug;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Whether `record` starts inside the half-open range `[start, end)`
#[inline]
pub fn starts_within(record: &BedRecord, start: u64, end: u64) -> bool {
    start <= record.start() && record.start() < end
}

/// Chromosome-indexed collection of BED records
#[derive(Debug, Default, Clone)]
pub struct FeatureStore {
    /// Chromosome -> records in insertion order
    chroms: HashMap<String, Vec<BedRecord>>,
    /// Total number of records across all chromosomes
    total: usize,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every record from a reader
    ///
    /// The whole stream is consumed before this returns. Header lines are
    /// skipped; any other line that fails to parse aborts the load.
    pub fn from_reader<R: BufRead>(reader: R, delimiter: Delimiter) -> Result<Self> {
        let mut store = Self::new();
        let mut lines = LineIterator::new(reader);

        while let Some(next) = lines.next_line() {
            let (line_number, line) = next?;
            if is_header_line(line) {
                continue;
            }
            let record = BedRecord::parse(line, delimiter)
                .map_err(|e| BedQueryError::malformed(line_number, line, e))?;
            store.insert(record);
        }

        debug!(
            "Loaded {} records on {} chromosomes",
            store.len(),
            store.chrom_count()
        );
        Ok(store)
    }

    /// Load every record from a BED file
    ///
    /// Automatically handles gzip and bzip2 compression.
    ///
    /// # Example
    /// ```ignore
    /// let store = FeatureStore::from_bed_file("genes.bed.gz", Delimiter::Tab)?;
    /// ```
    pub fn from_bed_file<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Self> {
        let reader = InputSource::Path(path.as_ref().to_path_buf()).open()?;
        Self::from_reader(reader, delimiter)
    }

    /// Append a record to its chromosome's bucket
    ///
    /// Never fails and never deduplicates: inserting the same record twice
    /// stores it twice.
    pub fn insert(&mut self, record: BedRecord) {
        match self.chroms.get_mut(record.chrom()) {
            Some(bucket) => bucket.push(record),
            None => {
                self.chroms.insert(record.chrom().to_string(), vec![record]);
            }
        }
        self.total += 1;
    }

    /// All records on `chrom`, in insertion order
    ///
    /// Unknown chromosomes yield an empty slice.
    pub fn query_chromosome(&self, chrom: &str) -> &[BedRecord] {
        self.chroms.get(chrom).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records on `chrom` whose start lies in `[start, end)`, in insertion order
    pub fn query<'a>(
        &'a self,
        chrom: &str,
        start: u64,
        end: u64,
    ) -> impl Iterator<Item = &'a BedRecord> + 'a {
        self.query_chromosome(chrom)
            .iter()
            .filter(move |record| starts_within(record, start, end))
    }

    /// Same as [`FeatureStore::query`] for a parsed query line
    ///
    /// Negative query bounds are clipped to 0 before the scan.
    pub fn query_region<'a>(&'a self, query: &Query) -> impl Iterator<Item = &'a BedRecord> + 'a {
        let (start, end) = query.clipped_bounds();
        self.query(query.chrom(), start, end)
    }

    /// Check if a chromosome has any records
    pub fn has_chrom(&self, chrom: &str) -> bool {
        self.chroms.contains_key(chrom)
    }

    /// Get all chromosome names (arbitrary order)
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.chroms.keys().map(|s| s.as_str())
    }

    /// Number of distinct chromosomes
    pub fn chrom_count(&self) -> usize {
        self.chroms.len()
    }

    /// Get the number of records for a chromosome
    pub fn record_count(&self, chrom: &str) -> usize {
        self.query_chromosome(chrom).len()
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
