//! Region queries against a BED feature file
//!
//! A query line is exactly three whitespace-separated tokens: chromosome,
//! start and end of a half-open interval. Query bounds are signed; only
//! feature coordinates must be non-negative. The feature file is loaded into a
//! [`FeatureStore`] in full before the first query line is read; queries are
//! then streamed and each one's matches are written before the next is read.

use crate::core::io::{is_header_line, InputSource, LineIterator, OutputSink};
use crate::core::{starts_within, BedQueryError, FeatureStore, Result};
use crate::formats::bed::{parse_coord, BedParseError, BedRecord, Delimiter};
use log::{debug, info};
use std::io::{BufRead, Write};
use std::time::Instant;

/// A chromosome plus half-open interval `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    chrom: String,
    start: i64,
    end: i64,
}

impl Query {
    /// Build a query, rejecting `end < start`
    pub fn new(
        chrom: impl Into<String>,
        start: i64,
        end: i64,
    ) -> std::result::Result<Self, BedParseError> {
        if end < start {
            return Err(BedParseError::InvalidQueryRange { start, end });
        }
        Ok(Self {
            chrom: chrom.into(),
            start,
            end,
        })
    }

    /// Parse a query line of exactly three whitespace-separated tokens
    pub fn parse(line: &str) -> std::result::Result<Self, BedParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(BedParseError::WrongFieldCount {
                expected: 3,
                found: tokens.len(),
            });
        }

        let start = parse_coord("start", tokens[1])?;
        let end = parse_coord("end", tokens[2])?;
        Self::new(tokens[0], start, end)
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// The interval clipped to non-negative coordinates
    ///
    /// Feature starts are never negative, so clipping selects exactly the
    /// same records as the signed interval.
    pub fn clipped_bounds(&self) -> (u64, u64) {
        let clip = |v: i64| u64::try_from(v).unwrap_or(0);
        (clip(self.start), clip(self.end))
    }

    /// Whether `record` is on this chromosome and starts inside the interval
    pub fn contains(&self, record: &BedRecord) -> bool {
        let (start, end) = self.clipped_bounds();
        record.chrom() == self.chrom && starts_within(record, start, end)
    }
}

/// Query statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryStats {
    /// Records loaded into the store
    pub features: usize,
    /// Query lines processed
    pub queries: usize,
    /// Records written across all queries
    pub matches: usize,
}

/// Streams for the query pipeline
#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub features: InputSource,
    pub queries: InputSource,
    pub output: OutputSink,
    /// How feature lines are split
    pub delimiter: Delimiter,
}

/// Run every query against an already loaded store
pub fn run_queries<R: BufRead, W: Write>(
    store: &FeatureStore,
    queries: R,
    mut writer: W,
) -> Result<QueryStats> {
    let mut lines = LineIterator::new(queries);
    let mut stats = QueryStats {
        features: store.len(),
        ..QueryStats::default()
    };

    while let Some(next) = lines.next_line() {
        let (line_number, line) = next?;
        if is_header_line(line) {
            continue;
        }

        let query =
            Query::parse(line).map_err(|e| BedQueryError::malformed(line_number, line, e))?;
        for record in store.query_region(&query) {
            record.write_to(&mut writer)?;
            stats.matches += 1;
        }
        stats.queries += 1;
    }

    writer.flush()?;
    Ok(stats)
}

/// Load the feature stream, then answer every query in the query stream
///
/// Nothing is written if the feature stream contains a malformed line.
pub fn query_bed<F: BufRead, Q: BufRead, W: Write>(
    features: F,
    queries: Q,
    writer: W,
    delimiter: Delimiter,
) -> Result<QueryStats> {
    let store = FeatureStore::from_reader(features, delimiter)?;
    run_queries(&store, queries, writer)
}

/// Open the configured streams and run [`query_bed`]
///
/// Both inputs are opened before the output, so a missing input never
/// creates or truncates the output file.
pub fn query_bed_with(config: &QueryConfig) -> Result<QueryStats> {
    let start = Instant::now();
    let features = config.features.open()?;
    let queries = config.queries.open()?;

    let store = FeatureStore::from_reader(features, config.delimiter)?;
    info!(
        "Loaded {} features on {} chromosomes from {} in {:.2}s",
        store.len(),
        store.chrom_count(),
        config.features,
        start.elapsed().as_secs_f64()
    );

    let writer = config.output.open()?;
    debug!("Querying {} -> {}", config.queries, config.output);
    let stats = run_queries(&store, queries, writer)?;

    info!(
        "Answered {} queries with {} matches in {:.2}s",
        stats.queries,
        stats.matches,
        start.elapsed().as_secs_f64()
    );
    Ok(stats)
}
