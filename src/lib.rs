//! BedQuery - BED cleanup and start-point region queries
//!
//! Two pipelines over BED-like interval records:
//!
//! - **format**: stream a whitespace-delimited BED file and re-emit every
//!   record in canonical tab-separated form
//! - **query**: load a BED file into a [`FeatureStore`], then report, for each
//!   query `chrom start end`, the records on `chrom` whose start lies in
//!   `[start, end)`
//!
//! # Example
//!
//! ```
//! use bed_query::{BedRecord, Delimiter, FeatureStore};
//!
//! let mut store = FeatureStore::new();
//! store.insert(BedRecord::parse("chr1\t50\t150\tfeatA", Delimiter::Tab)?);
//! store.insert(BedRecord::parse("chr1\t200\t300\tfeatB", Delimiter::Tab)?);
//!
//! let hits: Vec<_> = store.query("chr1", 0, 100).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].to_line(), "chr1\t50\t150\tfeatA\n");
//! # Ok::<(), bed_query::BedParseError>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use self::core::{BedQueryError, FeatureStore, InputSource, OutputSink, Result};
pub use self::formats::{
    format_bed, format_bed_with, query_bed, query_bed_with, BedParseError, BedRecord, Delimiter,
    FormatConfig, FormatStats, Query, QueryConfig, QueryStats,
};
