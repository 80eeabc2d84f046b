//! File format adapters
//!
//! BED records and the cleanup pipeline, plus query lines and the query pipeline.

pub mod bed;
pub mod query;

pub use bed::{
    format_bed, format_bed_with, BedParseError, BedRecord, Delimiter, FormatConfig, FormatStats,
};
pub use query::{query_bed, query_bed_with, run_queries, Query, QueryConfig, QueryStats};
