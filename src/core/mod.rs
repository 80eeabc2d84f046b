//! Core feature store functionality
//!
//! This module contains the error types, stream handling, and the
//! chromosome-indexed feature store.

mod error;
pub mod io;
mod store;

pub use error::{BedQueryError, Result};
pub use io::{
    detect_compression, is_header_line, CompressionFormat, InputSource, LineIterator, OutputSink,
    DEFAULT_BUFFER_SIZE,
};
pub use store::{starts_within, FeatureStore};
