//! # h1b-stats - Top-10 reports over H1B visa application data
//!
//! Streams a large CSV of H1B applications, counts the certified ones, and
//! writes two frequency-ranked reports: top-10 worksite states and top-10
//! occupations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│  Normalizer │────▶│  Certified  │────▶│  Aggregate  │
//! │ (any enc/   │     │ (sniff +    │     │  filter     │     │  + rank     │
//! │  dialect)   │     │  relabel)   │     │             │     │  (reports)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The pipeline is single-threaded and pull-based: records flow one at a
//! time through the filter into fixed-size batches, so peak memory stays
//! bounded no matter how large the input file is.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use h1b_stats::{run, RunOptions};
//!
//! fn main() {
//!     let summary = run(&RunOptions::default()).unwrap();
//!     println!("Counted {} certified applications", summary.certified);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`sniff`] - Encoding and dialect detection
//! - [`decode`] - Streaming transcoding to UTF-8
//! - [`reader`] - Record reading and legacy-layout migration
//! - [`filter`] - Certified-record filter
//! - [`aggregate`] - Batching and dimension counters
//! - [`report`] - Ranking and report output
//! - [`pipeline`] - End-to-end orchestration

pub mod error;

// Input format detection
pub mod sniff;

// Decoding
pub mod decode;

// Record reading
pub mod reader;

// Filtering
pub mod filter;

// Aggregation
pub mod aggregate;

// Report output
pub mod report;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    PipelineError, PipelineResult, ReadError, ReadResult, ReportError, ReportResult, SchemaError,
    SniffError, SniffResult,
};

// =============================================================================
// Re-exports - Format detection
// =============================================================================

pub use sniff::{sniff, Dialect, Format, SAMPLE_LEN};

// =============================================================================
// Re-exports - Records
// =============================================================================

pub use reader::{Application, ApplicationReader};

// =============================================================================
// Re-exports - Filtering and aggregation
// =============================================================================

pub use aggregate::{Aggregator, DimensionCounts, DEFAULT_BATCH_SIZE};
pub use filter::{certified, CERTIFIED_STATUS};

// =============================================================================
// Re-exports - Reports
// =============================================================================

pub use report::{rank, write_report, RankedEntry, TOP_LIMIT};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{run, RunOptions, RunSummary, OCCUPATIONS_DIMENSION, STATES_DIMENSION};
