//! High-level pipeline: input file to ranked report files.
//!
//! Wires the stages together in a single forward pass:
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌───────────┐   ┌─────────────┐
//! │ CSV file │──▶│ sniff+decode │──▶│ certified │──▶│ count+rank  │
//! │ (any enc)│   │ +normalize   │   │ filter    │   │ (2 reports) │
//! └──────────┘   └──────────────┘   └───────────┘   └─────────────┘
//! ```
//!
//! Output directories are validated before the input file is opened, so a
//! bad destination never costs a full pass over the data.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;

use serde::Serialize;

use crate::aggregate::{Aggregator, DEFAULT_BATCH_SIZE};
use crate::decode::DecodingReader;
use crate::error::PipelineResult;
use crate::filter::certified;
use crate::reader::ApplicationReader;
use crate::report::{output_dir, write_report};
use crate::sniff::{sniff, SAMPLE_LEN};

/// Dimension header of the worksite-state report.
pub const STATES_DIMENSION: &str = "TOP_STATES";
/// Dimension header of the occupation report.
pub const OCCUPATIONS_DIMENSION: &str = "TOP_OCCUPATIONS";

/// Options for a report run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// CSV input file with H1B application data.
    pub input: PathBuf,
    /// Destination of the top-10 states report.
    pub states_output: PathBuf,
    /// Destination of the top-10 occupations report.
    pub occupations_output: PathBuf,
    /// Records drawn per batch.
    pub batch_size: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./input/h1b_input.csv"),
            states_output: PathBuf::from("./output/top_10_states.txt"),
            occupations_output: PathBuf::from("./output/top_10_occupations.txt"),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Number of certified applications counted.
    pub certified: u64,
    /// Distinct worksite states seen among certified applications.
    pub distinct_states: usize,
    /// Distinct occupation names seen among certified applications.
    pub distinct_occupations: usize,
    /// Name of the detected input encoding.
    pub encoding: &'static str,
    /// Detected field delimiter.
    pub delimiter: char,
}

/// Run the whole pipeline: read, filter, count, rank, write both reports.
pub fn run(options: &RunOptions) -> PipelineResult<RunSummary> {
    // Fail on bad destinations before any real work.
    output_dir(&options.states_output)?;
    output_dir(&options.occupations_output)?;

    let mut input = File::open(&options.input)?;

    // Sniff the leading sample, then hand the stream back to the parser
    // from offset 0.
    let mut sample = Vec::with_capacity(SAMPLE_LEN);
    input
        .by_ref()
        .take(SAMPLE_LEN as u64)
        .read_to_end(&mut sample)?;
    let format = sniff(&sample)?;
    input.seek(SeekFrom::Start(0))?;

    let decoded = DecodingReader::new(input, format.encoding);
    let records = ApplicationReader::new(decoded, format.dialect)?;

    let mut aggregator = Aggregator::new(options.batch_size);
    let certified_count = aggregator.consume(certified(records))?;

    write_report(&options.states_output, STATES_DIMENSION, &aggregator.states)?;
    write_report(
        &options.occupations_output,
        OCCUPATIONS_DIMENSION,
        &aggregator.occupations,
    )?;

    Ok(RunSummary {
        certified: certified_count,
        distinct_states: aggregator.states.distinct(),
        distinct_occupations: aggregator.occupations.distinct(),
        encoding: format.encoding.name(),
        delimiter: format.dialect.delimiter as char,
    })
}
