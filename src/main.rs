//! h1b-stats CLI - Top-10 reports over H1B visa application data
//!
//! ```bash
//! h1b-stats                              # Use the default input/output paths
//! h1b-stats -i data.csv -s states.txt -o occupations.txt
//! ```

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use h1b_stats::{run, RunOptions, DEFAULT_BATCH_SIZE};

#[derive(Parser)]
#[command(name = "h1b-stats")]
#[command(about = "Top-10 state and occupation reports over H1B application CSV data", long_about = None)]
struct Cli {
    /// File path of the CSV input file containing H1B data
    #[arg(short = 'i', long, value_name = "FILE_PATH", default_value = "./input/h1b_input.csv")]
    input_file: PathBuf,

    /// File path of the output file for the Top 10 Occupations report
    #[arg(
        short = 'o',
        long,
        value_name = "FILE_PATH",
        default_value = "./output/top_10_occupations.txt"
    )]
    occupations_output_file: PathBuf,

    /// File path of the output file for the Top 10 States report
    #[arg(
        short = 's',
        long,
        value_name = "FILE_PATH",
        default_value = "./output/top_10_states.txt"
    )]
    states_output_file: PathBuf,

    /// Records drawn per batch
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

fn main() {
    let cli = Cli::parse();
    let started = Instant::now();

    let options = RunOptions {
        input: cli.input_file,
        states_output: cli.states_output_file,
        occupations_output: cli.occupations_output_file,
        batch_size: cli.batch_size,
    };

    eprintln!("📄 Processing input file: {}", options.input.display());

    let summary = match run(&options) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!("   Encoding: {}", summary.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(summary.delimiter));
    eprintln!(
        "✅ Counted {} certified applications ({} states, {} occupations)",
        summary.certified, summary.distinct_states, summary.distinct_occupations
    );
    eprintln!(
        "💾 Top 10 states written to: {}",
        options.states_output.display()
    );
    eprintln!(
        "💾 Top 10 occupations written to: {}",
        options.occupations_output.display()
    );

    eprintln!("✨ Done in {:.2}s", started.elapsed().as_secs_f64());
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
