//! BedQuery CLI entry point
//!
//! `format` cleans up a BED file; `query` extracts features by start position.

use anyhow::Context;
use bed_query::core::{InputSource, OutputSink};
use bed_query::formats::{self, Delimiter, FormatConfig, QueryConfig};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Field delimiter for feature lines (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum DelimiterArg {
    /// Fields separated by single tabs
    #[default]
    #[value(name = "tab")]
    Tab,
    /// Fields separated by any run of whitespace
    #[value(name = "whitespace")]
    Whitespace,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Whitespace => Delimiter::Whitespace,
        }
    }
}

#[derive(Parser)]
#[command(name = "bed-query")]
#[command(about = "Clean up BED files and extract regions from them")]
#[command(version)]
#[command(author = "BedQuery Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean up a BED file into strictly tab-separated records
    Format {
        /// Input BED file (stdin if not specified or '-')
        input: Option<PathBuf>,
        /// Output file (stdout if not specified or '-')
        output: Option<PathBuf>,
    },
    /// Extract features whose start lies inside each query region
    Query {
        /// BED file with the features to search
        bed: PathBuf,
        /// Query file: one 'chrom start end' per line
        query: PathBuf,
        /// Output file (stdout if not specified)
        #[arg(short = 'o', long = "outfile", value_name = "output")]
        outfile: Option<PathBuf>,
        /// How fields in the BED file are separated
        #[arg(long, default_value = "tab")]
        delimiter: DelimiterArg,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Format { input, output } => {
            let config = FormatConfig {
                input: InputSource::from_arg(input),
                output: OutputSink::from_arg(output),
            };
            let stats = formats::format_bed_with(&config)
                .with_context(|| format!("Failed to format {}", config.input))?;

            info!("=== Format Statistics ===");
            info!("Records written: {}", stats.records);
            info!("Lines skipped:   {}", stats.skipped);
        }

        Commands::Query { bed, query, outfile, delimiter } => {
            let config = QueryConfig {
                features: InputSource::Path(bed),
                queries: InputSource::Path(query),
                output: OutputSink::from_arg(outfile),
                delimiter: delimiter.into(),
            };
            let stats = formats::query_bed_with(&config).with_context(|| {
                format!("Failed to query {} with {}", config.features, config.queries)
            })?;

            info!("=== Query Statistics ===");
            info!("Features loaded: {}", stats.features);
            info!("Queries:         {}", stats.queries);
            info!("Matches:         {}", stats.matches);
        }
    }

    info!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
