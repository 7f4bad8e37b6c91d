/*!
vizhint Command Line Interface

Runs chart inference over a JSON row payload and prints the inferred
series, the recommended chart kind, or a full renderer configuration.
*/

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vizhint::reader::{JsonReader, Reader};
use vizhint::writer::{ChartJsWriter, Writer};
use vizhint::{infer, ChartKind, ChartSeries, VERSION};

#[derive(Parser)]
#[command(name = "vizhint")]
#[command(about = "Chart-type inference for tabular query results")]
#[command(version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer a chart series from a JSON row payload
    Infer {
        /// Path to a JSON file with rows (use '-' for stdin)
        input: PathBuf,

        /// Output format for the series (json, pretty, debug)
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Print only the recommended chart kind
    Recommend {
        /// Path to a JSON file with rows (use '-' for stdin)
        input: PathBuf,
    },

    /// Emit a renderer configuration for the inferred series
    Render {
        /// Path to a JSON file with rows (use '-' for stdin)
        input: PathBuf,

        /// Chart kind (bar, line, pie, doughnut, area); defaults to the
        /// recommendation
        #[arg(long)]
        kind: Option<ChartKind>,

        /// Output file path (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn read_records(input: &Path) -> anyhow::Result<Vec<vizhint::Record>> {
    let reader = if input.as_os_str() == "-" {
        JsonReader::from_stdin()
    } else {
        JsonReader::from_path(input)
    };
    Ok(reader.read()?)
}

fn infer_or_exit(records: &[vizhint::Record]) -> ChartSeries {
    match infer(records) {
        Some(series) => series,
        None => {
            eprintln!("Input is not suitable for charting (need at least one row and two columns)");
            std::process::exit(1);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Infer { input, format } => {
            let records = read_records(&input)?;
            let series = infer_or_exit(&records);
            match format.as_str() {
                "json" => println!("{}", serde_json::to_string(&series)?),
                "pretty" => println!("{}", serde_json::to_string_pretty(&series)?),
                "debug" => println!("{:#?}", series),
                _ => {
                    eprintln!("Unknown format: {}", format);
                    std::process::exit(1);
                }
            }
        }

        Commands::Recommend { input } => {
            let records = read_records(&input)?;
            let series = infer_or_exit(&records);
            // Counting mode always carries a recommendation too; fall back
            // to bar for safety
            println!("{}", series.recommended.unwrap_or(ChartKind::Bar));
        }

        Commands::Render { input, kind, output } => {
            let records = read_records(&input)?;
            let series = infer_or_exit(&records);
            let kind = kind
                .or(series.recommended)
                .unwrap_or(ChartKind::Bar);

            let writer = ChartJsWriter::new();
            let config = writer.write(&series, kind)?;
            let rendered = serde_json::to_string_pretty(&config)?;

            match output {
                Some(path) => std::fs::write(&path, rendered)?,
                None => println!("{}", rendered),
            }
        }
    }

    Ok(())
}
