//! tscolumns CLI
//!
//! Loads a JSON array of records into a store and prints previews, slices
//! and snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use tscolumns::render::render_table;
use tscolumns::{snapshot, ColumnStore, Config, Record, Result, StoreError, Value};

/// Formats tried, in order, when `--timestamps` is set
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// tscolumns CLI
#[derive(Parser, Debug)]
#[command(name = "tscolumns-cli")]
#[command(about = "Inspect and slice index-sorted column stores")]
#[command(version)]
struct Args {
    /// Truncate previews of stores with more rows than this
    #[arg(long, default_value = "20")]
    max_rows: usize,

    /// Rows kept at each end of a truncated preview
    #[arg(long, default_value = "8")]
    edge_rows: usize,

    #[command(subcommand)]
    command: Commands,
}

/// Where and how to load records
#[derive(ClapArgs, Debug)]
struct Input {
    /// JSON file holding an array of flat objects
    input: PathBuf,

    /// Column to sort and look up by
    #[arg(short, long)]
    index: String,

    /// Parse string cells that look like timestamps
    #[arg(short, long)]
    timestamps: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a preview of the whole store
    Show {
        #[command(flatten)]
        input: Input,
    },

    /// Print rows whose index lies in [start, stop)
    Slice {
        #[command(flatten)]
        input: Input,

        /// Inclusive lower bound (JSON scalar)
        #[arg(long)]
        start: Option<String>,

        /// Exclusive upper bound (JSON scalar)
        #[arg(long)]
        stop: Option<String>,
    },

    /// Print the first N rows
    Head {
        #[command(flatten)]
        input: Input,

        #[arg(short, default_value = "8")]
        n: usize,
    },

    /// Print the last N rows
    Tail {
        #[command(flatten)]
        input: Input,

        #[arg(short, default_value = "8")]
        n: usize,
    },

    /// Write the store to a snapshot file
    Snapshot {
        #[command(flatten)]
        input: Input,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Load a snapshot file and print a preview
    Inspect {
        /// Snapshot file
        path: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tscolumns=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("tscolumns CLI v{}", tscolumns::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .preview_threshold(args.max_rows)
        .preview_head(args.edge_rows)
        .preview_tail(args.edge_rows)
        .build();

    let store = match args.command {
        Commands::Show { input } => load_store(&input)?,
        Commands::Slice { input, start, stop } => {
            let store = load_store(&input)?;
            let start = start.map(|s| parse_bound(&s, input.timestamps)).transpose()?;
            let stop = stop.map(|s| parse_bound(&s, input.timestamps)).transpose()?;
            store.loc().range(start.as_ref(), stop.as_ref())
        }
        Commands::Head { input, n } => load_store(&input)?.iloc().range(None, Some(n as isize)),
        Commands::Tail { input, n } => {
            let store = load_store(&input)?;
            let start = store.len().saturating_sub(n) as isize;
            store.iloc().range(Some(start), None)
        }
        Commands::Snapshot { input, output } => {
            let store = load_store(&input)?;
            snapshot::write_to(&store, &output)?;
            tracing::info!("Wrote {} rows to {}", store.len(), output.display());
            return Ok(());
        }
        Commands::Inspect { path } => snapshot::read_from(&path)?,
    };

    println!("{}", render_table(&store, &config));
    println!("[{} rows x {} columns]", store.len(), store.column_names(true).len());
    Ok(())
}

// =============================================================================
// JSON Loading
// =============================================================================

/// Read `input` into a store; columns are taken from the first record
fn load_store(input: &Input) -> Result<ColumnStore> {
    let records = read_records(&input.input, input.timestamps)?;
    let names: Vec<String> = match records.first() {
        Some(first) => first.keys().cloned().collect(),
        None => vec![input.index.clone()],
    };

    tracing::debug!(path = %input.input.display(), records = records.len(), "loading store");
    ColumnStore::from_records(&names, &input.index, records)
}

fn read_records(path: &Path, timestamps: bool) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)?;
    let parsed: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(&text).map_err(|e| StoreError::Serialization(e.to_string()))?;

    parsed
        .into_iter()
        .map(|object| json_to_record(object, timestamps))
        .collect()
}

fn json_to_record(
    object: serde_json::Map<String, serde_json::Value>,
    timestamps: bool,
) -> Result<Record> {
    let mut record = Record::new();
    for (key, json) in object {
        record.insert(key, json_to_value(json, timestamps)?);
    }
    Ok(record)
}

fn parse_bound(text: &str, timestamps: bool) -> Result<Value> {
    let json = serde_json::from_str(text)
        .unwrap_or_else(|_| serde_json::Value::String(text.to_string()));
    json_to_value(json, timestamps)
}

fn json_to_value(json: serde_json::Value, timestamps: bool) -> Result<Value> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Int(i)),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| StoreError::Serialization(format!("unsupported number {}", n))),
        },
        serde_json::Value::String(s) => {
            if timestamps {
                if let Some(ts) = parse_timestamp(&s) {
                    return Ok(Value::Timestamp(ts));
                }
            }
            Ok(Value::Text(s))
        }
        other => Err(StoreError::Serialization(format!(
            "nested JSON values are not supported: {}",
            other
        ))),
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}
