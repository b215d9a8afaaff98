//! gridshape CLI: apply operation logs to CSV tables.

use clap::{Parser, Subcommand, ValueEnum};
use gridshape_core::config::{ColumnOverflowPolicy, EngineConfig, UnmatchedStartPolicy};
use gridshape_core::types::Table;
use gridshape_history::Project;
use gridshape_io::{oplog, CsvOptions, CsvReader, CsvWriter, JsonlWriter};
use gridshape_operators::Registry;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridshape")]
#[command(about = "Reshape tabular data with replayable operation logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an operation log to a CSV table
    Apply {
        /// Path to the input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the operation log (JSON array of records)
        #[arg(long)]
        ops: PathBuf,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Field delimiter for input and CSV output
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Keep every value as a string instead of inferring numbers/booleans
        #[arg(long)]
        no_infer: bool,

        /// Leave the table unchanged when a start column is missing
        #[arg(long)]
        legacy_unmatched: bool,

        /// Fail when a column range runs past the last column
        #[arg(long)]
        strict_column_count: bool,
    },

    /// Check that every record in an operation log can be reconstructed
    Validate {
        /// Path to the operation log
        #[arg(long)]
        ops: PathBuf,
    },

    /// Show how each operation reshapes the columns of a table
    Explain {
        /// Path to the input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the operation log
        #[arg(long)]
        ops: PathBuf,

        /// Field delimiter of the input CSV
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Keep every value as a string instead of inferring numbers/booleans
        #[arg(long)]
        no_infer: bool,

        /// Leave the table unchanged when a start column is missing
        #[arg(long)]
        legacy_unmatched: bool,

        /// Fail when a column range runs past the last column
        #[arg(long)]
        strict_column_count: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Jsonl,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            input,
            ops,
            output,
            format,
            delimiter,
            no_infer,
            legacy_unmatched,
            strict_column_count,
        } => {
            let mut config = EngineConfig::from_env();
            apply_overrides(&mut config, legacy_unmatched, strict_column_count);
            let csv = match csv_options(delimiter, !no_infer) {
                Ok(opts) => opts,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            };
            if let Err(e) = apply_log(&input, &ops, output.as_deref(), format, csv, &config) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { ops } => match validate_log(&ops, &EngineConfig::from_env()) {
            Ok(descriptions) => {
                for (i, d) in descriptions.iter().enumerate() {
                    println!("  {}. {}", i + 1, d);
                }
                println!("✓ Operation log is valid ({} records)", descriptions.len());
            }
            Err(e) => {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Explain {
            input,
            ops,
            delimiter,
            no_infer,
            legacy_unmatched,
            strict_column_count,
        } => {
            let mut config = EngineConfig::from_env();
            apply_overrides(&mut config, legacy_unmatched, strict_column_count);
            let csv = match csv_options(delimiter, !no_infer) {
                Ok(opts) => opts,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            };
            if let Err(e) = explain_log(&input, &ops, csv, &config) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Log to stderr, filtered by `GRIDSHAPE_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("GRIDSHAPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Command-line flags win over the environment.
fn apply_overrides(cfg: &mut EngineConfig, legacy_unmatched: bool, strict_column_count: bool) {
    if legacy_unmatched {
        cfg.unmatched_start = UnmatchedStartPolicy::NoOp;
    }
    if strict_column_count {
        cfg.column_overflow = ColumnOverflowPolicy::Reject;
    }
}

fn csv_options(delimiter: char, infer_types: bool) -> Result<CsvOptions, String> {
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| format!("delimiter {:?} is not a single-byte character", delimiter))?;
    Ok(CsvOptions {
        delimiter,
        infer_types,
    })
}

fn apply_log(
    input: &Path,
    ops: &Path,
    output: Option<&Path>,
    format: Format,
    csv: CsvOptions,
    config: &EngineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = CsvReader::read_path(input, csv)?;
    let records = oplog::read_records_path(ops)?;
    info!(rows = table.num_rows(), records = records.len(), "applying operation log");

    let mut project = Project::new(table, config)?;
    for record in &records {
        let op = project.registry().reconstruct(record)?;
        project.apply_operation(op.as_ref())?;
        eprintln!("✓ {}", op.describe());
    }

    write_table(project.table(), output, format, csv.delimiter)
}

fn write_table(
    table: &Table,
    output: Option<&Path>,
    format: Format,
    delimiter: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    match (format, output) {
        (Format::Csv, Some(path)) => CsvWriter::write_path(path, table, delimiter)?,
        (Format::Csv, None) => CsvWriter::write_table(io::stdout().lock(), table, delimiter)?,
        (Format::Jsonl, Some(path)) => JsonlWriter::to_path(path)?.write_table(table)?,
        (Format::Jsonl, None) => JsonlWriter::to_writer(io::stdout().lock()).write_table(table)?,
    }
    Ok(())
}

fn validate_log(ops: &Path, config: &EngineConfig) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let records = oplog::read_records_path(ops)?;
    describe_records(&records, &Registry::new(config.transform_policy()))
}

fn describe_records(
    records: &[serde_json::Value],
    registry: &Registry,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            registry
                .reconstruct(record)
                .map(|op| op.describe())
                .map_err(|e| -> Box<dyn std::error::Error> { format!("record {}: {}", i + 1, e).into() })
        })
        .collect()
}

fn explain_log(
    input: &Path,
    ops: &Path,
    csv: CsvOptions,
    config: &EngineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = CsvReader::read_path(input, csv)?;
    let records = oplog::read_records_path(ops)?;

    println!("Operation Plan");
    println!("==============");
    println!();
    println!("Input: {} rows x {} columns", table.num_rows(), table.num_columns());
    println!("  [{}]", table.columns.names().join(", "));
    println!();

    for step in explain_steps(table, &records, config)? {
        println!("{}. {}", step.index, step.description);
        println!("   columns: [{}] -> [{}]", step.before.join(", "), step.after.join(", "));
        println!("   rows:    {} -> {}", step.rows_before, step.rows_after);
    }
    Ok(())
}

#[derive(Debug)]
struct Step {
    index: usize,
    description: String,
    before: Vec<String>,
    after: Vec<String>,
    rows_before: usize,
    rows_after: usize,
}

fn explain_steps(
    table: Table,
    records: &[serde_json::Value],
    config: &EngineConfig,
) -> Result<Vec<Step>, Box<dyn std::error::Error>> {
    let mut project = Project::new(table, config)?;
    let mut steps = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let before = owned_names(project.table());
        let rows_before = project.table().num_rows();
        let op = project
            .registry()
            .reconstruct(record)
            .map_err(|e| format!("record {}: {}", i + 1, e))?;
        project
            .apply_operation(op.as_ref())
            .map_err(|e| format!("record {}: {}", i + 1, e))?;
        steps.push(Step {
            index: i + 1,
            description: op.describe(),
            before,
            after: owned_names(project.table()),
            rows_before,
            rows_after: project.table().num_rows(),
        });
    }
    Ok(steps)
}

fn owned_names(table: &Table) -> Vec<String> {
    table.columns.names().into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridshape_core::types::Scalar;
    use serde_json::json;

    fn record(start: &str, count: usize, combined: &str) -> serde_json::Value {
        json!({
            "op": "transpose-columns-into-rows",
            "startColumnName": start,
            "columnCount": count,
            "combinedColumnName": combined,
            "prependColumnName": false,
            "separator": ":",
            "ignoreBlankCells": true
        })
    }

    fn table() -> Table {
        Table::from_values(
            ["id", "a", "b"],
            vec![vec![Some("r".into()), Some(Scalar::Int(1)), Some(Scalar::Int(2))]],
        )
    }

    #[test]
    fn flags_override_env_defaults() {
        let mut config = EngineConfig::default();
        apply_overrides(&mut config, true, true);
        assert_eq!(config.unmatched_start, UnmatchedStartPolicy::NoOp);
        assert_eq!(config.column_overflow, ColumnOverflowPolicy::Reject);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = EngineConfig {
            unmatched_start: UnmatchedStartPolicy::NoOp,
            ..EngineConfig::default()
        };
        apply_overrides(&mut config, false, false);
        assert_eq!(config.unmatched_start, UnmatchedStartPolicy::NoOp);
        assert_eq!(config.column_overflow, ColumnOverflowPolicy::Truncate);
    }

    #[test]
    fn multibyte_delimiter_is_rejected() {
        assert!(csv_options('é', true).is_err());
        assert_eq!(csv_options(';', false).unwrap().delimiter, b';');
    }

    #[test]
    fn describe_records_reports_failing_record() {
        let registry = Registry::default();
        let ok = describe_records(&[record("a", 2, "v")], &registry).unwrap();
        assert_eq!(ok, vec!["Transpose cells in 2 column(s) starting with a into rows"]);

        let err = describe_records(&[record("a", 2, "v"), json!({"op": "nope"})], &registry)
            .unwrap_err();
        assert!(err.to_string().starts_with("record 2:"));
    }

    #[test]
    fn explain_reads_csv_with_apply_options() {
        let cli = Cli::try_parse_from([
            "gridshape", "explain", "--input", "in.csv", "--ops", "ops.json", "--delimiter", ";",
            "--no-infer",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Explain { delimiter: ';', no_infer: true, .. }
        ));

        let dir = std::env::temp_dir().join(format!("gridshape-cli-explain-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.csv");
        let ops = dir.join("ops.json");
        std::fs::write(&input, "id;a;b\nr;1;2\n").unwrap();
        oplog::write_records_path(&ops, &[record("a", 2, "v")]).unwrap();

        let csv = csv_options(';', false).unwrap();
        assert!(explain_log(&input, &ops, csv, &EngineConfig::default()).is_ok());
        assert!(explain_log(&input, &ops, CsvOptions::default(), &EngineConfig::default()).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn explain_tracks_columns_and_rows() {
        let steps = explain_steps(table(), &[record("a", 2, "v")], &EngineConfig::default()).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].before, vec!["id", "a", "b"]);
        assert_eq!(steps[0].after, vec!["id", "v"]);
        assert_eq!((steps[0].rows_before, steps[0].rows_after), (1, 2));
    }
}
