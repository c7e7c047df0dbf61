//! Command-line interface for radar log processing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::{enumerate_objects, load_radar_log, require_object_columns, ColumnTable, TableError};
use crate::processors::{add_object_kinematics, longest_tracked_object, TableSummary};
use crate::visualization;
use crate::{FieldSchema, ObjectId, PipelineConfig};

#[derive(Parser)]
#[command(name = "radar-kinematics")]
#[command(about = "Radar object range and radial velocity from sensor CSV logs", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header, object and time step counts and the longest tracked object
    Inspect {
        /// Radar log CSV file
        file: PathBuf,
    },

    /// Plot range and radial velocity of a radar object against the reference
    Plot {
        /// Radar log CSV file
        file: PathBuf,
        /// Object index to plot (defaults to the longest tracked object)
        #[arg(long)]
        object: Option<usize>,
        /// Output PNG file path (defaults to object_<index>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<60} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.chars().count() > 38 {
            let head: String = value.chars().take(35).collect();
            format!("{}...", head)
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<38} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}, using defaults", path.display(), e);
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    let result = match cli.command {
        Commands::Inspect { file } => cmd_inspect(&file, &config),
        Commands::Plot { file, object, output } => cmd_plot(&file, object, output, &config),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Load a radar log and check that every object has its required columns.
pub fn load_checked(path: &Path, schema: &FieldSchema) -> Result<ColumnTable> {
    let table = load_radar_log(path)
        .with_context(|| format!("Failed to load radar log: {}", path.display()))?;
    require_object_columns(&table, schema)
        .with_context(|| format!("Incomplete radar objects in {}", path.display()))?;
    Ok(table)
}

/// Load a radar log and summarize it.
fn summarize_log(path: &Path, schema: &FieldSchema) -> Result<TableSummary> {
    let table = load_checked(path, schema)?;
    TableSummary::from_table(&table, schema)
        .with_context(|| format!("Failed to summarize radar log: {}", path.display()))
}

fn cmd_inspect(file: &Path, config: &PipelineConfig) -> Result<()> {
    let start = Instant::now();
    let schema = &config.fields;

    let spinner = create_spinner("Loading radar log...");
    let loaded = summarize_log(file, schema);
    spinner.finish_and_clear();
    let summary = loaded?;

    let longest = summary
        .longest_tracked
        .map_or_else(|| "none".to_string(), |id| schema.object_name(id));

    print_summary(
        "Radar Log Summary",
        &[
            ("Input file", file.display().to_string()),
            ("Headers", summary.num_headers.to_string()),
            ("Radar objects", summary.num_objects.to_string()),
            ("Time steps", summary.num_time_steps.to_string()),
            ("Longest tracked", longest),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );
    Ok(())
}

fn cmd_plot(
    file: &Path,
    object: Option<usize>,
    output: Option<PathBuf>,
    config: &PipelineConfig,
) -> Result<()> {
    let start = Instant::now();
    let schema = &config.fields;

    let spinner = create_spinner("Loading radar log...");
    let prepared = load_checked(file, schema).and_then(|mut table| {
        add_object_kinematics(&mut table, schema).context("Failed to derive object kinematics")?;
        let selected = select_object(&table, schema, object)?;
        Ok((table, selected))
    });
    let (table, selected) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    let output_path =
        output.unwrap_or_else(|| PathBuf::from(visualization::default_output_name(selected)));

    spinner.set_message("Generating plot...");
    let plotted = visualization::plot_object(&output_path, &table, selected, schema, &config.plot)
        .with_context(|| format!("Failed to plot {}", output_path.display()));
    spinner.finish_and_clear();
    plotted?;

    print_summary(
        "Plot Complete",
        &[
            ("Input file", file.display().to_string()),
            ("Radar object", schema.object_name(selected)),
            ("Time steps", table.num_rows().to_string()),
            ("Output PNG", output_path.display().to_string()),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );
    Ok(())
}

/// The requested object if it exists, otherwise the longest tracked one.
fn select_object(table: &ColumnTable, schema: &FieldSchema, object: Option<usize>) -> Result<ObjectId> {
    match object {
        Some(index) => {
            let count = enumerate_objects(table, schema).len();
            if index >= count {
                return Err(TableError::InvalidInput(format!(
                    "object index {} out of range, log has {} radar objects",
                    index, count
                ))
                .into());
            }
            Ok(ObjectId(index))
        }
        None => longest_tracked_object(table, schema)
            .context("Failed to select the longest tracked object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::objects::tests::object_table;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn two_object_table(schema: &FieldSchema) -> ColumnTable {
        let row = |v: f64| vec![v, v];
        object_table(
            schema,
            &[
                [row(1.0), row(1.0), row(0.0), row(0.0), vec![1.0, 2.0]],
                [row(1.0), row(1.0), row(0.0), row(0.0), vec![1.0, 9.0]],
            ],
        )
    }

    #[test]
    fn test_select_object_defaults_to_longest() {
        let schema = FieldSchema::default();
        let table = two_object_table(&schema);
        assert_eq!(select_object(&table, &schema, None).unwrap(), ObjectId(1));
        assert_eq!(select_object(&table, &schema, Some(0)).unwrap(), ObjectId(0));
    }

    #[test]
    fn test_select_object_out_of_range() {
        let schema = FieldSchema::default();
        let table = two_object_table(&schema);
        let err = select_object(&table, &schema, Some(2)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_checked_rejects_incomplete_object() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "aObject[0].Kinematic.fDistX,aObject[0].Kinematic.fDistY").unwrap();
        writeln!(file, "1.0,2.0").unwrap();
        file.flush().unwrap();

        let err = load_checked(file.path(), &FieldSchema::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_summarize_log() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "aObject[0].Kinematic.fDistX,aObject[0].Kinematic.fDistY,aObject[0].Kinematic.fVrelX,\
             aObject[0].Kinematic.fVrelY,aObject[0].General.uiLifeCycles"
        )
        .unwrap();
        writeln!(file, "1.0,2.0,0.0,0.0,3").unwrap();
        file.flush().unwrap();

        let summary = summarize_log(file.path(), &FieldSchema::default()).unwrap();
        assert_eq!(summary.num_objects, 1);
        assert_eq!(summary.num_time_steps, 1);
        assert_eq!(summary.longest_tracked, Some(ObjectId(0)));
    }

    #[test]
    fn test_summarize_log_without_time_steps() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "aObject[0].Kinematic.fDistX,aObject[0].Kinematic.fDistY,aObject[0].Kinematic.fVrelX,\
             aObject[0].Kinematic.fVrelY,aObject[0].General.uiLifeCycles"
        )
        .unwrap();
        file.flush().unwrap();

        let err = summarize_log(file.path(), &FieldSchema::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to summarize radar log"));
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cli_parses_plot() {
        let cli = Cli::try_parse_from([
            "radar-kinematics",
            "-vv",
            "plot",
            "log.csv",
            "--object",
            "2",
            "-o",
            "out.png",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Plot { file, object, output } => {
                assert_eq!(file, PathBuf::from("log.csv"));
                assert_eq!(object, Some(2));
                assert_eq!(output, Some(PathBuf::from("out.png")));
            }
            _ => panic!("expected plot command"),
        }
    }
}
