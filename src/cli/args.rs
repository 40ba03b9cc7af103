//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::data::CleanStrategy;
use crate::registry::{DmaicPhase, NewDefect, Priority};
use crate::stats::{DEFAULT_PARETO_TOP, MAX_SUBGROUP_SIZE, MIN_SUBGROUP_SIZE};

/// sigmakit - Six Sigma process metrics, control limits and Pareto analysis
#[derive(Parser, Debug)]
#[command(name = "sigmakit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Number of rows to use for schema inference (CSV only).
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, global = true, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Do not print the banner
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute DPU, DPMO, yield, sigma level, RTY and DPM from defect counts
    Metrics {
        /// Number of defects observed
        #[arg(short, long)]
        defects: f64,

        /// Number of units inspected
        #[arg(short, long)]
        units: f64,

        /// Defect opportunities per unit
        #[arg(short, long)]
        opportunities: f64,

        /// Also print the sigma conversion reference table
        #[arg(long, default_value = "false")]
        table: bool,

        /// Write the result to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Histogram (Sturges bins) and descriptive statistics of a numeric column
    Histogram {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Numeric column to analyse
        #[arg(short, long)]
        column: String,

        /// Write the result to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// X-bar / R control limits for one or all numeric columns
    Control {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Numeric column to chart
        #[arg(short, long, required_unless_present = "all", conflicts_with = "all")]
        column: Option<String>,

        /// Chart every numeric column
        #[arg(long, default_value = "false")]
        all: bool,

        /// Subgroup size (2-10); trailing values that do not fill a subgroup are ignored
        #[arg(short = 'n', long, default_value = "5", value_parser = validate_subgroup_size)]
        subgroup_size: usize,

        /// Write the result to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Pearson correlation of two columns, or of every numeric column pair
    Correlate {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// X column
        #[arg(
            short = 'x',
            long = "x-column",
            required_unless_present = "all",
            conflicts_with = "all",
            requires = "y_column"
        )]
        x_column: Option<String>,

        /// Y column
        #[arg(short = 'y', long = "y-column", requires = "x_column")]
        y_column: Option<String>,

        /// Correlate every pair of numeric columns
        #[arg(long, default_value = "false")]
        all: bool,

        /// Only report pairs with |r| at or above this value (with --all)
        #[arg(long, default_value = "0.0", value_parser = validate_threshold)]
        threshold: f64,

        /// Write the result to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Pareto series of a categorical column, by frequency or by a value column
    Pareto {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Category column
        #[arg(short, long)]
        column: String,

        /// Sum this column per category instead of counting rows
        #[arg(long)]
        value_column: Option<String>,

        /// Categories kept before folding the rest into "Other" (with --value-column)
        #[arg(long, default_value_t = DEFAULT_PARETO_TOP, value_parser = validate_top)]
        top: usize,

        /// Write the result to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Profile every column: type, missing values, distinct values, statistics
    Profile {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Missing value ratio above which a column is flagged
        #[arg(long, default_value = "0.3", value_parser = validate_threshold)]
        missing_threshold: f64,

        /// Write the result to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Drop rows with missing cells or fill them, then save the cleaned file
    Clean {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// How to treat missing cells
        #[arg(short, long, value_enum)]
        strategy: CleanStrategy,

        /// Output file path (CSV or Parquet, determined by extension).
        /// Defaults to input directory with '_clean' suffix (e.g., data.csv -> data_clean.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage the defect registry
    Defects {
        /// Registry file (defaults to the user data directory)
        #[arg(long)]
        store: Option<PathBuf>,

        #[command(subcommand)]
        action: DefectCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum DefectCommand {
    /// Register a new defect
    Add(DefectFields),

    /// Replace the fields of an existing defect
    Update {
        /// Defect id
        id: u64,

        #[command(flatten)]
        fields: DefectFields,
    },

    /// List registered defects
    List,

    /// Remove a defect
    Remove {
        /// Defect id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(long, default_value = "false")]
        yes: bool,
    },

    /// Summarize defects by type, priority and DMAIC phase
    Summary {
        /// Units inspected; when given, Six Sigma metrics are computed for the registry
        #[arg(long)]
        units: Option<f64>,

        /// Defect opportunities per unit
        #[arg(long, default_value = "1", requires = "units")]
        opportunities: f64,

        /// Write the summary to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DefectFields {
    /// Defect type (e.g. dimensional, cosmetic)
    #[arg(short = 't', long = "type")]
    pub kind: String,

    /// Process phase or step where the defect was found
    #[arg(short, long, default_value = "")]
    pub phase: String,

    /// What went wrong
    #[arg(short, long)]
    pub description: String,

    /// Effect on the customer or process
    #[arg(long, default_value = "")]
    pub impact: String,

    /// Known or suspected root cause
    #[arg(long, default_value = "")]
    pub root_cause: String,

    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// DMAIC phase the defect is being worked in
    #[arg(long, value_enum, default_value_t = DmaicPhase::Define)]
    pub dmaic: DmaicPhase,
}

impl From<DefectFields> for NewDefect {
    fn from(fields: DefectFields) -> Self {
        NewDefect {
            kind: fields.kind,
            phase: fields.phase,
            description: fields.description,
            impact: fields.impact,
            root_cause: fields.root_cause,
            priority: fields.priority,
            dmaic: fields.dmaic,
        }
    }
}

/// Output path for `clean`, deriving `<stem>_clean.<ext>` next to the input
/// when none is given.
pub fn clean_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(p) => p.to_path_buf(),
        None => {
            let parent = input.parent().unwrap_or_else(|| Path::new("."));
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let extension = input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("csv");
            parent.join(format!("{}_clean.{}", stem, extension))
        }
    }
}

/// Validator for the control chart subgroup size
fn validate_subgroup_size(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid subgroup size", s))?;

    if !(MIN_SUBGROUP_SIZE..=MAX_SUBGROUP_SIZE).contains(&value) {
        Err(format!(
            "subgroup size must be between {} and {}, got {}",
            MIN_SUBGROUP_SIZE, MAX_SUBGROUP_SIZE, value
        ))
    } else {
        Ok(value)
    }
}

/// Validator for ratio thresholds
fn validate_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("threshold must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for the Pareto category limit
fn validate_top(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("top must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subgroup_size_validator() {
        assert_eq!(validate_subgroup_size("5"), Ok(5));
        assert!(validate_subgroup_size("1").is_err());
        assert!(validate_subgroup_size("11").is_err());
        assert!(validate_subgroup_size("five").is_err());
    }

    #[test]
    fn test_threshold_validator() {
        assert_eq!(validate_threshold("0.7"), Ok(0.7));
        assert!(validate_threshold("1.5").is_err());
        assert!(validate_threshold("-0.1").is_err());
    }

    #[test]
    fn test_clean_output_path_derivation() {
        let derived = clean_output_path(Path::new("data/lots.parquet"), None);
        assert_eq!(derived, PathBuf::from("data/lots_clean.parquet"));

        let explicit = clean_output_path(Path::new("lots.csv"), Some(Path::new("out.csv")));
        assert_eq!(explicit, PathBuf::from("out.csv"));
    }
}
