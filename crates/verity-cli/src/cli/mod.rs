//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use verity_core::NullArrayPolicy;

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].  This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Returns `true` for the stdin sentinel.
    pub fn is_stdin(&self) -> bool {
        matches!(self, PathOrStdin::Stdin)
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits aligned summary lines; `Json` emits a single structured
/// JSON object suitable for downstream aggregation.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary output (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// Accounting for ground-truth array fields the prediction answered with
/// `null`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum NullArrayPolicyArg {
    /// Charge one modification for the field (default).
    FieldModified,
    /// Remove the field from scoring entirely.
    Neutral,
    /// Charge one deletion per ground-truth element.
    PenalizeItems,
}

impl From<NullArrayPolicyArg> for NullArrayPolicy {
    fn from(arg: NullArrayPolicyArg) -> Self {
        match arg {
            NullArrayPolicyArg::FieldModified => NullArrayPolicy::FieldModified,
            NullArrayPolicyArg::Neutral => NullArrayPolicy::Neutral,
            NullArrayPolicyArg::PenalizeItems => NullArrayPolicy::PenalizeItems,
        }
    }
}

/// All top-level subcommands exposed by the `verity` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Score a predicted extraction against ground truth.
    Score {
        /// Path to the ground-truth JSON file, or `-` for stdin.
        #[arg(value_name = "TRUTH")]
        actual: PathOrStdin,
        /// Path to the predicted JSON file, or `-` for stdin.
        #[arg(value_name = "PREDICTION")]
        predicted: PathOrStdin,
        /// JSON schema used to locate array fields for order-independent
        /// scoring. Without it, arrays are compared as opaque values.
        #[arg(long, value_name = "FILE")]
        schema: Option<PathOrStdin>,
        /// Ground-truth document text for edit-distance similarity.
        #[arg(long, value_name = "FILE")]
        expected_text: Option<PathOrStdin>,
        /// Text the provider transcribed from the document. Similarity is
        /// reported only when both text files are given.
        #[arg(long, value_name = "FILE")]
        predicted_text: Option<PathOrStdin>,
        /// Compare array items case-sensitively instead of case-folded.
        #[arg(long)]
        case_sensitive_arrays: bool,
        /// Keep leading and trailing whitespace when comparing array items.
        #[arg(long)]
        no_trim: bool,
        /// Accounting for ground-truth arrays answered by null.
        #[arg(long, default_value = "field-modified")]
        null_array_policy: NullArrayPolicyArg,
        /// Exit 1 when the structural score falls below this threshold.
        #[arg(long, value_name = "SCORE")]
        min_score: Option<f64>,
    },

    /// Show the structural diff between two JSON files.
    Diff {
        /// Path to the ground-truth JSON file, or `-` for stdin.
        #[arg(value_name = "TRUTH")]
        actual: PathOrStdin,
        /// Path to the predicted JSON file, or `-` for stdin.
        #[arg(value_name = "PREDICTION")]
        predicted: PathOrStdin,
        /// Show the full annotated document, not just the changed fields.
        #[arg(long)]
        full: bool,
    },

    /// Print the verity-core library version.
    Version,
}

/// Root CLI struct for the `verity` binary.
///
/// Global flags are marked `global = true` so clap propagates them to every
/// subcommand.
#[derive(Parser)]
#[command(
    name = "verity",
    version,
    about = "Extraction-accuracy scoring CLI",
    long_about = "Scores structured-extraction output against hand-labelled ground truth:\n\
                  field-level structural accuracy with an annotated diff,\n\
                  order-independent array matching located through a schema,\n\
                  and edit-distance similarity over raw document text."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `VERITY_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "VERITY_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,
}
