mod cli;
mod cmd;
mod error;
mod io;

pub use cli::{Cli, Command, NullArrayPolicyArg, OutputFormat, PathOrStdin};

use clap::Parser as _;
use verity_core::{MatchOptions, ScoringConfig};

use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Dispatches the parsed CLI to its command implementation.
///
/// Reads all inputs up front (with the size cap and the at-most-one-stdin
/// rule enforced) so command modules only ever see strings.
fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Score {
            actual,
            predicted,
            schema,
            expected_text,
            predicted_text,
            case_sensitive_arrays,
            no_trim,
            null_array_policy,
            min_score,
        } => {
            let mut sources = vec![&actual, &predicted];
            sources.extend(schema.as_ref());
            sources.extend(expected_text.as_ref());
            sources.extend(predicted_text.as_ref());
            io::ensure_single_stdin(sources)?;

            let truth_json = io::read_input(&actual, cli.max_file_size)?;
            let prediction_json = io::read_input(&predicted, cli.max_file_size)?;
            let schema_json = io::read_optional(schema.as_ref(), cli.max_file_size)?;
            let truth_text = io::read_optional(expected_text.as_ref(), cli.max_file_size)?;
            let prediction_text = io::read_optional(predicted_text.as_ref(), cli.max_file_size)?;

            let config = ScoringConfig {
                array_options: MatchOptions {
                    case_sensitive: case_sensitive_arrays,
                    trim_whitespace: !no_trim,
                },
                null_array_policy: null_array_policy.into(),
            };

            let inputs = cmd::score::ScoreInputs {
                actual: &truth_json,
                predicted: &prediction_json,
                schema: schema_json.as_deref(),
                expected_text: truth_text.as_deref(),
                predicted_text: prediction_text.as_deref(),
            };
            cmd::score::run(&inputs, &config, min_score, &cli.format)
        }

        Command::Diff {
            actual,
            predicted,
            full,
        } => {
            io::ensure_single_stdin([&actual, &predicted])?;
            let content_a = io::read_input(&actual, cli.max_file_size)?;
            let content_b = io::read_input(&predicted, cli.max_file_size)?;
            cmd::diff::run(&content_a, &content_b, full, &cli.format)
        }

        Command::Version => {
            println!("{}", verity_core::version());
            Ok(())
        }
    }
}
