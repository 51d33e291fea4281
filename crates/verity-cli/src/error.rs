/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `verity` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2** — input failure: the tool could not read or parse an
///   input at all. These errors terminate early before any scoring runs.
/// - Exit code **1** — logical failure: the tool ran to completion but the
///   result is a well-defined failure (score below threshold, differences
///   found).
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `verity` CLI can produce.
///
/// Use [`CliError::exit_code`] to obtain the exit code associated with each
/// variant. [`CliError::message`] returns the human-readable error string
/// that should be printed to stderr before exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// A human-readable label for the source (`"-"` for stdin, or the
        /// filesystem path).
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only; `None` for
        /// stdin where the exact size is unknown).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// More than one input argument was the stdin sentinel `-`.
    MultipleStdin,

    /// An input was read but is not valid JSON.
    ParseFailed {
        /// Which input failed (`"ground truth"`, `"prediction"`, ...).
        source: String,
        /// The underlying parse error with line and column.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The structural score fell below the `--min-score` threshold.
    ScoreBelowThreshold {
        /// The computed structural score.
        score: f64,
        /// The configured minimum.
        threshold: f64,
    },

    /// A diff run found differences between the two inputs.
    DiffHasDifferences,
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2` — input failure (file not found, parse error, etc.).
    /// - `1` — logical failure (score below threshold, differences found).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::MultipleStdin
            | Self::ParseFailed { .. } => 2,

            Self::ScoreBelowThreshold { .. } | Self::DiffHasDifferences => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::MultipleStdin => {
                "error: at most one input may be `-` (stdin)".to_owned()
            }
            Self::ParseFailed { source, detail } => {
                format!("error: failed to parse {source}: {detail}")
            }
            Self::ScoreBelowThreshold { score, threshold } => {
                format!("error: structural score {score:.4} is below the minimum {threshold:.4}")
            }
            Self::DiffHasDifferences => "error: documents differ".to_owned(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::path::PathBuf;

    use super::*;

    #[test]
    fn input_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("truth.json"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/secret.json"),
            },
            CliError::FileTooLarge {
                source: "big.json".to_owned(),
                limit: 1024,
                actual: Some(2048),
            },
            CliError::InvalidUtf8 {
                source: "bad.json".to_owned(),
                byte_offset: 42,
            },
            CliError::StdinReadError {
                detail: "broken pipe".to_owned(),
            },
            CliError::IoError {
                source: "file.json".to_owned(),
                detail: "device full".to_owned(),
            },
            CliError::MultipleStdin,
            CliError::ParseFailed {
                source: "prediction".to_owned(),
                detail: "line 1, column 2: expected value".to_owned(),
            },
        ];
        for e in errors {
            assert_eq!(e.exit_code(), 2, "error: {e:?}");
        }
    }

    #[test]
    fn logical_failures_are_exit_1() {
        let below = CliError::ScoreBelowThreshold {
            score: 0.5,
            threshold: 0.9,
        };
        assert_eq!(below.exit_code(), 1);
        assert_eq!(CliError::DiffHasDifferences.exit_code(), 1);
    }

    #[test]
    fn file_not_found_message_contains_path() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("invoice-042.json"),
        };
        let msg = e.message();
        assert!(msg.contains("invoice-042.json"), "message: {msg}");
        assert!(msg.contains("not found"), "message: {msg}");
    }

    #[test]
    fn file_too_large_with_actual_mentions_sizes() {
        let e = CliError::FileTooLarge {
            source: "big.json".to_owned(),
            limit: 1_000_000,
            actual: Some(2_000_000),
        };
        let msg = e.message();
        assert!(msg.contains("2000000"), "message: {msg}");
        assert!(msg.contains("1000000"), "message: {msg}");
    }

    #[test]
    fn file_too_large_without_actual_mentions_limit() {
        let e = CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: 512,
            actual: None,
        };
        let msg = e.message();
        assert!(msg.contains("512"), "message: {msg}");
    }

    #[test]
    fn invalid_utf8_message_contains_offset() {
        let e = CliError::InvalidUtf8 {
            source: "scan.json".to_owned(),
            byte_offset: 99,
        };
        let msg = e.message();
        assert!(msg.contains("99"), "message: {msg}");
        assert!(msg.contains("scan.json"), "message: {msg}");
    }

    #[test]
    fn parse_failed_message_names_the_input() {
        let e = CliError::ParseFailed {
            source: "ground truth".to_owned(),
            detail: "line 3, column 7: trailing comma".to_owned(),
        };
        let msg = e.message();
        assert!(msg.contains("ground truth"), "message: {msg}");
        assert!(msg.contains("line 3"), "message: {msg}");
    }

    #[test]
    fn threshold_message_shows_both_scores() {
        let e = CliError::ScoreBelowThreshold {
            score: 0.4167,
            threshold: 0.9,
        };
        let msg = e.message();
        assert!(msg.contains("0.4167"), "message: {msg}");
        assert!(msg.contains("0.9000"), "message: {msg}");
    }

    #[test]
    fn display_matches_message() {
        let e = CliError::MultipleStdin;
        assert_eq!(format!("{e}"), e.message());
    }

    #[test]
    fn error_trait_is_implemented() {
        let e: Box<dyn std::error::Error> = Box::new(CliError::DiffHasDifferences);
        assert!(!e.to_string().is_empty());
    }
}
