mod case;
mod runner;
mod source;

pub use case::{TestCase, TESTCASE_SCHEMA_V1};
pub use runner::{assert_case, run_case, RunReport, MAX_STEPS};
pub use source::{discover_cases, read_script, read_test_case, CasePair};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TailToolError {
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse testcase {path}: {source}")]
    ParseCase {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Invalid testcase schema version \"{found}\", expected \"{expected}\".")]
    InvalidSchemaVersion { expected: String, found: String },
    #[error("No .tail scripts with a .case.json under {path}.")]
    SourceEmpty { path: PathBuf },
    #[error("Guard exceeded: max_steps={max_steps}.")]
    GuardExceeded { max_steps: usize },
    #[error("Output mismatch.\nexpected={expected:?}\nactual={actual:?}")]
    OutputMismatch { expected: String, actual: String },
    #[error("Error code mismatch: expected {expected}, actual {actual}.")]
    ErrorCodeMismatch { expected: String, actual: String },
    #[error("Unused inputs: used {used} of {total}.")]
    UnusedInputs { used: usize, total: usize },
}
