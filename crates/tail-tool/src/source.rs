use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{TailToolError, TestCase};

const SCRIPT_EXTENSION: &str = "tail";
const CASE_SUFFIX: &str = ".case.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasePair {
    pub script_path: PathBuf,
    pub case_path: PathBuf,
}

pub fn read_script(path: &Path) -> Result<String, TailToolError> {
    fs::read_to_string(path).map_err(|source| TailToolError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_test_case(path: &Path) -> Result<TestCase, TailToolError> {
    let raw = read_script(path)?;
    serde_json::from_str(&raw).map_err(|source| TailToolError::ParseCase {
        path: path.to_path_buf(),
        source,
    })
}

/// Finds every `<name>.tail` under `root` that has a sibling `<name>.case.json`.
pub fn discover_cases(root: &Path) -> Result<Vec<CasePair>, TailToolError> {
    let mut pairs = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| TailToolError::Scan {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(SCRIPT_EXTENSION)
        {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let case_path = path.with_file_name(format!("{}{}", stem, CASE_SUFFIX));
        if case_path.is_file() {
            pairs.push(CasePair {
                script_path: path.to_path_buf(),
                case_path,
            });
        }
    }

    if pairs.is_empty() {
        return Err(TailToolError::SourceEmpty {
            path: root.to_path_buf(),
        });
    }
    Ok(pairs)
}
