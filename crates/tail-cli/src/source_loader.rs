use std::fs;
use std::path::PathBuf;

use tail_core::TailError;

use crate::map_cli_source_read;

pub(crate) fn read_script_source(script: &str) -> Result<String, TailError> {
    let path = PathBuf::from(script);
    if !path.exists() {
        return Err(TailError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("script does not exist: {}", path.display()),
        ));
    }
    if !path.is_file() {
        return Err(TailError::new(
            "CLI_SOURCE_NOT_FILE",
            format!("script is not a file: {}", path.display()),
        ));
    }

    fs::read_to_string(&path).map_err(map_cli_source_read)
}
