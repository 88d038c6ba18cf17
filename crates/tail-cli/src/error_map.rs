use std::fmt::Display;
use std::io::{self, Write};

use tail_core::TailError;

fn map_error(code: &'static str, error: impl Display) -> TailError {
    TailError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: TailError) -> i32 {
    let mut stderr = io::stderr();
    let _ = write_error_block(&mut stderr, &error);
    1
}

pub(crate) fn write_error_block(writer: &mut dyn Write, error: &TailError) -> io::Result<()> {
    writeln!(writer, "RESULT:ERROR")?;
    writeln!(writer, "ERROR_CODE:{}", error.code)?;
    if let Some(location) = error.location {
        writeln!(writer, "ERROR_LINE:{}", location.line)?;
    }
    let message = serde_json::to_string(&error.message).map_err(io::Error::other)?;
    writeln!(writer, "ERROR_MSG_JSON:{}", message)
}

pub(crate) fn map_cli_source_read(error: io::Error) -> TailError {
    map_error("CLI_SOURCE_READ", error)
}

pub(crate) fn map_cli_program_dump(error: serde_json::Error) -> TailError {
    map_error("CLI_PROGRAM_DUMP", error)
}

pub(crate) fn map_host_io(error: io::Error) -> TailError {
    map_error("HOST_IO", error)
}
