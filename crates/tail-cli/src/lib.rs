use std::ffi::OsString;

use clap::Parser;
use tail_api::{load_program, run_source, CreateEngineFromSourceOptions};
use tail_core::TailError;
use tracing::debug;

mod cli_args;
mod error_map;
mod logging;
mod source_loader;
mod stdio_host;

pub(crate) use cli_args::Cli;
pub(crate) use error_map::{emit_error, map_cli_program_dump, map_cli_source_read, map_host_io};
pub(crate) use logging::init_logging;
pub(crate) use source_loader::read_script_source;
pub(crate) use stdio_host::StdioHost;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    init_logging();
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, TailError> {
    let source = read_script_source(&cli.script)?;
    if cli.dump_program {
        return dump_program(&source);
    }

    debug!(script = %cli.script, seed = ?cli.seed, "starting script");
    let host = StdioHost::from_std(cli.seed);
    run_source(CreateEngineFromSourceOptions {
        source,
        host,
        step_limit: None,
    })?;
    Ok(0)
}

fn dump_program(source: &str) -> Result<i32, TailError> {
    let program = load_program(source)?;
    let json = serde_json::to_string_pretty(&program).map_err(map_cli_program_dump)?;
    println!("{}", json);
    Ok(0)
}
