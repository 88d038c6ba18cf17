use tail_core::{Program, TailError};
use tail_parser::load_script;
use tail_runtime::{TailEngine, TailEngineOptions, TerminalHost};

pub struct CreateEngineFromSourceOptions<H: TerminalHost> {
    pub source: String,
    pub host: H,
    pub step_limit: Option<usize>,
}

pub fn load_program(source: &str) -> Result<Program, TailError> {
    load_script(source)
}

pub fn create_engine_from_source<H: TerminalHost>(
    options: CreateEngineFromSourceOptions<H>,
) -> Result<TailEngine<H>, TailError> {
    let program = load_program(&options.source)?;
    TailEngine::new(
        program,
        options.host,
        TailEngineOptions {
            step_limit: options.step_limit,
        },
    )
}

/// Loads `source` and plays it to `end`, handing the host back afterwards.
pub fn run_source<H: TerminalHost>(
    options: CreateEngineFromSourceOptions<H>,
) -> Result<H, TailError> {
    let mut engine = create_engine_from_source(options)?;
    engine.run()?;
    Ok(engine.into_host())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tail_runtime::ScriptedHost;

    fn options(source: &str, host: ScriptedHost) -> CreateEngineFromSourceOptions<ScriptedHost> {
        CreateEngineFromSourceOptions {
            source: source.to_string(),
            host,
            step_limit: Some(1_000),
        }
    }

    #[test]
    fn run_source_plays_script_to_end() {
        let host = run_source(options(
            "chapter start\nprompt Name?+\nprintln Hi.\nend",
            ScriptedHost::with_inputs(["Ada"]),
        ))
        .expect("run should pass");
        assert_eq!(host.transcript(), "Name? Hi.\n");
        assert_eq!(host.remaining_inputs(), 0);
    }

    #[test]
    fn create_engine_reports_loader_errors() {
        let error = create_engine_from_source(options("println", ScriptedHost::new()))
            .err()
            .expect("malformed script should fail");
        assert_eq!(error.code, "LOADER_MALFORMED_LINE");
    }

    #[test]
    fn create_engine_rejects_empty_script() {
        let error = create_engine_from_source(options("\n# nothing\n", ScriptedHost::new()))
            .err()
            .expect("empty script should fail");
        assert_eq!(error.code, "ENGINE_EMPTY_PROGRAM");
    }

    #[test]
    fn create_engine_applies_step_limit() {
        let mut engine = create_engine_from_source(CreateEngineFromSourceOptions {
            source: "chapter spin\ngoto spin".to_string(),
            host: ScriptedHost::new(),
            step_limit: Some(3),
        })
        .expect("engine should build");
        let error = engine.run().expect_err("loop should stop");
        assert_eq!(error.code, "ENGINE_STEP_LIMIT");
    }
}
