use std::path::Path;

use tail_api::{create_engine_from_source, CreateEngineFromSourceOptions};
use tail_runtime::{ScriptedHost, DEFAULT_SCRIPTED_SEED};

use crate::source::{read_script, read_test_case};
use crate::{TailToolError, TestCase, TESTCASE_SCHEMA_V1};

pub const MAX_STEPS: usize = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output: String,
    pub error_code: Option<String>,
    pub consumed_inputs: usize,
    pub steps: usize,
}

pub fn run_case(script_path: &Path, case: &TestCase) -> Result<RunReport, TailToolError> {
    let source = read_script(script_path)?;
    let host = ScriptedHost::with_inputs(case.inputs.iter().cloned())
        .with_seed(case.seed.unwrap_or(DEFAULT_SCRIPTED_SEED))
        .with_randoms(case.randoms.iter().copied());

    let mut engine = match create_engine_from_source(CreateEngineFromSourceOptions {
        source,
        host,
        step_limit: Some(MAX_STEPS),
    }) {
        Ok(engine) => engine,
        Err(error) => {
            return Ok(RunReport {
                output: String::new(),
                error_code: Some(error.code),
                consumed_inputs: 0,
                steps: 0,
            })
        }
    };

    let error_code = match engine.run() {
        Ok(()) => None,
        Err(error) if error.code == "ENGINE_STEP_LIMIT" => {
            return Err(TailToolError::GuardExceeded {
                max_steps: MAX_STEPS,
            })
        }
        Err(error) => Some(error.code),
    };

    let steps = engine.steps_taken();
    let host = engine.host();
    Ok(RunReport {
        output: host.transcript().to_string(),
        error_code,
        consumed_inputs: case.inputs.len() - host.remaining_inputs(),
        steps,
    })
}

pub fn assert_case(script_path: &Path, case_path: &Path) -> Result<(), TailToolError> {
    let case = read_test_case(case_path)?;
    if case.schema_version != TESTCASE_SCHEMA_V1 {
        return Err(TailToolError::InvalidSchemaVersion {
            expected: TESTCASE_SCHEMA_V1.to_string(),
            found: case.schema_version,
        });
    }

    let report = run_case(script_path, &case)?;

    if report.error_code != case.expected_error_code {
        return Err(TailToolError::ErrorCodeMismatch {
            expected: case
                .expected_error_code
                .unwrap_or_else(|| "none".to_string()),
            actual: report.error_code.unwrap_or_else(|| "none".to_string()),
        });
    }

    if report.output != case.expected_output {
        return Err(TailToolError::OutputMismatch {
            expected: case.expected_output,
            actual: report.output,
        });
    }

    if report.error_code.is_none() && report.consumed_inputs != case.inputs.len() {
        return Err(TailToolError::UnusedInputs {
            used: report.consumed_inputs,
            total: case.inputs.len(),
        });
    }

    Ok(())
}
