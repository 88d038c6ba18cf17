use std::collections::BTreeSet;
use std::time::Instant;

use tail_core::{Bookmark, Phrase, Program, TailError};
use tracing::info;

use crate::host::TerminalHost;

mod control_flow;
mod step;

#[derive(Debug, Clone, Default)]
pub struct TailEngineOptions {
    /// Upper bound on executed phrases; `None` runs until `end`.
    pub step_limit: Option<usize>,
}

/// Mutable state of one run.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    bookmark: Bookmark,
    flags: BTreeSet<String>,
    call_stack: Vec<usize>,
    last_input: String,
    last_substitution: String,
    timer_start: Option<Instant>,
    timer_end: Option<Instant>,
}

impl ExecutionContext {
    pub fn bookmark(&self) -> Bookmark {
        self.bookmark
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn flags(&self) -> &BTreeSet<String> {
        &self.flags
    }

    pub fn call_stack(&self) -> &[usize] {
        &self.call_stack
    }

    pub fn last_input(&self) -> &str {
        &self.last_input
    }

    pub fn last_substitution(&self) -> &str {
        &self.last_substitution
    }

    fn substitute(&self, argument: &str) -> String {
        argument.replace('$', &self.last_substitution)
    }
}

pub struct TailEngine<H: TerminalHost> {
    program: Program,
    host: H,
    options: TailEngineOptions,
    context: ExecutionContext,
    steps_taken: usize,
}

impl<H: TerminalHost> TailEngine<H> {
    pub fn new(program: Program, host: H, options: TailEngineOptions) -> Result<Self, TailError> {
        if program.is_empty() {
            return Err(TailError::new(
                "ENGINE_EMPTY_PROGRAM",
                "Script contains no statements.",
            ));
        }

        Ok(Self {
            program,
            host,
            options,
            context: ExecutionContext::default(),
            steps_taken: 0,
        })
    }

    pub fn run(&mut self) -> Result<(), TailError> {
        info!(statements = self.program.len(), "run started");
        while !self.is_finished() {
            self.step()?;
        }
        info!(steps = self.steps_taken, "run finished");
        Ok(())
    }

    /// True once the bookmark rests on an `end` phrase.
    pub fn is_finished(&self) -> bool {
        self.current_phrase().is_some_and(Phrase::is_end)
    }

    pub fn current_phrase(&self) -> Option<&Phrase> {
        self.program.phrase_at(self.context.bookmark)
    }

    pub fn bookmark(&self) -> Bookmark {
        self.context.bookmark
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
