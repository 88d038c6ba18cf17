use tail_core::{Bookmark, TailError};
use tracing::debug;

use super::step::Flow;
use super::TailEngine;
use crate::host::TerminalHost;

impl<H: TerminalHost> TailEngine<H> {
    /// Jumps to the chapter named `label`. `return_to` is pushed first when the
    /// jump is a `visit`.
    pub(super) fn jump_to_chapter(
        &mut self,
        label: &str,
        return_to: Option<usize>,
    ) -> Result<Flow, TailError> {
        let target = self.program.find_chapter(label).ok_or_else(|| {
            TailError::new(
                "ENGINE_CHAPTER_NOT_FOUND",
                format!("Chapter \"{}\" is not defined.", label),
            )
        })?;

        if let Some(resume) = return_to {
            self.context.call_stack.push(resume);
        }
        self.context.last_substitution = label.to_string();
        self.context.bookmark = Bookmark::statement_start(target);
        debug!(
            label,
            statement = target,
            depth = self.context.call_stack.len(),
            "jumped to chapter"
        );
        Ok(Flow::Redirected)
    }

    pub(super) fn return_from_visit(&mut self) -> Result<Flow, TailError> {
        let resume = self.context.call_stack.pop().ok_or_else(|| {
            TailError::new(
                "ENGINE_RETURN_WITHOUT_VISIT",
                "Reached \"return\" with no matching \"visit\".",
            )
        })?;

        self.context.bookmark = Bookmark::statement_start(resume);
        debug!(resume, depth = self.context.call_stack.len(), "returned from visit");
        Ok(Flow::Redirected)
    }

    /// Abandons the rest of the current statement.
    pub(super) fn skip_statement(&mut self, guard: &str) -> Flow {
        let from = self.context.bookmark;
        self.context.bookmark = self.program.next_statement(from);
        debug!(guard, %from, "guard failed, skipping statement");
        Flow::Redirected
    }
}
