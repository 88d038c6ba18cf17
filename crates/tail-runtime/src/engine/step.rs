use tail_core::{Phrase, TailError, Verb};
use tracing::trace;

use super::TailEngine;
use crate::host::TerminalHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    Advance,
    Redirected,
}

impl<H: TerminalHost> TailEngine<H> {
    /// Executes the phrase under the bookmark. Does nothing once the bookmark
    /// rests on `end`.
    pub fn step(&mut self) -> Result<(), TailError> {
        let bookmark = self.context.bookmark;
        // Statements are never empty and jumps land on phrase 0, so a missing
        // phrase means the bookmark ran past the last statement.
        let (Some(statement), Some(phrase)) = (
            self.program.get(bookmark.statement),
            self.program.phrase_at(bookmark).cloned(),
        ) else {
            let last_line = self
                .program
                .statements()
                .last()
                .map_or(0, |statement| statement.line());
            return Err(TailError::at_line(
                "ENGINE_END_MISSING",
                "Execution ran past the last statement without reaching \"end\".",
                last_line,
            ));
        };
        let line = statement.line();

        if phrase.is_end() {
            return Ok(());
        }

        if let Some(limit) = self.options.step_limit {
            if self.steps_taken >= limit {
                return Err(TailError::at_line(
                    "ENGINE_STEP_LIMIT",
                    format!("Step limit of {} exceeded.", limit),
                    line,
                ));
            }
        }
        self.steps_taken += 1;

        trace!(%bookmark, verb = %phrase.verb, "dispatch");
        let flow = self
            .dispatch(&phrase, bookmark.statement)
            .map_err(|error| error.or_at_line(line))?;
        if flow == Flow::Advance {
            self.context.bookmark = self.program.next_phrase(bookmark);
        }
        Ok(())
    }

    fn dispatch(&mut self, phrase: &Phrase, statement_index: usize) -> Result<Flow, TailError> {
        let argument = self.context.substitute(&phrase.argument);

        match &phrase.verb {
            Verb::Println => {
                self.host.write_output(&argument, true)?;
                Ok(Flow::Advance)
            }
            Verb::Print => {
                self.host.write_output(&argument, false)?;
                Ok(Flow::Advance)
            }
            Verb::Goto => self.jump_to_chapter(&argument, None),
            Verb::Visit => self.jump_to_chapter(&argument, Some(statement_index + 1)),
            Verb::Return => self.return_from_visit(),
            Verb::Prompt => {
                self.host.write_output(&argument, false)?;
                let line = self.host.read_input_line()?;
                self.context.last_input = line.to_lowercase();
                Ok(Flow::Advance)
            }
            Verb::On => {
                if self.context.last_input.contains(&argument.to_lowercase()) {
                    Ok(Flow::Advance)
                } else {
                    Ok(self.skip_statement("on"))
                }
            }
            Verb::Match => {
                let needle = argument.to_lowercase();
                match self.context.last_input.strip_prefix(needle.as_str()) {
                    Some(rest) => {
                        self.context.last_input = rest.to_string();
                        Ok(Flow::Advance)
                    }
                    None => Ok(self.skip_statement("match")),
                }
            }
            Verb::Set => {
                self.context.flags.insert(argument);
                Ok(Flow::Advance)
            }
            Verb::Clear => {
                self.context.flags.remove(&argument);
                Ok(Flow::Advance)
            }
            Verb::If => {
                if self.context.flags.contains(&argument) {
                    Ok(Flow::Advance)
                } else {
                    Ok(self.skip_statement("if"))
                }
            }
            Verb::Unless => {
                if self.context.flags.contains(&argument) {
                    Ok(self.skip_statement("unless"))
                } else {
                    Ok(Flow::Advance)
                }
            }
            Verb::Wait => {
                let seconds = parse_integer_argument::<u64>(&phrase.verb, &argument)?;
                self.host.sleep(seconds);
                Ok(Flow::Advance)
            }
            Verb::Chance => {
                let percent = parse_integer_argument::<i64>(&phrase.verb, &argument)?;
                let roll = self.host.uniform_random();
                if roll < percent as f64 / 100.0 {
                    Ok(Flow::Advance)
                } else {
                    Ok(self.skip_statement("chance"))
                }
            }
            Verb::Time => self.execute_time(&argument),
            // `end` never reaches dispatch; `chapter` only labels a jump target.
            Verb::Chapter | Verb::End => Ok(Flow::Advance),
            Verb::Other(raw) => Err(TailError::new(
                "ENGINE_UNKNOWN_VERB",
                format!("Unknown verb \"{}\".", raw),
            )),
        }
    }

    fn execute_time(&mut self, argument: &str) -> Result<Flow, TailError> {
        match argument {
            "start" => self.context.timer_start = Some(self.host.now()),
            "end" => self.context.timer_end = Some(self.host.now()),
            "show" => {
                let (Some(start), Some(end)) = (self.context.timer_start, self.context.timer_end)
                else {
                    return Err(TailError::new(
                        "ENGINE_TIMER_UNSET",
                        "\"time show\" needs both \"time start\" and \"time end\" first.",
                    ));
                };
                let seconds = match end.checked_duration_since(start) {
                    Some(forward) => forward.as_secs_f64(),
                    None => -start.duration_since(end).as_secs_f64(),
                };
                // Halves round to even.
                let seconds = seconds.round_ties_even() as i64;
                self.host.write_output(&format!("{} sec", seconds), true)?;
            }
            other => {
                return Err(TailError::new(
                    "ENGINE_INVALID_ARGUMENT",
                    format!(
                        "\"time\" expects start, end or show, got \"{}\".",
                        other
                    ),
                ))
            }
        }
        Ok(Flow::Advance)
    }
}

fn parse_integer_argument<T: std::str::FromStr>(verb: &Verb, argument: &str) -> Result<T, TailError> {
    argument.trim().parse::<T>().map_err(|_| {
        TailError::new(
            "ENGINE_INVALID_ARGUMENT",
            format!("\"{}\" expects an integer, got \"{}\".", verb, argument),
        )
    })
}
