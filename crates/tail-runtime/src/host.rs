use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tail_core::TailError;

pub const DEFAULT_SCRIPTED_SEED: u64 = 1;

/// Terminal capabilities the engine drives. Implementations own the actual
/// streams, clock and randomness.
pub trait TerminalHost {
    fn write_output(&mut self, text: &str, newline: bool) -> Result<(), TailError>;

    /// Returns one line of input without its line terminator.
    fn read_input_line(&mut self) -> Result<String, TailError>;

    fn sleep(&mut self, seconds: u64);

    /// Uniform value in `[0, 1)`.
    fn uniform_random(&mut self) -> f64;

    fn now(&mut self) -> Instant;
}

impl<H: TerminalHost + ?Sized> TerminalHost for &mut H {
    fn write_output(&mut self, text: &str, newline: bool) -> Result<(), TailError> {
        (**self).write_output(text, newline)
    }

    fn read_input_line(&mut self) -> Result<String, TailError> {
        (**self).read_input_line()
    }

    fn sleep(&mut self, seconds: u64) {
        (**self).sleep(seconds)
    }

    fn uniform_random(&mut self) -> f64 {
        (**self).uniform_random()
    }

    fn now(&mut self) -> Instant {
        (**self).now()
    }
}

/// In-memory host: canned input lines, a captured transcript, and a virtual
/// clock that only moves when the script sleeps.
#[derive(Debug)]
pub struct ScriptedHost {
    inputs: VecDeque<String>,
    randoms: VecDeque<f64>,
    rng: StdRng,
    transcript: String,
    origin: Instant,
    elapsed: Duration,
    slept: Vec<u64>,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            inputs: VecDeque::new(),
            randoms: VecDeque::new(),
            rng: StdRng::seed_from_u64(DEFAULT_SCRIPTED_SEED),
            transcript: String::new(),
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            slept: Vec::new(),
        }
    }

    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut host = Self::new();
        host.inputs = inputs.into_iter().map(Into::into).collect();
        host
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Queued values are returned before falling back to the seeded generator.
    pub fn with_randoms<I>(mut self, randoms: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.randoms.extend(randoms);
        self
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn take_transcript(&mut self) -> String {
        std::mem::take(&mut self.transcript)
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn slept_seconds(&self) -> &[u64] {
        &self.slept
    }
}

impl TerminalHost for ScriptedHost {
    fn write_output(&mut self, text: &str, newline: bool) -> Result<(), TailError> {
        self.transcript.push_str(text);
        if newline {
            self.transcript.push('\n');
        }
        Ok(())
    }

    fn read_input_line(&mut self) -> Result<String, TailError> {
        self.inputs.pop_front().ok_or_else(|| {
            TailError::new("HOST_INPUT_CLOSED", "No scripted input is left to read.")
        })
    }

    fn sleep(&mut self, seconds: u64) {
        self.slept.push(seconds);
        // The virtual clock stops at the last instant it can represent.
        let advanced = self.elapsed.saturating_add(Duration::from_secs(seconds));
        if self.origin.checked_add(advanced).is_some() {
            self.elapsed = advanced;
        }
    }

    fn uniform_random(&mut self) -> f64 {
        match self.randoms.pop_front() {
            Some(value) => value,
            None => self.rng.gen::<f64>(),
        }
    }

    fn now(&mut self) -> Instant {
        self.origin.checked_add(self.elapsed).unwrap_or(self.origin)
    }
}

#[cfg(test)]
mod host_tests {
    use super::*;

    #[test]
    fn scripted_host_reads_inputs_in_order_then_reports_closed_input() {
        let mut host = ScriptedHost::with_inputs(["north", "south"]);
        assert_eq!(host.read_input_line().expect("first input"), "north");
        assert_eq!(host.remaining_inputs(), 1);
        assert_eq!(host.read_input_line().expect("second input"), "south");
        let error = host.read_input_line().expect_err("inputs exhausted");
        assert_eq!(error.code, "HOST_INPUT_CLOSED");
    }

    #[test]
    fn scripted_host_clock_advances_only_on_sleep() {
        let mut host = ScriptedHost::new();
        let before = host.now();
        assert_eq!(host.now(), before);
        host.sleep(2);
        host.sleep(3);
        assert_eq!(host.now().duration_since(before), Duration::from_secs(5));
        assert_eq!(host.slept_seconds(), &[2, 3]);
    }

    #[test]
    fn scripted_host_clock_stops_instead_of_overflowing() {
        let mut host = ScriptedHost::new();
        let before = host.now();
        host.sleep(u64::MAX);
        host.sleep(u64::MAX);
        assert!(host.now() >= before);
        assert_eq!(host.slept_seconds(), &[u64::MAX, u64::MAX]);
    }

    #[test]
    fn scripted_host_prefers_queued_randoms_and_stays_in_unit_range() {
        let mut host = ScriptedHost::new().with_randoms([0.25, 0.75]);
        assert_eq!(host.uniform_random(), 0.25);
        assert_eq!(host.uniform_random(), 0.75);
        for _ in 0..100 {
            let value = host.uniform_random();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn scripted_host_same_seed_gives_same_sequence() {
        let mut left = ScriptedHost::new().with_seed(42);
        let mut right = ScriptedHost::new().with_seed(42);
        for _ in 0..8 {
            assert_eq!(left.uniform_random(), right.uniform_random());
        }
    }

    #[test]
    fn scripted_host_transcript_tracks_newlines() {
        let mut host = ScriptedHost::new();
        host.write_output("Name? ", false).expect("write");
        host.write_output("Hello", true).expect("write");
        assert_eq!(host.transcript(), "Name? Hello\n");
        assert_eq!(host.take_transcript(), "Name? Hello\n");
        assert_eq!(host.transcript(), "");
    }
}
