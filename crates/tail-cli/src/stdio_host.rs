use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tail_core::TailError;
use tail_runtime::TerminalHost;

use crate::map_host_io;

pub(crate) struct StdioHost<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    rng: StdRng,
}

impl StdioHost<StdinLock<'static>, Stdout> {
    pub(crate) fn from_std(seed: Option<u64>) -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout(), seed)
    }
}

impl<R: BufRead, W: Write> StdioHost<R, W> {
    pub(crate) fn new(reader: R, writer: W, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            reader,
            writer,
            rng,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> TerminalHost for StdioHost<R, W> {
    fn write_output(&mut self, text: &str, newline: bool) -> Result<(), TailError> {
        if newline {
            writeln!(self.writer, "{}", text).map_err(map_host_io)?;
        } else {
            write!(self.writer, "{}", text).map_err(map_host_io)?;
        }
        self.writer.flush().map_err(map_host_io)
    }

    fn read_input_line(&mut self) -> Result<String, TailError> {
        let mut input = String::new();
        let read = self.reader.read_line(&mut input).map_err(map_host_io)?;
        if read == 0 {
            return Err(TailError::new(
                "HOST_INPUT_CLOSED",
                "Input stream closed while waiting for a reply.",
            ));
        }
        Ok(input.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn sleep(&mut self, seconds: u64) {
        thread::sleep(Duration::from_secs(seconds));
    }

    fn uniform_random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn now(&mut self) -> Instant {
        Instant::now()
    }
}
