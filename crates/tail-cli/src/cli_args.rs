use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "tail")]
#[command(about = "Plays TAIL text-adventure scripts")]
pub(crate) struct Cli {
    /// Script file to play.
    pub(crate) script: String,
    /// Seed for `chance` rolls; omitted means a fresh seed per run.
    #[arg(long = "seed")]
    pub(crate) seed: Option<u64>,
    /// Print the loaded program as JSON instead of playing it.
    #[arg(long = "dump-program")]
    pub(crate) dump_program: bool,
}
