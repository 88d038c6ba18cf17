mod engine;
mod host;

pub use engine::{ExecutionContext, TailEngine, TailEngineOptions};
pub use host::{ScriptedHost, TerminalHost, DEFAULT_SCRIPTED_SEED};
