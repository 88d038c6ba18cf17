pub mod error;
pub mod types;

pub use error::TailError;
pub use types::*;
