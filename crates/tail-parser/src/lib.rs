mod loader;

pub use loader::{load_script, COMMENT_MARKER, PRINT_SHORTHAND_MARKER, SPACE_ESCAPE};
