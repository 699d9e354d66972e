//! User-facing output.

mod console;

pub use console::{ConsoleReporter, write_summary};
