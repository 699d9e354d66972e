//! JSON report files.
//!
//! Output is pretty-printed with two-space indentation and ends with a
//! newline, so reports from two runs diff cleanly.

mod json;

pub use json::*;
