//! Report generation

mod json;

pub use json::{JsonReporter, write_report};
