//! Apiprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading and
//! report output.

pub mod adapters;
pub mod reporting;
pub mod serialization;
pub mod settings;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use reporting::{ConsoleReporter, write_summary};
pub use serialization::{
    ReportDocument, SerializationError, from_json, to_json_stable, write_report,
};
pub use settings::{ConfigError, HttpSettings, Overrides, Settings};
