//! Shared plumbing for the featcov command line: profile configuration,
//! input loading and result output.

pub mod config;
pub mod output;
pub mod request;

pub use config::{load_config, Config, Profile};
pub use output::{Output, OutputFormat};
pub use request::{load_request, parse_request, LoadError};
