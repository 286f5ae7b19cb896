//! Logging for the dataset splitter
//!
//! This module provides:
//! - Custom log formatting with bracketed output
//! - Stdout logging, optionally mirrored to a timestamped log file

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
