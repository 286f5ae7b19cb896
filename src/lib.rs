//! Splits a folder of images into train/test/valid subsets, copies them into
//! a YOLO-style directory tree and writes the data manifest that points a
//! detector's training run at them.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;

pub use config::SplitterConfig;
pub use error::{SplitterError, SplitterResult};
