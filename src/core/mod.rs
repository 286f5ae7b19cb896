pub mod dataset;
pub mod manifest;
pub mod operations;
pub mod pipeline;
