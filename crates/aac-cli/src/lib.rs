//! CLI library components for the `aac` binary.

pub mod logging;
pub mod pipeline;
pub mod report;
