//! CLI library components for the survey selection tool.

pub mod logging;
pub mod render;
