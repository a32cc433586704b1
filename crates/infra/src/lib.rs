//! Infrastructure layer: configuration, catalog source, CSV output, run pipeline.

pub mod config;
pub mod pipeline;
pub mod sink;
pub mod source;
