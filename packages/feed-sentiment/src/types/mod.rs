//! Data types flowing through the pipeline.

pub mod config;
pub mod item;
pub mod label;
pub mod report;
pub mod summary;
