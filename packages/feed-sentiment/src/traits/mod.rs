//! Trait seams for the pipeline's external collaborators.

pub mod oracle;
pub mod source;
