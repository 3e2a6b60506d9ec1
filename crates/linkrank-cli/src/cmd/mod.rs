pub mod analyze;
pub mod completions;
pub mod input;
pub mod stats;
