// src/output/mod.rs
//! Output handling with separate planning and execution.
//!
//! Commands build an [`OutputPlan`] from rendered content; [`deliver`] is
//! the only place that touches stdout or the filesystem.

mod paths;
mod types;
mod writer;

pub use paths::{home_output_path, post_output_path};
pub use types::{CompletedOperation, DeliveryTarget, FailedOperation, OutputPlan, OutputReport};
pub use writer::deliver;
