//! Config layer: JSON job descriptions and their validation into a [`Job`].
//!
//! This module is intentionally separate from the tree model. It owns:
//! - JobSpec (serde-friendly job.json shape)
//! - the mapping from JobSpec fields onto option constructors
//!
//! [`Job`]: crate::job::Job

pub mod job;

pub use job::{CalendarSpec, FieldsSpec, IntervalSpec, JobSpec, KeepAliveSpec};
