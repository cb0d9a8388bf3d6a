//! Build launchd job property lists in memory and render them as XML.
//!
//! Layers, leaves first:
//! - `tree`: values, nodes, pairs and composites plus their text form
//! - `calendar`: predicate generators for calendar schedules
//! - `options`: the launchd option catalog
//! - `job`: the document root and writing it out
//! - `config` / `inspect`: JSON job descriptions in, rendered plists back out

pub mod calendar;
pub mod config;
pub mod error;
pub mod inspect;
pub mod job;
pub mod options;
pub mod render;
pub mod tree;

pub use error::{Error, Result};
pub use job::{Job, JobOption};
