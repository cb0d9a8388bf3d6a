//! Reading rendered plists back: a line scan of the top-level dict.

pub mod entry;
pub mod parse;

pub use entry::TopLevelEntry;
pub use parse::{parse_document, parse_file};
