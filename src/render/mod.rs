//! Text rendering for property-list documents.

pub mod plist;

pub use plist::render_document;
