//! Tree layer: the in-memory model every plist option is built from.
//!
//! It owns:
//! - Value (text/integer leaves) and the Tag registry
//! - Node and Element (tagged containers and the shapes a child can take)
//! - Pair (key marker plus value)
//! - Composite (a key over one outer collection of uniform inner elements)

pub mod composite;
pub mod node;
pub mod pair;
pub mod tag;
pub mod value;

pub use composite::{Composite, Entries, Entry, Flag, Flags, IntegerEntries, Strings, Wrap};
pub use node::{Element, IntoElements, Node, flatten};
pub use pair::Pair;
pub use tag::Tag;
pub use value::Value;
