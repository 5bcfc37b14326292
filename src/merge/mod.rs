//! The two passes that run after every part has been parsed.

mod runs;
mod sources;

pub use runs::merge_runs;
pub use sources::{MergedStyleEntry, MergedTextStyles, OrderedSet, merge_sources};
