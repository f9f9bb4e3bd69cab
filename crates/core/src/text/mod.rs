//! Text transforms: case, slugs, statistics and line utilities.

pub mod case;
pub mod lines;
pub mod slug;
pub mod stats;
