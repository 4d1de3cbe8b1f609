//! Interactive multi-word anagram finder.
//!
//! `bag` holds the letter-count multiset; `dictionary` builds the
//! bag-to-words index once at startup; `enumerator` performs the
//! canonical-order subset search and its Cartesian expansion;
//! `driver` interleaves the two behind a step budget so a UI frame
//! loop never blocks; `history` is the undo/redo chain over the three
//! editable fields.

pub mod bag;
pub mod config;
pub mod dictionary;
pub mod driver;
pub mod enumerator;
pub mod error;
pub mod history;
pub mod io;
