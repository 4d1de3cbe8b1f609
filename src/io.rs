//! Dictionary file loading: the boundary between raw bytes on disk and
//! the `Dictionary` index. Accepts any run of LF/CR/VT/FF as a line
//! terminator, matching `is_linebreak` in the reference implementation.

use std::path::Path;

use crate::dictionary::Dictionary;
use crate::error::{AnagramError, Result};

fn is_linebreak(b: u8) -> bool {
    (b'\n'..=b'\r').contains(&b)
}

/// Split a raw byte buffer into lines without requiring valid UTF-8
/// outside of ASCII; non-ASCII words are still handed to
/// `Dictionary::insert`, which rejects them individually.
pub fn split_lines(buf: &[u8]) -> impl Iterator<Item = &str> {
    buf.split(|&b| is_linebreak(b)).filter_map(|line| std::str::from_utf8(line).ok())
}

pub fn load_dictionary(path: &Path, allow_upper: bool) -> Result<Dictionary> {
    let bytes = std::fs::read(path).map_err(|source| AnagramError::DictionaryUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut dict = Dictionary::new(allow_upper);
    dict.insert_all(split_lines(&bytes));
    log::debug!("indexed {} words into {} equivalence classes from {:?}", dict.len(), dict.class_count(), path);
    Ok(dict)
}
