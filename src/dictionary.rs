//! Build-once, read-only index from letter bag to the dictionary words
//! that are anagrams of each other.

use std::collections::HashMap;

use crate::bag::{Bag, BagBuildHasher};

/// Index into `Dictionary::words`.
pub type WordId = u32;

#[derive(Debug, Default)]
pub struct EquivalenceClass {
    pub bag: Bag,
    pub word_ids: Vec<WordId>,
}

#[derive(Debug, Default)]
pub struct Dictionary {
    words: Vec<Box<str>>,
    classes: HashMap<Bag, EquivalenceClass, BagBuildHasher>,
    allow_upper: bool,
}

impl Dictionary {
    pub fn new(allow_upper: bool) -> Dictionary {
        Dictionary { words: Vec::new(), classes: HashMap::default(), allow_upper }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.words[id as usize]
    }

    pub fn class(&self, bag: &Bag) -> Option<&EquivalenceClass> {
        self.classes.get(bag)
    }

    pub fn classes(&self) -> impl Iterator<Item = &EquivalenceClass> {
        self.classes.values()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Insert one candidate dictionary word. Rejects non-ASCII bytes,
    /// uppercase words unless `allow_upper` was set at construction, and
    /// words whose bag is empty (no letters at all). Exact-duplicate
    /// words are dropped rather than inserted twice into a class, per
    /// this crate's resolution of the "SHOULD dedupe" guidance to a MUST.
    /// Per-word rejection never aborts the overall load.
    pub fn insert(&mut self, word: &str) {
        if !word.bytes().all(|b| b.is_ascii()) {
            log::trace!("rejected {word:?}: non-ASCII byte");
            return;
        }
        if !self.allow_upper && word.bytes().any(|b| b.is_ascii_uppercase()) {
            log::trace!("rejected {word:?}: uppercase without --upper");
            return;
        }
        let Some(bag) = Bag::from_bytes(word.as_bytes()) else { return };

        let class = self.classes.entry(bag).or_insert_with(|| EquivalenceClass {
            bag,
            word_ids: Vec::new(),
        });
        if class.word_ids.iter().any(|&id| self.words[id as usize].as_ref() == word) {
            return;
        }
        let id = self.words.len() as WordId;
        self.words.push(word.into());
        // `class` borrowed `self.classes`, not `self.words`; re-borrow
        // to push the new id now that the word is interned.
        self.classes.get_mut(&bag).unwrap().word_ids.push(id);
    }

    pub fn insert_all<'a>(&mut self, lines: impl Iterator<Item = &'a str>) {
        for line in lines {
            self.insert(line.trim());
        }
    }
}
