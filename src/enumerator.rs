//! Canonical-order subset-sum search over dictionary equivalence classes,
//! plus the Cartesian-product expansion of a found chain into concrete
//! word sequences.

use std::collections::HashSet;
use std::rc::Rc;

use crate::bag::Bag;
use crate::dictionary::{Dictionary, WordId};

/// A per-query, filtered view of one equivalence class: the exclude set
/// already applied, sorted so the search can walk entries by
/// non-increasing letter-sum.
#[derive(Debug)]
pub struct SubsetEntry {
    pub bag: Bag,
    pub word_ids: Vec<WordId>,
}

/// Build the filtered, sorted entry list for one query. Classes whose
/// every word is excluded are dropped entirely; classes with a surviving
/// word keep only the surviving word ids. Shared via `Rc` so the search
/// and its expander can each hold an owned handle without borrowing from
/// whichever struct happens to own the canonical copy.
pub fn build_entries(dict: &Dictionary, exclude: &HashSet<String>) -> Rc<[SubsetEntry]> {
    let mut entries: Vec<SubsetEntry> = dict
        .classes()
        .filter_map(|class| {
            let kept: Vec<WordId> = class
                .word_ids
                .iter()
                .copied()
                .filter(|&id| !exclude.contains(dict.word(id)))
                .collect();
            (!kept.is_empty()).then_some(SubsetEntry { bag: class.bag, word_ids: kept })
        })
        .collect();
    entries.sort_by(|a, b| b.bag.sum().cmp(&a.bag.sum()).then_with(|| b.bag.0.cmp(&a.bag.0)));
    log::trace!("built {} subset entries ({} excluded words)", entries.len(), exclude.len());
    Rc::from(entries)
}

struct Frame {
    /// Bag remaining to cover, at the depth this frame scans candidates for.
    remaining: Bag,
    /// Next index in `entries` this frame has not yet tried.
    next_idx: usize,
}

/// Depth-first, resumable search for chains of equivalence classes whose
/// bags sum to the target. `step` advances the search tree by exactly one
/// node per call, so a caller (the incremental driver) can interleave
/// search with rendering under a per-frame step budget.
pub struct Search {
    entries: Rc<[SubsetEntry]>,
    must_include: Bag,
    stack: Vec<Frame>,
    /// Indices chosen so far; `chain.len() == stack.len() - 1` always.
    chain: Vec<usize>,
    max_words: usize,
    root_is_solution: bool,
    root_solution_emitted: bool,
}

#[derive(Debug)]
pub enum StepOutcome {
    /// A complete chain was found; indices are into `entries`, oldest
    /// (i.e. first-chosen) first.
    Found(Vec<usize>),
    /// Progress was made but no chain completed this step.
    Continue,
    /// The search tree is fully exhausted.
    Done,
}

impl Search {
    pub fn new(entries: Rc<[SubsetEntry]>, target: Bag, must_include: Bag, max_words: usize) -> Search {
        let remaining = target.sub(&must_include);
        Search {
            entries,
            must_include,
            stack: vec![Frame { remaining, next_idx: 0 }],
            chain: Vec::new(),
            max_words: max_words.max(1),
            root_is_solution: remaining.is_empty(),
            root_solution_emitted: false,
        }
    }

    pub fn must_include(&self) -> Bag {
        self.must_include
    }

    pub fn step(&mut self) -> StepOutcome {
        if self.root_is_solution && !self.root_solution_emitted {
            self.root_solution_emitted = true;
            return StepOutcome::Found(Vec::new());
        }

        let Some(frame) = self.stack.last_mut() else { return StepOutcome::Done };

        if frame.next_idx >= self.entries.len() {
            self.stack.pop();
            self.chain.pop();
            return if self.stack.is_empty() { StepOutcome::Done } else { StepOutcome::Continue };
        }

        let idx = frame.next_idx;
        frame.next_idx += 1;
        let remaining = frame.remaining;
        let candidate = &self.entries[idx];

        if candidate.bag.sum() > remaining.sum() || !remaining.contains(&candidate.bag) {
            return StepOutcome::Continue;
        }

        let new_remaining = remaining.sub(&candidate.bag);
        self.chain.push(idx);

        if new_remaining.is_empty() {
            let found = self.chain.clone();
            self.chain.pop();
            return StepOutcome::Found(found);
        }

        if self.chain.len() >= self.max_words {
            self.chain.pop();
            return StepOutcome::Continue;
        }

        self.stack.push(Frame { remaining: new_remaining, next_idx: idx });
        StepOutcome::Continue
    }
}

/// Multi-radix counter ("odometer") over the word lists of a found
/// chain's classes, expanding one equivalence-class combination into
/// every concrete ordered phrase.
pub struct Expander {
    lists: Vec<Vec<WordId>>,
    digits: Vec<usize>,
    done: bool,
}

impl Expander {
    pub fn new(entries: &Rc<[SubsetEntry]>, chain: &[usize]) -> Expander {
        let lists: Vec<Vec<WordId>> = chain.iter().map(|&i| entries[i].word_ids.clone()).collect();
        let digits = vec![0; lists.len()];
        Expander { lists, digits, done: false }
    }

    pub fn next_phrase(&mut self) -> Option<Vec<WordId>> {
        if self.done {
            return None;
        }
        if self.lists.is_empty() {
            self.done = true;
            return Some(Vec::new());
        }

        let phrase: Vec<WordId> =
            self.lists.iter().zip(&self.digits).map(|(list, &d)| list[d]).collect();

        // Advance the odometer, least-significant (last word) first.
        let mut carry = true;
        for i in (0..self.digits.len()).rev() {
            if !carry {
                break;
            }
            self.digits[i] += 1;
            if self.digits[i] < self.lists[i].len() {
                carry = false;
            } else {
                self.digits[i] = 0;
            }
        }
        if carry {
            self.done = true;
        }
        Some(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;

    fn fixture() -> Dictionary {
        let mut dict = Dictionary::new(false);
        for w in ["listen", "silent", "tinsel", "cat", "act", "tac", "dog"] {
            dict.insert(w);
        }
        dict
    }

    fn run_all(entries: &Rc<[SubsetEntry]>, target: Bag, must_include: Bag) -> Vec<Vec<usize>> {
        let mut search = Search::new(Rc::clone(entries), target, must_include, 6);
        let mut found = Vec::new();
        loop {
            match search.step() {
                StepOutcome::Found(chain) => found.push(chain),
                StepOutcome::Continue => continue,
                StepOutcome::Done => break,
            }
        }
        found
    }

    #[test]
    fn single_word_match() {
        let dict = fixture();
        let entries = build_entries(&dict, &HashSet::new());
        let target = Bag::from_bytes(b"cat").unwrap();
        let found = run_all(&entries, target, Bag::EMPTY);
        assert_eq!(found.len(), 1);
        let chain = &found[0];
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn two_word_combination() {
        let dict = fixture();
        let entries = build_entries(&dict, &HashSet::new());
        let target = Bag::from_bytes(b"catdog").unwrap();
        let found = run_all(&entries, target, Bag::EMPTY);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len(), 2);
    }

    #[test]
    fn expander_yields_cartesian_product() {
        let dict = fixture();
        let entries = build_entries(&dict, &HashSet::new());
        let target = Bag::from_bytes(b"catdog").unwrap();
        let found = run_all(&entries, target, Bag::EMPTY);
        let chain = &found[0];
        let mut expander = Expander::new(&entries, chain);
        let mut count = 0;
        while expander.next_phrase().is_some() {
            count += 1;
        }
        let expect: usize = chain.iter().map(|&i| entries[i].word_ids.len()).product();
        assert_eq!(count, expect);
    }

    #[test]
    fn must_include_alone_satisfies_target() {
        let dict = fixture();
        let entries = build_entries(&dict, &HashSet::new());
        let target = Bag::from_bytes(b"cat").unwrap();
        let include = Bag::from_bytes(b"cat").unwrap();
        let found = run_all(&entries, target, include);
        assert_eq!(found.len(), 1);
        assert!(found[0].is_empty());
    }

    #[test]
    fn listencat_yields_nine_result_cartesian_product() {
        // spec.md §8 worked scenario: `listencat` with no include/exclude
        // => the 3-word `{listen,silent,tinsel}` class times the 3-word
        // `{cat,act,tac}` class, 9 ordered pairs, larger-sum class first.
        let dict = fixture();
        let entries = build_entries(&dict, &HashSet::new());
        let target = Bag::from_bytes(b"listencat").unwrap();
        let found = run_all(&entries, target, Bag::EMPTY);
        assert_eq!(found.len(), 1, "exactly one chain of classes should satisfy the target");
        let chain = &found[0];
        assert_eq!(chain.len(), 2);
        assert_eq!(entries[chain[0]].bag.sum(), 6, "the 6-letter class (listen) is chosen first");
        assert_eq!(entries[chain[1]].bag.sum(), 3, "the 3-letter class (cat) is chosen second");

        let mut expander = Expander::new(&entries, chain);
        let mut phrases = Vec::new();
        while let Some(words) = expander.next_phrase() {
            phrases.push(words);
        }
        assert_eq!(phrases.len(), 9);

        // Every phrase's concatenated letters reproduce the target exactly.
        for phrase in &phrases {
            let mut combined = Bag::EMPTY;
            for &id in phrase {
                let word = dict.word(id);
                combined = combined.add(&Bag::from_bytes(word.as_bytes()).unwrap());
            }
            assert_eq!(combined, target);
        }
    }

    #[test]
    fn chain_spanning_three_classes() {
        // A target covering three distinct equivalence classes must
        // produce a chain of length 3, not be truncated by an
        // under-sized word-count-based depth cap.
        let dict = fixture();
        let entries = build_entries(&dict, &HashSet::new());
        let target = Bag::from_bytes(b"listencatdog").unwrap();
        let found = run_all(&entries, target, Bag::EMPTY);
        assert_eq!(found.len(), 1);
        let chain = &found[0];
        assert_eq!(chain.len(), 3);

        let mut expander = Expander::new(&entries, chain);
        let mut count = 0;
        while expander.next_phrase().is_some() {
            count += 1;
        }
        // 3 listen-class words * 3 cat-class words * 1 dog-class word.
        assert_eq!(count, 9);
    }

    #[test]
    fn exclude_removes_whole_class_when_last_word_excluded() {
        let dict = fixture();
        let mut exclude = HashSet::new();
        exclude.insert("cat".to_string());
        exclude.insert("act".to_string());
        exclude.insert("tac".to_string());
        let entries = build_entries(&dict, &exclude);
        let target = Bag::from_bytes(b"cat").unwrap();
        let found = run_all(&entries, target, Bag::EMPTY);
        assert!(found.is_empty());
    }
}
