//! Stepped query driver: interleaves the subset search and its Cartesian
//! expansion with a caller-supplied step budget, so a UI frame loop can
//! render partial results rather than blocking until the whole query
//! finishes.

use std::collections::HashSet;
use std::rc::Rc;

use crate::bag::Bag;
use crate::dictionary::{Dictionary, WordId};
use crate::enumerator::{build_entries, Expander, Search, StepOutcome, SubsetEntry};

pub struct ResultRecord {
    pub words: Vec<WordId>,
}

#[derive(Default)]
pub struct ResultStore {
    pub records: Vec<ResultRecord>,
}

impl ResultStore {
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Outcome of starting a query. Neither variant is an error: both are
/// ordinary data the UI renders.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The include bag exceeds what the input bag provides; `missing` is
    /// the clamped deficit and `suggestions` lists up to 20 short phrases
    /// whose letters would cover it.
    Shortfall { missing: Bag, suggestions: Vec<Vec<WordId>> },
    /// Input was non-empty and searchable; results stream into the
    /// driver's `ResultStore` as `advance` is called.
    Searching,
    /// Nothing to search (input bag is empty).
    Empty,
}

const SHORTFALL_SUGGESTION_LIMIT: usize = 20;

#[derive(Default)]
pub struct Driver {
    search: Option<Search>,
    pending: Option<(Rc<[SubsetEntry]>, Expander)>,
    pub store: ResultStore,
    finished: bool,
}

impl Driver {
    pub fn new() -> Driver {
        Driver { search: None, pending: None, store: ResultStore::default(), finished: true }
    }

    /// Start a new query over `entries`, discarding any in-flight one.
    /// `max_words` bounds chain depth.
    pub fn reset(
        &mut self, dict: &Dictionary, exclude: &HashSet<String>, entries: &Rc<[SubsetEntry]>, input: Bag,
        include: Bag, max_words: usize,
    ) -> SearchOutcome {
        self.store.clear();
        self.pending = None;
        log::debug!(
            "driver reset: input.sum()={} include.sum()={} max_words={}",
            input.sum(),
            include.sum(),
            max_words
        );

        // Shortfall is checked before the empty-input short-circuit: an
        // empty input with a non-empty include is itself a shortfall
        // (every letter of the include is missing), not an empty result.
        let deficit = input.sub(&include);
        if deficit.has_shortfall() {
            self.search = None;
            self.finished = true;
            let missing = deficit.clamp_nonneg();
            log::debug!("include exceeds input; shortfall sum={}", missing.sum());
            let suggestions = suggest_for_shortfall(dict, exclude, missing, max_words);
            return SearchOutcome::Shortfall { missing, suggestions };
        }

        if input.is_empty() {
            self.search = None;
            self.finished = true;
            return SearchOutcome::Empty;
        }

        self.search = Some(Search::new(Rc::clone(entries), input, include, max_words));
        self.finished = false;
        SearchOutcome::Searching
    }

    /// Run up to `budget` units of work (one unit = one search-tree node
    /// visited, or one expanded phrase emitted). Returns `true` once the
    /// whole query has been fully enumerated.
    pub fn advance(&mut self, entries: &Rc<[SubsetEntry]>, budget: usize) -> bool {
        if self.finished {
            return true;
        }
        let mut remaining = budget;
        while remaining > 0 {
            if let Some((_, expander)) = self.pending.as_mut() {
                match expander.next_phrase() {
                    Some(words) => {
                        self.store.records.push(ResultRecord { words });
                        remaining -= 1;
                        continue;
                    }
                    None => {
                        self.pending = None;
                        continue;
                    }
                }
            }

            let Some(search) = self.search.as_mut() else {
                self.finished = true;
                return true;
            };
            match search.step() {
                StepOutcome::Found(chain) => {
                    self.pending = Some((Rc::clone(entries), Expander::new(entries, &chain)));
                    remaining -= 1;
                }
                StepOutcome::Continue => {
                    remaining -= 1;
                }
                StepOutcome::Done => {
                    self.finished = true;
                    log::trace!("search exhausted: {} results emitted", self.store.records.len());
                    return true;
                }
            }
        }
        false
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Non-incremental helper backing shortfall mode: exhaustively searches
/// for phrases matching `missing` and returns up to
/// `SHORTFALL_SUGGESTION_LIMIT` of them. Reuses the same search and
/// expansion machinery as the main incremental driver rather than a
/// second implementation.
fn suggest_for_shortfall(
    dict: &Dictionary, exclude: &HashSet<String>, missing: Bag, max_words: usize,
) -> Vec<Vec<WordId>> {
    if missing.is_empty() {
        return Vec::new();
    }
    let entries = build_entries(dict, exclude);
    let mut search = Search::new(Rc::clone(&entries), missing, Bag::EMPTY, max_words);
    let mut out = Vec::new();
    'outer: loop {
        match search.step() {
            StepOutcome::Found(chain) => {
                let mut expander = Expander::new(&entries, &chain);
                while let Some(words) = expander.next_phrase() {
                    out.push(words);
                    if out.len() >= SHORTFALL_SUGGESTION_LIMIT {
                        break 'outer;
                    }
                }
            }
            StepOutcome::Continue => continue,
            StepOutcome::Done => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Dictionary {
        let mut dict = Dictionary::new(false);
        for w in ["listen", "silent", "tinsel", "cat", "act", "tac", "dog"] {
            dict.insert(w);
        }
        dict
    }

    #[test]
    fn empty_input_reports_empty() {
        let dict = fixture();
        let exclude = HashSet::new();
        let entries = build_entries(&dict, &exclude);
        let mut driver = Driver::new();
        let outcome = driver.reset(&dict, &exclude, &entries, Bag::EMPTY, Bag::EMPTY, 6);
        assert!(matches!(outcome, SearchOutcome::Empty));
        assert!(driver.advance(&entries, 100));
    }

    #[test]
    fn shortfall_when_include_exceeds_input() {
        let dict = fixture();
        let exclude = HashSet::new();
        let entries = build_entries(&dict, &exclude);
        let mut driver = Driver::new();
        let input = Bag::from_bytes(b"cat").unwrap();
        let include = Bag::from_bytes(b"cats").unwrap();
        let outcome = driver.reset(&dict, &exclude, &entries, input, include, 6);
        match outcome {
            SearchOutcome::Shortfall { missing, .. } => {
                assert_eq!(missing, Bag::from_bytes(b"s").unwrap());
            }
            _ => panic!("expected shortfall"),
        }
    }

    #[test]
    fn empty_input_with_include_is_shortfall_not_empty() {
        // spec.md §8: `input=""`, `include="cat"` => shortfall (missing
        // 1xa, 1xc, 1xt), not `SearchOutcome::Empty`. The empty-input
        // check must not short-circuit the shortfall check.
        let dict = fixture();
        let exclude = HashSet::new();
        let entries = build_entries(&dict, &exclude);
        let mut driver = Driver::new();
        let include = Bag::from_bytes(b"cat").unwrap();
        let outcome = driver.reset(&dict, &exclude, &entries, Bag::EMPTY, include, 6);
        match outcome {
            SearchOutcome::Shortfall { missing, .. } => {
                assert_eq!(missing, Bag::from_bytes(b"cat").unwrap());
            }
            other => panic!("expected shortfall, got {other:?}"),
        }
    }

    #[test]
    fn advance_streams_results_to_completion() {
        let dict = fixture();
        let exclude = HashSet::new();
        let entries = build_entries(&dict, &exclude);
        let mut driver = Driver::new();
        let input = Bag::from_bytes(b"catdog").unwrap();
        driver.reset(&dict, &exclude, &entries, input, Bag::EMPTY, 6);
        let mut iterations = 0;
        while !driver.advance(&entries, 1) {
            iterations += 1;
            assert!(iterations < 10_000, "driver never finished");
        }
        assert!(!driver.store.records.is_empty());
    }
}
