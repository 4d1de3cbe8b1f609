//! Command-line entry point: dispatches to the live terminal UI, the
//! REPL, batch group listing, or a single one-shot query.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use clap::Parser;

use anagram_live::bag::Bag;
use anagram_live::config::{Mode, Options};
use anagram_live::dictionary::Dictionary;
use anagram_live::driver::{Driver, SearchOutcome};
use anagram_live::enumerator::build_entries;
use anagram_live::error::Result;
use anagram_live::io::load_dictionary;

mod ui;

fn main() -> Result<()> {
    let opts = Options::parse();

    // `--verbose` raises the default log level; `RUST_LOG` always wins.
    let mut logger = env_logger::Builder::from_default_env();
    if opts.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let dict = load_dictionary(&opts.dict_file_path, opts.upper)?;
    log::info!("dictionary: {} words loaded from {:?}", dict.len(), opts.dict_file_path);
    if opts.verbose {
        eprintln!("dictionary: {} words loaded from {:?}", dict.len(), opts.dict_file_path);
    }

    match (&opts.mode, &opts.input) {
        (Some(Mode::Groups { min }), _) => run_groups(&dict, *min),
        (Some(Mode::Repl), _) => run_repl(&dict),
        (Some(Mode::Live), _) | (None, None) => ui::run(dict),
        (None, Some(input)) => {
            run_one_shot(&dict, input, opts.include.as_deref(), opts.exclude.as_deref(), None)
        }
    }
}

fn parse_exclude(spec: Option<&str>) -> HashSet<String> {
    spec.map(|s| s.split_whitespace().map(str::to_string).collect()).unwrap_or_default()
}

/// Run one query to completion and print its results. `max_results`
/// caps how many are printed (the REPL's "up to 20 results per query";
/// the one-shot CLI form passes `None` to print every result).
fn run_one_shot(
    dict: &Dictionary, input: &str, include: Option<&str>, exclude: Option<&str>, max_results: Option<usize>,
) -> Result<()> {
    let input_bag = Bag::from_bytes(input.as_bytes()).unwrap_or(Bag::EMPTY);
    let include_bag = include.and_then(|s| Bag::from_bytes(s.as_bytes())).unwrap_or(Bag::EMPTY);
    let exclude_set = parse_exclude(exclude);
    let entries = build_entries(dict, &exclude_set);
    // A solution can never need more words than there are letters left
    // to cover once the include is subtracted out (spec.md §3's
    // `chain.len() <= sum(target)`), not the token count of `input`.
    let max_words = input_bag.sub(&include_bag).clamp_nonneg().sum().max(1) as usize;

    let mut driver = Driver::new();
    match driver.reset(dict, &exclude_set, &entries, input_bag, include_bag, max_words) {
        SearchOutcome::Empty => println!("(empty input)"),
        SearchOutcome::Shortfall { missing, suggestions } => {
            println!("include exceeds input; missing letters sum to {}", missing.sum());
            for phrase in suggestions {
                println!("  possible addition: {}", render_phrase(dict, "", &phrase));
            }
        }
        SearchOutcome::Searching => {
            while !driver.advance(&entries, 4096) {}
            let records = driver.store.records.iter().take(max_results.unwrap_or(usize::MAX));
            for record in records {
                println!("{}", render_phrase(dict, include.unwrap_or(""), &record.words));
            }
        }
    }
    Ok(())
}

fn run_groups(dict: &Dictionary, min: usize) {
    let mut classes: Vec<_> = dict.classes().filter(|c| c.word_ids.len() >= min).collect();
    classes.sort_by_key(|c| std::cmp::Reverse(c.word_ids.len()));
    for class in classes {
        let words: Vec<&str> = class.word_ids.iter().map(|&id| dict.word(id)).collect();
        println!("{}", words.join(", "));
    }
}

/// Matches the shortfall suggestion cap in `driver.rs` (spec.md §4.6);
/// the REPL surfaces the same "up to 20" limit for ordinary results.
const REPL_RESULT_LIMIT: usize = 20;

fn run_repl(dict: &Dictionary) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(3, '|').map(str::trim);
        let input = parts.next().unwrap_or("");
        let include = parts.next().filter(|s| !s.is_empty());
        let exclude = parts.next().filter(|s| !s.is_empty());
        run_one_shot(dict, input, include, exclude, Some(REPL_RESULT_LIMIT))?;
    }
    Ok(())
}

/// Render one result record, prefixed by the verbatim include string per
/// the result-expander contract (the include is preserved as typed,
/// capitalization and all, not re-derived from the dictionary).
fn render_phrase(dict: &Dictionary, include: &str, words: &[u32]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(words.len() + 1);
    if !include.is_empty() {
        parts.push(include);
    }
    parts.extend(words.iter().map(|&id| dict.word(id)));
    parts.join(" ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }
}
