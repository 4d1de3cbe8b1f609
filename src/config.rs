//! Configuration and CLI surface (excluding the query itself, which the
//! interactive modes read from their own input fields).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Where to look for a dictionary file if none is given explicitly.
static DEFAULT_DICT_PATH: LazyLock<PathBuf> = LazyLock::new(|| PathBuf::from("data/words.txt"));

/// Top-level CLI options.
///
/// With no subcommand and no positional input, launches the live
/// terminal UI. A positional `input` runs a single one-shot query and
/// prints every result to stdout.
#[derive(Debug, Parser)]
#[clap(max_term_width = 80)]
pub struct Options {
    #[command(subcommand)]
    pub mode: Option<Mode>,

    /// Dictionary file containing one word per line as plain text.
    #[clap(short = 'd', long = "dict", name = "PATH", default_value = DEFAULT_DICT_PATH.as_os_str())]
    pub dict_file_path: PathBuf,

    /// Accept uppercase words at index time, which otherwise are
    /// rejected as likely proper names.
    #[clap(short = 'u', long = "upper")]
    pub upper: bool,

    /// Print internal step counts and timing to stderr.
    #[clap(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Letters available to use. Omit to launch the live UI.
    pub input: Option<String>,

    /// Letters that must appear in every result.
    pub include: Option<String>,

    /// Space-separated words to exclude from every result.
    pub exclude: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Launch the interactive terminal UI (the default when no
    /// subcommand and no positional input are given).
    Live,
    /// Read one query per line from stdin (`input | include | exclude`,
    /// `|`-separated, trailing fields optional); print up to 20 results
    /// per query.
    Repl,
    /// List dictionary equivalence classes with at least `min` words,
    /// largest classes first.
    Groups {
        #[clap(default_value = "2")]
        min: usize,
    },
}
