//! quizmark - inline quizzes for static documentation sites
//!
//! quizmark provides:
//! - Quiz tag parsing and HTML rendering for markdown pages
//! - Per-page opt-out through front matter (`quiz: disable`)
//! - Stylesheet/script injection shared by every quiz page
//! - Build, list and lint commands over a docs tree
//! - Unified report format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;

mod assets;
mod backends;
mod cli;
mod core;
mod flows;
mod page;
mod quiz;

fn init_logging(cli: &cli::Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(&cli);
    cli::run(cli)
}
