//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};
use crate::flows::build::BuildOptions;
use crate::page::QuizPlugin;

/// quizmark - turn inline quiz tags in markdown pages into interactive HTML.
#[derive(Parser, Debug)]
#[command(name = "quizmark")]
#[command(
    author,
    version,
    about,
    long_about = r#"quizmark is a documentation-build filter. It finds quiz blocks in markdown
pages and replaces each one with a self-contained HTML quiz (a form plus a
hidden answer section), then appends the shared quiz stylesheet and script.

Quiz format:
    <?quiz?>
    question: Are you ready?
    answer-correct: Yes!
    answer: No!
    content:
    <h2>Shown once answered correctly</h2>
    <?/quiz?>

A page with `quiz: disable` in its front matter is left untouched.

Reports (build/list/lint) are printed as a ResultSet in the selected format
(default: jsonl).

Examples:
    quizmark render docs/index.md
    quizmark build --scope docs --out site
    quizmark list --format md
    quizmark lint --strict
"#
)]
pub struct Cli {
    /// Root directory for all operations.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
All paths emitted in reports are relative to this root, and positional paths/\n\
scopes are interpreted relative to it."
    )]
    pub root: PathBuf,

    /// Report format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for reports.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw (question excerpts only)"
    )]
    pub format: String,

    /// Directory holding quiz.css and quiz.js to use instead of the bundled ones.
    #[arg(
        long,
        global = true,
        env = "QUIZMARK_ASSETS_DIR",
        value_name = "DIR",
        long_help = "Load quiz.css and quiz.js from DIR instead of the copies bundled in the\n\
binary. If either file cannot be read, the error is logged and pages get no\n\
stylesheet or script at all; the build still succeeds."
    )]
    pub assets_dir: Option<PathBuf>,

    /// Disable colored output (when applicable).
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one page and print the result.
    #[command(
        long_about = "Run one markdown page through the quiz pipeline: replace quiz blocks\n\
with HTML, then append the stylesheet and script.\n\n\
The page text goes to stdout, or to --output. With --output, the page report is\n\
printed to stdout instead.\n\n\
Examples:\n\
  quizmark render docs/index.md\n\
  quizmark render docs/index.md --output site/index.md\n"
    )]
    Render {
        /// Page to render (relative to ROOT unless absolute).
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the rendered page here instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Skip appending the stylesheet and script.
        #[arg(long)]
        no_assets: bool,
    },

    /// Render every markdown page into an output directory.
    #[command(
        long_about = "Discover markdown pages (.md, .markdown) under ROOT (or --scope),\n\
honouring .gitignore and skipping hidden files, and write each rendered page to\n\
the same relative path under --out.\n\n\
Emits one page item per page plus one error item per quiz block that could not\n\
be rendered. Broken quiz blocks are left in the page as written.\n\n\
Examples:\n\
  quizmark build --out site\n\
  quizmark build --scope docs --out site --stats\n"
    )]
    Build {
        /// Limit the build to a subdirectory under ROOT.
        #[arg(long, value_name = "PATH")]
        scope: Option<PathBuf>,

        /// Output directory (relative to ROOT unless absolute).
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        /// Skip appending the stylesheet and script.
        #[arg(long)]
        no_assets: bool,

        /// Print build statistics on stderr.
        #[arg(long)]
        stats: bool,
    },

    /// List quiz blocks found in pages.
    #[command(
        long_about = "Emit one quiz item per quiz block (question excerpt, line range,\n\
answer counts, content hash). Blocks that fail to parse are listed as errors.\n\n\
Examples:\n\
  quizmark list\n\
  quizmark list --scope docs/guide --format md\n"
    )]
    List {
        /// Limit listing to a subdirectory under ROOT.
        #[arg(long, value_name = "PATH")]
        scope: Option<PathBuf>,
    },

    /// Check quiz blocks for structural problems.
    #[command(
        long_about = "Validate quiz marker pairing and block structure (question line,\n\
content marker). Issues are emitted as error items, suitable for CI gating.\n\n\
Examples:\n\
  quizmark lint\n\
  quizmark lint --strict\n"
    )]
    Lint {
        /// Limit linting to a subdirectory under ROOT.
        #[arg(long, value_name = "PATH")]
        scope: Option<PathBuf>,

        /// Exit with failure when any error-severity issue is found.
        #[arg(long)]
        strict: bool,
    },

    /// Print the stylesheet and script appended to pages.
    Assets,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_else(|err: String| {
        log::warn!("{}, falling back to jsonl", err);
        OutputFormat::default()
    });
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let root = cli.root.canonicalize().unwrap_or(cli.root);

    let assets = crate::assets::init(cli.assets_dir.as_deref());
    let plugin = QuizPlugin::new(assets);

    match cli.command {
        Commands::Render {
            file,
            output,
            no_assets,
        } => crate::flows::page::run_render(
            &root,
            &file,
            output.as_deref(),
            !no_assets,
            &plugin,
            render_config,
        ),

        Commands::Build {
            scope,
            out,
            no_assets,
            stats,
        } => crate::flows::build::run_build(
            &root,
            &plugin,
            BuildOptions {
                scope,
                out,
                with_assets: !no_assets,
            },
            stats,
            render_config,
        ),

        Commands::List { scope } => {
            crate::quiz::api::run_list(&root, scope.as_deref(), render_config)
        }

        Commands::Lint { scope, strict } => {
            let clean = crate::quiz::lint::run_lint(&root, scope.as_deref(), render_config)?;
            anyhow::ensure!(clean || !strict, "Lint found quiz errors");
            Ok(())
        }

        Commands::Assets => {
            if !assets.is_empty() {
                println!("{}", assets.snippet());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_args() {
        let cli = Cli::try_parse_from([
            "quizmark", "--root", "/tmp/x", "build", "--scope", "docs", "--out", "site", "--stats",
        ])
        .unwrap();
        match cli.command {
            Commands::Build {
                scope, out, stats, ..
            } => {
                assert_eq!(scope, Some(PathBuf::from("docs")));
                assert_eq!(out, PathBuf::from("site"));
                assert!(stats);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["quizmark", "-q", "-v", "assets"]).is_err());
    }
}
