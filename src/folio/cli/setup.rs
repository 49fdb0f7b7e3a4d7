use clap::{Parser, Subcommand};
use folio::prefs::FontSize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    bin_name = "folio",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Read books in the terminal, with bookmarks and resume", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json and reading state
    #[arg(long, global = true, env = "FOLIO_DATA_DIR", value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Book to read (.md or .json); overrides the configured book
    #[arg(long, global = true, env = "FOLIO_BOOK", value_name = "FILE", help_heading = "Options")]
    pub book: Option<PathBuf>,

    /// Log navigation and persistence details to stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show the table of contents (default)
    #[command(alias = "contents")]
    Toc {
        /// Only list bookmarked sections
        #[arg(short, long)]
        bookmarks: bool,
    },

    /// List bookmarked sections
    Bookmarks,

    /// Open a section: "n.m" (chapter n, section m), "k" (k-th section) or a section id
    #[command(alias = "open")]
    Read {
        locator: String,

        /// Reading size: small, normal, large or xl
        #[arg(short, long)]
        size: Option<FontSize>,

        /// Highlight paragraph N (1-based)
        #[arg(long, value_name = "N")]
        highlight: Option<usize>,

        /// Show the size picker
        #[arg(long)]
        sizes: bool,
    },

    /// Step to the next section
    #[command(alias = "n")]
    Next,

    /// Step to the previous section
    #[command(alias = "p")]
    Prev,

    /// Reopen the last-read section
    #[command(alias = "c")]
    Continue,

    /// Toggle a bookmark on a section (default: the last-read one)
    #[command(alias = "b")]
    Bookmark { locator: Option<String> },

    /// Interactive reading session
    Session,

    /// Get or set configuration (keys: font-size, book)
    Config {
        key: Option<String>,
        value: Option<String>,

        /// Reset the key to its default
        #[arg(long, conflicts_with = "value")]
        unset: bool,
    },
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or this
/// crate's debug events with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "warn,folio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
