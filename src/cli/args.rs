//! Clap argument types.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use codewiki::output::{JsonRenderer, TerminalRenderer, ViewRenderer};

/// Browse AI-generated code documentation from a CodeWiki server.
#[derive(Parser, Debug)]
#[command(name = "codewiki", version = codewiki::constants::VERSION)]
pub struct Cli {
    /// Backend origin, e.g. http://127.0.0.1:5000 (overrides config and CODEWIKI_SERVER).
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Output format for rendered views.
    #[arg(long, global = true, default_value = "terminal")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Show recently opened repositories.
    List,

    /// Filter recent repositories by name or path.
    Search {
        /// Case-insensitive substring; empty matches everything.
        #[arg(default_value = "")]
        query: String,
    },

    /// Analyze a repository and add it to the list.
    Add {
        #[command(subcommand)]
        source: AddSource,
    },

    /// Remove a repository from the list and ask the server to forget it.
    Remove {
        /// Repository id.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },

    /// Open a repository: file tree and AI review.
    Open {
        /// Repository id.
        id: String,
    },

    /// Show the AI review of a repository.
    Review {
        /// Repository id.
        id: String,
    },

    /// Show the documentation page of one file.
    File {
        /// Repository id.
        id: String,

        /// File path as listed by `open`.
        path: String,
    },

    /// Show the repository graph (SVG from Graphviz).
    Graph {
        /// Repository id.
        id: String,

        /// Save the SVG to this file instead of printing it.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Share a link to the CodeWiki server.
    Share,

    /// Manage the recent-repository list.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Print version and build information.
    Version,
}

/// Where a repository to add comes from.
#[derive(clap::Subcommand, Debug)]
pub enum AddSource {
    /// Upload every text file under a local folder.
    Local {
        /// Folder to analyze.
        dir: PathBuf,
    },

    /// Let the server clone and analyze a git repository.
    Git {
        /// Clone URL, e.g. https://github.com/user/repo.git
        url: String,
    },
}

/// Recent-list management subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum CacheAction {
    /// Print where the recent list is stored.
    Path,
    /// Forget every recent repository (server data is untouched).
    Clear,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn ViewRenderer> {
        match self {
            OutputFormat::Terminal => Box::new(TerminalRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}
