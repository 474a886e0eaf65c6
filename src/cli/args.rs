//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Inspect generated documentation navigation trees
#[derive(Parser, Debug)]
#[command(name = "navtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Turn debugging information on (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Do not load deferred child scripts
    #[arg(long, global = true)]
    pub no_resolve: bool,

    /// Fail when a deferred child script is missing
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the navigation tree
    Tree {
        /// Navigation script (.js) or document (.json)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List nodes in pre-order, indented by depth
    Flat {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Deepest level to print (0 = top level)
        #[arg(short, long)]
        max_depth: Option<usize>,
        /// Spaces per level
        #[arg(short, long)]
        indent: Option<usize>,
    },

    /// Find the first node linking to a target
    Find {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Link target, e.g. annotated.html or index.html#autotoc_md7
        target: String,
    },

    /// Show the page index, or the index chunk holding a page
    Index {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Page to look up
        #[arg(short, long)]
        page: Option<String>,
    },

    /// Render the tree as a nested HTML list
    Html {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Export the tree and index as JSON
    Export {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show effective settings
    Config {
        /// Directory whose local navtree.toml is applied
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Input file of commands that load a tree.
    pub fn input(&self) -> Option<&PathBuf> {
        match self {
            Commands::Tree { file }
            | Commands::Flat { file, .. }
            | Commands::Find { file, .. }
            | Commands::Index { file, .. }
            | Commands::Html { file }
            | Commands::Export { file } => Some(file),
            Commands::Config { .. } | Commands::Completion { .. } => None,
        }
    }
}
