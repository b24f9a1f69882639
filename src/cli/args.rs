//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Translate XML configuration descriptions into a line-oriented configuration language
#[derive(Parser, Debug)]
#[command(name = "xml2conf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Source XML document
    #[arg(short, long, required = true, value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Destination for the translated configuration
    #[arg(short, long, required = true, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Config file (layered on top of the global config)
    #[arg(short, long, global = true, env = "XML2CONF_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Write to the global config file instead of stdout
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
