use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    #[command(subcommand)]
    pub(crate) command: VeerCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum VeerCommand {
    /// Track a new tagged variant of an application
    Track {
        #[command(subcommand)]
        kind: TrackKind,
    },
    /// Point the launch entry of an app at a tag: <app>[@<tag>].
    /// Without a tag, reinstalls the currently active one
    Use {
        app_spec: String,
    },
    /// List tracked applications and tags
    List {
        /// Restrict to one application
        name: Option<String>,
        /// Show every tag, not just the active one
        #[clap(short, long)]
        all: bool,
    },
    /// Remove one tracked tag: <app>@<tag>
    Untrack {
        app_spec: String,
    },
    /// Unset the active tag of an app and remove its launch entry
    Unlink {
        name: String,
    },
    /// Show the launch entry path and resolved target of an app
    Which {
        name: String,
    },
    /// Dump the registry document
    Config {
        /// Output as JSON instead of TOML
        #[clap(short, long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum TrackKind {
    /// Track a file: <app>[@<tag>] <path>. The tag is derived from the
    /// file's content hash when omitted
    Path {
        app_spec: String,
        path: PathBuf,
        /// Copy the file into managed storage and track the copy
        #[clap(short, long)]
        copy: bool,
    },
    /// Track a shell command: <app>@<tag> <command>
    Command {
        app_spec: String,
        command: String,
        /// Working directory the command runs in
        #[clap(short = 'w', long)]
        working_directory: Option<PathBuf>,
    },
}
