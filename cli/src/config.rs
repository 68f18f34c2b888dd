//! Command line and environment configuration.

use std::time::Duration;

use clap::{Parser, Subcommand};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Manage to-do items in a remote store")]
pub struct Cli {
    /// Base URL of the remote store
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Give up on a request after this many seconds
    #[arg(long, env = "TODO_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch and print every item
    List,
    /// Create an item
    Add { title: String },
    /// Change the title of an item
    Update { id: String, title: String },
    /// Delete an item after confirmation
    Remove {
        id: String,
        /// Answer "Delete" to the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
