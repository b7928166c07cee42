use clap::{ArgAction, Parser};
use std::ffi::OsString;

#[derive(Clone, Debug, Parser)]
#[command(name = "pathlook", version = env!("CARGO_PKG_VERSION"), about = "Locate executables on the search path", long_about = None)]
pub struct App {
    /// Command names or paths to look up
    #[arg(required = true, value_name = "COMMAND")]
    pub commands: Vec<String>,

    /// Print every match instead of only the first
    #[arg(short, long)]
    pub all: bool,

    /// Print nothing, only report through the exit status
    #[arg(short, long)]
    pub silent: bool,

    /// Directories to search, joined by the platform path separator
    #[arg(long, env = "PATH", hide_env_values = true)]
    pub path: Option<OsString>,

    /// Extensions to try, joined by the platform path separator
    #[arg(long, env = "PATHEXT", hide_env_values = true)]
    pub pathext: Option<OsString>,

    /// Log search details to stderr (-vv for every probe)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
