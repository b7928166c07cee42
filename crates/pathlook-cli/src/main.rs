use anyhow::{Context, Result};
use clap::Parser;
use pathlook::{Resolver, TargetResolver, default_search_paths, extension_set};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::App;

mod cli;

fn main() -> ExitCode {
    let app = App::parse();
    init_tracing(app.verbose);

    match run(&app) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("pathlook: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether every command was found.
fn run(app: &App) -> Result<bool> {
    let resolver = Resolver::new(default_search_paths(app.path.as_deref()))
        .with_extensions(extension_set(app.pathext.as_deref()));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_found = true;

    for cmd in &app.commands {
        let found = lookup(&resolver, cmd, app.all && !app.silent);
        if found.is_empty() {
            debug!(cmd = %cmd, "not found");
            all_found = false;
            continue;
        }
        if app.silent {
            continue;
        }
        for path in found {
            writeln!(out, "{}", path.display()).context("failed to write to stdout")?;
        }
    }

    out.flush().context("failed to flush stdout")?;
    Ok(all_found)
}

fn lookup<R: TargetResolver>(resolver: R, cmd: &str, all: bool) -> Vec<PathBuf> {
    if all {
        resolver.resolve_all(cmd)
    } else {
        resolver.resolve(cmd).into_iter().collect()
    }
}
