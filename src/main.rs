// SPDX-License-Identifier: MIT
//
// tonelist: derive color themes from seed colors.
//
// This binary wires the two library crates to a command line:
//
//   tl-color → hex ⇄ HCT conversion, gamut solver, contrast
//   tl-theme → core palettes, role schemes, saved themes, state documents
//
// Each invocation flows one way:
//
//   flags / preset / state file → SourceColorSet → CorePaletteSet
//     → RoleColorMap → printer (text or JSON) → stdout
//
// Diagnostics go through `tracing` to stderr so stdout stays parseable.

mod cli;
mod commands;
mod output;

use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// `RUST_LOG` wins when set; otherwise warnings only, or debug with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose)
        .init();
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::handle(cli) {
        eprintln!("tonelist: {e:#}");
        process::exit(1);
    }
}
