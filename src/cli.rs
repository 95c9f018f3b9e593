// SPDX-License-Identifier: MIT
//
// Command-line definitions (clap derive).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tl_theme::Mode;

/// Per-item color themes derived from seed colors in HCT space
#[derive(Debug, Parser)]
#[command(name = "tonelist", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log engine decisions (default seeds, gamut reductions) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned tables, with color swatches on a terminal
    #[default]
    Text,
    /// JSON on stdout
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive the full role scheme from seed colors
    Scheme {
        #[command(flatten)]
        seeds: SeedArgs,

        /// Dark scheme (default: the state file's mode, else light)
        #[arg(long, conflicts_with = "light")]
        dark: bool,

        /// Light scheme
        #[arg(long)]
        light: bool,

        /// Read seeds and mode from this state file
        #[arg(long, value_name = "FILE", env = "TONELIST_STATE")]
        state: Option<PathBuf>,

        /// Only print this role, by key (repeatable), e.g. onPrimary
        #[arg(long = "role", value_name = "KEY")]
        roles: Vec<String>,
    },
    /// Show every tone stop of the six core palettes
    Palette {
        /// Primary seed, e.g. "#6750A4"
        hex: String,

        /// Keep the seed's own chroma instead of the Material floor
        #[arg(long)]
        fidelity: bool,
    },
    /// Convert a hex color to hue, chroma, tone
    Hct {
        /// Color as "#rrggbb"
        hex: String,
    },
    /// Convert hue, chroma, tone to a hex color
    #[command(allow_negative_numbers = true)]
    Hex {
        /// Hue in degrees (wrapped into 0–360)
        hue: f64,
        /// Chroma (reduced to what sRGB can show)
        chroma: f64,
        /// Tone, 0–100
        tone: f64,
    },
    /// Manage saved themes in a state file
    Theme {
        /// State file to read and update
        #[arg(long, value_name = "FILE", env = "TONELIST_STATE", global = true)]
        state: Option<PathBuf>,

        #[command(subcommand)]
        action: ThemeAction,
    },
    /// List builtin seed presets
    Presets,
}

/// Seed colors. Flags override the preset or state file slot by slot.
#[derive(Debug, Default, Args)]
pub struct SeedArgs {
    /// Primary seed
    #[arg(long, value_name = "HEX")]
    pub primary: Option<String>,

    /// Secondary seed
    #[arg(long, value_name = "HEX")]
    pub secondary: Option<String>,

    /// Tertiary seed
    #[arg(long, value_name = "HEX")]
    pub tertiary: Option<String>,

    /// Error seed
    #[arg(long, value_name = "HEX")]
    pub error: Option<String>,

    /// Neutral seed (backgrounds, surfaces, outlines)
    #[arg(long, value_name = "HEX")]
    pub neutral: Option<String>,

    /// Start from a builtin preset (see `tonelist presets`)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Keep seeded chroma as is instead of raising accents to 48
    #[arg(long)]
    pub fidelity: bool,
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// List saved themes
    List,
    /// Save the current scheme as a new theme
    Save {
        /// Theme name (default: "Theme N")
        #[arg(long)]
        name: Option<String>,

        /// Skip saving when an identical theme already exists
        #[arg(long)]
        dedup: bool,

        #[command(flatten)]
        seeds: SeedArgs,
    },
    /// Replace a saved theme with the current scheme
    Update {
        /// Name of the theme to replace
        name: String,

        /// New name (default: keep the old one)
        #[arg(long)]
        rename: Option<String>,

        #[command(flatten)]
        seeds: SeedArgs,
    },
    /// Delete the saved theme at INDEX (as shown by `theme list`)
    Delete { index: usize },
    /// Make a saved theme's seeds the current ones
    Use { name: String },
    /// Set the state file's light/dark mode, or flip it when omitted
    Mode {
        #[arg(value_name = "light|dark")]
        mode: Option<Mode>,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
