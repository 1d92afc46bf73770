//! CLI Module
//!
//! Command-line interface for generating, checking and exporting clips.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Clipforge - build device-compliant sound clips
#[derive(Parser, Debug)]
#[command(name = "clipforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in presets
    #[command(name = "presets")]
    Presets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a preset to a WAV file without trimming
    #[command(name = "generate")]
    Generate {
        /// Preset id (unknown ids fall back to the default preset)
        preset: String,

        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 44100)]
        rate: u32,

        /// Seed for presets that use noise
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Trim, shape and export a compliant clip
    #[command(name = "export")]
    Export(ExportArgs),

    /// Check a trim range against the device rules
    #[command(name = "validate")]
    Validate {
        /// Range start in seconds
        #[arg(long)]
        start: f64,

        /// Range end in seconds
        #[arg(long)]
        end: f64,

        /// Device profile JSON
        #[arg(long)]
        constraints: Option<PathBuf>,
    },

    /// Print the header of a canonical WAV file
    #[command(name = "info")]
    Info {
        /// Path to the WAV file
        path: PathBuf,
    },
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Preset id to use as the source
    #[arg(long, conflicts_with = "input")]
    pub preset: Option<String>,

    /// WAV file to use as the source
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output WAV path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Range start in seconds
    #[arg(long, default_value_t = 0.0)]
    pub start: f64,

    /// Range end in seconds (defaults to the end of the source)
    #[arg(long)]
    pub end: Option<f64>,

    /// Fade-in length in seconds
    #[arg(long)]
    pub fade_in: Option<f64>,

    /// Fade-out length in seconds
    #[arg(long)]
    pub fade_out: Option<f64>,

    /// Volume in [0, 1]
    #[arg(long)]
    pub volume: Option<f32>,

    /// Normalize the peak to this ceiling
    #[arg(long)]
    pub normalize: Option<f32>,

    /// Effect settings JSON (flags override its fields)
    #[arg(long)]
    pub effects: Option<PathBuf>,

    /// Device profile JSON
    #[arg(long)]
    pub constraints: Option<PathBuf>,

    /// Seed for presets that use noise
    #[arg(long)]
    pub seed: Option<u64>,
}
