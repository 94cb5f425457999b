//! Command-line interface for par-shape.
//!
//! `shape` runs the full segment / shape / fallback pipeline over a string
//! with the system fonts; `segments` only shows how the string is split into
//! runs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use par_shape_core::TextDirection;

/// par-shape - Unicode text shaping with font fallback
#[derive(Parser, Debug)]
#[command(name = "par-shape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/par-shape/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shape text and report the glyph runs and fonts used
    Shape(ShapeArgs),

    /// Show how text is split into script / emoji runs
    Segments(SegmentsArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ShapeArgs {
    /// Text to shape
    pub text: String,

    /// Primary font family (overrides config)
    #[arg(long, value_name = "FAMILY")]
    pub font: Option<String>,

    /// Font size in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    pub size: Option<f32>,

    /// Shape as right-to-left text
    #[arg(long)]
    pub rtl: bool,

    /// First character to shape (codepoint index)
    #[arg(long, value_name = "N")]
    pub start: Option<usize>,

    /// End of the shaped range (codepoint index, exclusive)
    #[arg(long, value_name = "N")]
    pub end: Option<usize>,

    /// Print a JSON report instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ShapeArgs {
    pub fn direction(&self) -> TextDirection {
        if self.rtl {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SegmentsArgs {
    /// Text to segment
    pub text: String,

    /// Print a JSON array instead of a table
    #[arg(long)]
    pub json: bool,
}
