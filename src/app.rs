//! Command execution: wires config, fonts, engine and shaper together.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use par_shape_config::Config;
use par_shape_core::{Shaper, ShaperOptions, UnicodeProperties};
use par_shape_fonts::{FontManager, FontManagerOptions, ShapingOptions, TextShaper};

use crate::cli::{Cli, Commands, SegmentsArgs, ShapeArgs};
use crate::debug;
use crate::report::{ShapeReport, segment_report, segments_table};

/// Run a parsed command line and print its output.
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    if cli.log_level.is_none() {
        debug::apply_config_level(config.log_level.to_level_filter());
    }

    let output = match &cli.command {
        Commands::Shape(args) => shape_command(&config, args)?,
        Commands::Segments(args) => segments_command(args)?,
    };
    print!("{}", output);
    Ok(())
}

/// Load the config named on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Shaper limits taken from config.
pub fn shaper_options(config: &Config) -> ShaperOptions {
    ShaperOptions {
        max_fallback_fonts: config.max_fallback_fonts,
        ..ShaperOptions::default()
    }
}

/// Shape the requested range with the system fonts.
pub fn shape_command(config: &Config, args: &ShapeArgs) -> Result<String> {
    let config = config.clone().with_font(args.font.as_deref(), args.size);
    config.validate()?;

    let fonts = Arc::new(FontManager::new(&FontManagerOptions::from_config(&config))?);
    let engine = TextShaper::with_cache_size(Arc::clone(&fonts), config.shape_cache_size)
        .with_options(ShapingOptions::from_config(&config));
    let properties = UnicodeProperties::default();

    let chars: Vec<char> = args.text.chars().collect();
    let shaper = Shaper::new(&chars, &engine, fonts.as_ref(), &properties)
        .with_options(shaper_options(&config));

    let start = args.start.unwrap_or(0);
    let end = args.end.unwrap_or(chars.len());
    let primary = fonts.primary_font();
    let result = shaper
        .shape(&primary, args.direction(), start, end)
        .with_context(|| format!("Failed to shape {:?}", args.text))?;
    log::info!(
        "Shaped {}..{} into {} runs ({} glyphs)",
        start,
        end,
        result.runs().len(),
        result.num_glyphs()
    );

    let report = ShapeReport::new(&chars, &result, &primary);
    if args.json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    } else {
        Ok(report.to_table())
    }
}

/// Describe the segment ranges of the text; needs no fonts.
pub fn segments_command(args: &SegmentsArgs) -> Result<String> {
    let chars: Vec<char> = args.text.chars().collect();
    let segments = segment_report(&chars, &UnicodeProperties::default());
    if args.json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&segments)?))
    } else {
        Ok(segments_table(&segments))
    }
}
