//! CLI logic for the Armillary graph renderer.
//!
//! Reads a TOML graph document, draws its component nodes and writes the
//! result as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use armillary::{ArmillaryError, DiagramBuilder};

/// Run the Armillary CLI application
///
/// # Errors
///
/// Returns `ArmillaryError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed graph documents
/// - Duplicate node ids or unregistered node types
/// - Nodes that fail to draw, with `--strict`
pub fn run(args: &Args) -> Result<(), ArmillaryError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config).with_strict(args.strict);
    let document = builder.parse(&source)?;
    let mut graph = builder.build_graph(document)?;
    builder.export_svg(&mut graph, &args.output)?;

    info!(output_file = args.output; "Graph rendered");

    Ok(())
}
