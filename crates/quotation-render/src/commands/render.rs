/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Reads a template and a quotation from JSON files, composes them and
//! writes the document as standalone HTML (for print or PDF conversion)
//! or as JSON (the structure the interactive preview consumes).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::{debug, info};

use quotation_template::{Composer, Quotation, RenderConfig, Template};

/// Output formats for the render command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    /// Template JSON file
    pub template: PathBuf,
    /// Quotation JSON file
    pub quotation: PathBuf,
    /// Output format
    pub format: OutputFormat,
    /// Output file path; stdout when absent
    pub output: Option<PathBuf>,
    /// Render configuration file
    pub config: Option<PathBuf>,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let rendered = render(&args)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Compose the inputs named in `args` and serialize the document.
pub fn render(args: &RenderArgs) -> Result<String> {
    let config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("Failed to load render configuration {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let template = Template::from_json(&read_input(&args.template)?)
        .with_context(|| format!("Failed to parse template {}", args.template.display()))?;
    let quotation = Quotation::from_json(&read_input(&args.quotation)?)
        .with_context(|| format!("Failed to parse quotation {}", args.quotation.display()))?;

    debug!(
        template = %template.name,
        quotation = %quotation.quotation_number,
        "Composing document"
    );
    let document = Composer::new(config).compose(&template, &quotation);
    info!(
        "Rendered {} into {} page(s)",
        document.title,
        document.page_count()
    );

    match args.format {
        OutputFormat::Html => Ok(document.to_html()),
        OutputFormat::Json => document
            .to_json()
            .context("Failed to serialize document"),
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))
}
