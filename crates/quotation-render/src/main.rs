/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Command-line front end for the quotation renderer
 */

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::render::{OutputFormat, RenderArgs};

#[derive(Parser)]
#[command(name = "quotation-render")]
#[command(version)]
#[command(about = "Render quotations through document templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a quotation through a template
    Render {
        /// Template JSON file
        #[arg(short, long)]
        template: PathBuf,

        /// Quotation JSON file
        #[arg(short, long)]
        quotation: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,

        /// Write output to FILE instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML file with render configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the placeholder tokens available in headers, footers and custom sections
    Tokens {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the starter template as JSON
    Sample,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotation_render=info,quotation_template=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            template,
            quotation,
            format,
            output,
            config,
        } => commands::render::execute(RenderArgs {
            template,
            quotation,
            format,
            output,
            config,
        }),
        Commands::Tokens { json } => commands::tokens::execute(json),
        Commands::Sample => commands::sample::execute(),
    }
}
