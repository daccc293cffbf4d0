//! Petrona - content schema checks, nav highlighting and theme config
//! for a static blog.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod logger;
mod nav;
mod theme;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.common().verbose);

    let config = SiteConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Check { args } => cli::check::run_check(args, &config),
        Commands::Highlight { args } => cli::highlight::run_highlight(args, &config),
        Commands::Theme { args } => cli::theme::run_theme(args, &config),
    }
}
