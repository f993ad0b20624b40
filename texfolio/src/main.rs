//! texfolio - render LaTeX-flavored notes to sanitized HTML
//!
//! A CLI front end over the texfolio library: renders documents and annex
//! directories, and prints their tables of contents.

#![deny(unsafe_code)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, TocFormat};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use texfolio::html_exporter::{to_html_page, write_annex, write_html_file};
use texfolio::render_config::CONFIG_FILE_NAME;
use texfolio::toc::navigation::filter_items;
use texfolio::walker::{load_part, walk_annex};
use texfolio::{extract_annex_toc, extract_toc, Part, RenderConfig, Renderer, TocItem};

/// Main entry point for the texfolio CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger.init();

    match cli.command {
        Commands::Render {
            input,
            output,
            standalone,
        } => {
            let config = resolve_config(cli.config.as_deref(), &input)?;
            handle_render_command(&input, output.as_deref(), standalone, config)?;
        }

        Commands::Toc {
            inputs,
            annex,
            filter,
            format,
        } => {
            let config = resolve_config(cli.config.as_deref(), &inputs[0])?;
            handle_toc_command(&inputs, annex, filter.as_deref(), format, &config)?;
        }
    }

    Ok(())
}

/// Load the explicit config file, or texfolio.toml next to the input, or defaults
fn resolve_config(explicit: Option<&Path>, input: &Path) -> Result<RenderConfig> {
    if let Some(path) = explicit {
        return RenderConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let dir = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or_else(|| Path::new("."))
    };
    let candidate = dir.join(CONFIG_FILE_NAME);

    if candidate.is_file() {
        log::info!("Using config: {}", candidate.display());
        RenderConfig::load(&candidate)
            .with_context(|| format!("Failed to load config from {}", candidate.display()))
    } else {
        Ok(RenderConfig::default())
    }
}

/// Handle the render command
fn handle_render_command(
    input: &Path,
    output: Option<&Path>,
    standalone: bool,
    config: RenderConfig,
) -> Result<()> {
    let renderer = Renderer::new(config);

    let (title, body, toc) = if input.is_dir() {
        let parts = walk_annex(input)
            .with_context(|| format!("Failed to read annex parts from {}", input.display()))?;
        let rendered = renderer.render_parts(&parts);
        let toc = extract_annex_toc(&parts, renderer.config());
        (directory_title(input), write_annex(&rendered), toc)
    } else {
        let source = read_source(input)?;
        log::info!("Rendering {}", input.display());
        let body = renderer.render(&source);
        let toc = extract_toc(&source, renderer.config());
        (document_title(input), body, toc)
    };

    let html = if standalone {
        to_html_page(&title, &toc, &body)
    } else {
        body
    };

    match output {
        Some(path) => write_html_file(path, &html)
            .with_context(|| format!("Failed to write HTML to {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", html).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Handle the toc command
fn handle_toc_command(
    inputs: &[PathBuf],
    annex: bool,
    filter: Option<&str>,
    format: TocFormat,
    config: &RenderConfig,
) -> Result<()> {
    let items = if annex {
        let parts = collect_parts(inputs)?;
        extract_annex_toc(&parts, config)
    } else {
        let mut items = Vec::new();
        for input in inputs {
            let source = read_source(input)?;
            items.extend(extract_toc(&source, config));
        }
        items
    };

    let shown: Vec<&TocItem> = filter_items(&items, filter.unwrap_or(""));
    log::info!("{} of {} entries shown", shown.len(), items.len());

    let mut stdout = std::io::stdout().lock();
    match format {
        TocFormat::Text => {
            for item in shown {
                let indent = "  ".repeat(usize::from(item.level.saturating_sub(1)));
                writeln!(stdout, "{}{} (#{})", indent, item.label, item.id)?;
            }
        }
        TocFormat::Json => {
            let json = serde_json::to_string_pretty(&shown).context("Failed to serialize TOC")?;
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}

/// Annex parts from directories (walked) and individual part files
fn collect_parts(inputs: &[PathBuf]) -> Result<Vec<Part>> {
    let mut parts = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = walk_annex(input)
                .with_context(|| format!("Failed to read annex parts from {}", input.display()))?;
            parts.extend(found);
        } else {
            let part = load_part(input)
                .with_context(|| format!("Failed to load annex part {}", input.display()))?;
            parts.push(part);
        }
    }
    Ok(parts)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn document_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Document")
        .to_string()
}

fn directory_title(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("Annex")
        .to_string()
}
