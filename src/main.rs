use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use pastemark::{Clipboard, CommandClipboard, Config, Converter, InputWatcher, Preview};

#[derive(Parser)]
#[command(name = "pastemark")]
#[command(about = "Convert Markdown into inline-styled HTML for pasting into rich-text editors")]
struct Cli {
    /// Input Markdown file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Write the fragment to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, default_value = "pastemark.toml")]
    config: PathBuf,

    /// Wrap the fragment in a standalone preview page
    #[arg(long)]
    page: bool,

    /// Copy the fragment to the clipboard as HTML
    #[arg(long)]
    copy: bool,

    /// Re-convert whenever the input file changes
    #[arg(short, long, requires = "input")]
    watch: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config);

    let converter = match Converter::new(&config) {
        Ok(converter) => converter,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut preview = Preview::new(converter);

    let input = cli.input.as_deref().filter(|p| *p != Path::new("-"));

    let markdown = match read_input(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", display_input(input), e);
            std::process::exit(1);
        }
    };

    if !preview.update(&markdown) {
        eprintln!("Error: conversion failed");
        std::process::exit(1);
    }
    emit(&cli, &preview);

    if cli.copy {
        copy(&config, preview.fragment());
    }

    if cli.watch
        && let Some(path) = input
    {
        watch(path, &cli, &config, &mut preview);
    }
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn display_input(input: Option<&Path>) -> String {
    input.map_or_else(|| "stdin".to_string(), |p| p.display().to_string())
}

/// Write the current fragment (or page) to the output file or stdout.
fn emit(cli: &Cli, preview: &Preview) {
    let html = if cli.page {
        preview.page()
    } else {
        preview.fragment().to_string()
    };

    match &cli.output {
        Some(output) => {
            if let Err(e) = fs::write(output, html) {
                eprintln!("Error writing {}: {}", output.display(), e);
                std::process::exit(1);
            }
            eprintln!("Created {}", output.display());
        }
        None => println!("{}", html),
    }
}

fn copy(config: &Config, fragment: &str) {
    let result = CommandClipboard::from_config(&config.clipboard)
        .and_then(|mut clipboard| clipboard.write_html(fragment));
    match result {
        Ok(()) => eprintln!("Copied to clipboard"),
        Err(e) => {
            eprintln!("Copy failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Re-run the whole pipeline every time `path` changes. A failed run leaves
/// the last good output in place.
fn watch(path: &Path, cli: &Cli, config: &Config, preview: &mut Preview) {
    let watcher = match InputWatcher::new(path) {
        Ok(watcher) => watcher,
        Err(e) => {
            eprintln!("Error watching {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };
    eprintln!("Watching {} (Ctrl-C to stop)", path.display());

    while watcher.wait_for_change() {
        let markdown = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("could not read {}: {}", path.display(), e);
                continue;
            }
        };
        if preview.update(&markdown) {
            emit(cli, preview);
            if cli.copy {
                copy(config, preview.fragment());
            }
        }
    }
}
