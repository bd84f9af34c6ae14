//! mda-eqnum: number equations in a document and print the rewritten tree as JSON
//!
//! Run with: cargo run --bin mda-eqnum --features cli -- --to latex paper.mda

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use mda_eqnum::{parse, resolve, Document, ResolveConfig};
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mda-eqnum")]
#[command(version)]
#[command(about = "Number labeled equations and resolve references to them", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided or `-`)
    input: Option<String>,

    /// Output format: latex, html, docx, or any other name for plain output
    #[arg(short = 't', long = "to", default_value = "html")]
    to: String,

    /// How the input is written
    #[arg(short, long, value_enum, default_value_t = InputKind::Markdown)]
    from: InputKind,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log each numbered equation and resolved reference
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum InputKind {
    /// Markdown source with optional TOML front matter
    Markdown,
    /// A document tree serialized as JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn failure_message(error: &mda_eqnum::Error) -> String {
    format!("mda-eqnum: {}", error)
}

fn run(cli: &Cli) -> mda_eqnum::Result<()> {
    let source = read_input(cli.input.as_deref())?;

    let document = match cli.from {
        InputKind::Markdown => parse(&source)?,
        InputKind::Json => serde_json::from_str::<Document>(&source)?,
    };

    let config = ResolveConfig::new(cli.to.as_str());
    let resolved = resolve(document, &config);
    log::info!(
        "numbered {} equation(s) for {} output",
        resolved.identifiers.len(),
        config.format
    );

    let mut rendered = if cli.pretty {
        serde_json::to_string_pretty(&resolved.document)?
    } else {
        serde_json::to_string(&resolved.document)?
    };
    rendered.push('\n');

    match &cli.output {
        Some(path) => fs::write(path, rendered)?,
        None => io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) if path != "-" => fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
