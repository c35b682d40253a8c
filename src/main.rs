use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use report_md::Config;

#[derive(Parser)]
#[command(name = "report-md")]
#[command(about = "Render AI-generated report text to HTML, Typst, PDF or JSON")]
struct Cli {
    /// Input report file, or `-` for stdin
    input: PathBuf,

    /// Output file (text formats default to stdout, PDF to the input name with .pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Config file
    #[arg(short, long, default_value = "report-md.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Typst,
    Pdf,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = Config::load(&cli.config)?;
    let markdown = read_input(&cli.input)?;
    log::info!("read {} bytes from {}", markdown.len(), cli.input.display());

    let output: Vec<u8> = match cli.format {
        Format::Html => report_md::markdown_to_html_with_config(&markdown, &config).into_bytes(),
        Format::Typst => report_md::markdown_to_typst_with_config(&markdown, &config).into_bytes(),
        Format::Json => report_md::markdown_to_json(&markdown)?.into_bytes(),
        Format::Pdf => report_md::markdown_to_pdf_with_config(&markdown, &config)?,
    };

    // PDF is never written to the terminal
    let path = match (cli.output, cli.format) {
        (Some(path), _) => Some(path),
        (None, Format::Pdf) => Some(pdf_path(&cli.input)),
        (None, _) => None,
    };

    match path {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("writing {}", path.display()))?;
            println!("Created {}", path.display());
        }
        None => io::stdout()
            .write_all(&output)
            .context("writing to stdout")?,
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut markdown = String::new();
        io::stdin()
            .read_to_string(&mut markdown)
            .context("reading stdin")?;
        return Ok(markdown);
    }
    fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
}

fn pdf_path(input: &Path) -> PathBuf {
    if input == Path::new("-") {
        PathBuf::from("report.pdf")
    } else {
        input.with_extension("pdf")
    }
}
