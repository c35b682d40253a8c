//! Render AI-generated report text into typed content blocks.
//!
//! Report text is a small Markdown subset: `#`-`####` headings, `-`/`*`
//! bullet lists, pipe tables, `---` rules and `**bold**` emphasis. [`parse`]
//! turns it into [`Block`]s; the renderers turn formatted blocks into HTML,
//! Typst, PDF or JSON.

mod block;
mod classify;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod typst;

pub use block::{Block, FormattedBlock, InlineRun};
pub use classify::{LineKind, classify};
pub use config::{Config, FontConfig, HtmlConfig, PageConfig};
pub use error::{Error, Result};
pub use html::render_html;
pub use inline::{format_inline, plain_text};

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse report text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Parse report text and split every text field into inline runs.
pub fn parse_formatted(markdown: &str) -> Vec<FormattedBlock> {
    parse(markdown).into_iter().map(|block| block.format()).collect()
}

/// Convert report text to an HTML fragment using default config.
pub fn markdown_to_html(markdown: &str) -> String {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert report text to an HTML fragment with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> String {
    render_html(&parse_formatted(markdown), &config.html)
}

/// Convert report text to a JSON array of formatted blocks.
pub fn markdown_to_json(markdown: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&parse_formatted(markdown))?)
}

/// Convert report text to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> String {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert report text to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> String {
    typst::blocks_to_typst(&parse_formatted(markdown), config)
}

/// Convert report text to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Compile report text to a Typst document.
fn compile_document(
    markdown: &str,
    config: &Config,
) -> Result<typst_library::layout::PagedDocument> {
    let typst_content = markdown_to_typst_with_config(markdown, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(config.font.system_fonts);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    log::debug!(
        "compiling typst document (system fonts: {})",
        config.font.system_fonts
    );
    engine
        .compile()
        .output
        .map_err(|e| Error::Typst(format!("{:?}", e)))
}

/// Convert report text to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>> {
    let doc = compile_document(markdown, config)?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
