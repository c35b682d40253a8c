use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub html: HtmlConfig,
    pub page: PageConfig,
    pub font: FontConfig,
}

/// CSS classes attached to each rendered element. An empty class omits the
/// attribute.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub wrapper: String,
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
    pub paragraph: String,
    pub list: String,
    pub list_item: String,
    pub table_wrapper: String,
    pub table: String,
    pub header_row: String,
    pub header_cell: String,
    pub even_row: String,
    pub odd_row: String,
    pub cell: String,
    pub rule: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            wrapper: "markdown-content".to_string(),
            h1: "text-3xl font-bold text-zinc-900 dark:text-zinc-100 mt-8 mb-4".to_string(),
            h2: "text-2xl font-bold text-zinc-900 dark:text-zinc-100 mt-8 mb-4".to_string(),
            h3: "text-xl font-bold text-zinc-900 dark:text-zinc-100 mt-6 mb-3".to_string(),
            h4: "text-lg font-semibold text-zinc-900 dark:text-zinc-100 mt-4 mb-2".to_string(),
            paragraph: "text-zinc-700 dark:text-zinc-300 mb-3 leading-relaxed".to_string(),
            list: "list-disc list-inside mb-4 space-y-1 ml-4".to_string(),
            list_item: "text-zinc-700 dark:text-zinc-300".to_string(),
            table_wrapper: "overflow-x-auto mb-6".to_string(),
            table: "min-w-full border-collapse border border-zinc-300 dark:border-zinc-700"
                .to_string(),
            header_row: "bg-zinc-100 dark:bg-zinc-800".to_string(),
            header_cell: "border border-zinc-300 dark:border-zinc-700 px-4 py-2 text-left font-semibold text-zinc-900 dark:text-zinc-100".to_string(),
            even_row: "bg-white dark:bg-zinc-900".to_string(),
            odd_row: "bg-zinc-50 dark:bg-zinc-800".to_string(),
            cell: "border border-zinc-300 dark:border-zinc-700 px-4 py-2 text-zinc-700 dark:text-zinc-300".to_string(),
            rule: "my-6 border-zinc-300 dark:border-zinc-700".to_string(),
        }
    }
}

impl HtmlConfig {
    /// Class for a heading level. Levels outside 1-4 fall back to `h4`.
    pub fn heading_class(&self, level: u8) -> &str {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            _ => &self.h4,
        }
    }

    /// Class for a table body row, striped by zero-based index.
    pub fn row_class(&self, index: usize) -> &str {
        if index % 2 == 0 {
            &self.even_row
        } else {
            &self.odd_row
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub paper: String,
    pub numbers: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: "a4".to_string(),
            numbers: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct FontConfig {
    /// Font family for body text. Unset keeps the Typst default.
    pub family: Option<String>,
    /// Search installed fonts in addition to the embedded ones.
    pub system_fonts: bool,
}

impl Config {
    /// The bundled default config.
    pub fn compiled_default() -> Self {
        // Validated by build.rs
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled default if the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::compiled_default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());

        Ok(config)
    }
}
