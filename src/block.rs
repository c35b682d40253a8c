use serde::Serialize;

use crate::inline::format_inline;

/// Inline text runs produced by the emphasis formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum InlineRun {
    Plain(String),
    Emphasized(String),
}

impl InlineRun {
    pub fn text(&self) -> &str {
        match self {
            InlineRun::Plain(text) | InlineRun::Emphasized(text) => text,
        }
    }
}

/// Block-level elements parsed from report text.
///
/// `T` is the representation of every textual field: `String` as produced by
/// the parser, `Vec<InlineRun>` once the emphasis formatter has run over it
/// (see [`FormattedBlock`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block<T = String> {
    Heading {
        level: u8,
        text: T,
    },
    Paragraph {
        text: T,
    },
    List {
        items: Vec<T>,
    },
    Table {
        headers: Vec<T>,
        rows: Vec<Vec<T>>,
    },
    Rule,
}

/// A block whose text fields have been split into inline runs
pub type FormattedBlock = Block<Vec<InlineRun>>;

impl<T> Block<T> {
    /// Transform every text field, keeping the block structure intact.
    pub fn map_text<U>(self, mut f: impl FnMut(T) -> U) -> Block<U> {
        match self {
            Block::Heading { level, text } => Block::Heading {
                level,
                text: f(text),
            },
            Block::Paragraph { text } => Block::Paragraph { text: f(text) },
            Block::List { items } => Block::List {
                items: items.into_iter().map(&mut f).collect(),
            },
            Block::Table { headers, rows } => Block::Table {
                headers: headers.into_iter().map(&mut f).collect(),
                rows: rows
                    .into_iter()
                    .map(|row| row.into_iter().map(&mut f).collect())
                    .collect(),
            },
            Block::Rule => Block::Rule,
        }
    }
}

impl Block {
    /// Run the emphasis formatter over every text field.
    pub fn format(self) -> FormattedBlock {
        self.map_text(|text| format_inline(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_table_touches_every_cell() {
        let table = Block::Table {
            headers: vec!["**항목**".to_string(), "금액".to_string()],
            rows: vec![vec!["의료비".to_string(), "**120,000원**".to_string()]],
        };

        assert_eq!(
            table.format(),
            Block::Table {
                headers: vec![
                    vec![InlineRun::Emphasized("항목".to_string())],
                    vec![InlineRun::Plain("금액".to_string())],
                ],
                rows: vec![vec![
                    vec![InlineRun::Plain("의료비".to_string())],
                    vec![InlineRun::Emphasized("120,000원".to_string())],
                ]],
            }
        );
    }

    #[test]
    fn map_text_keeps_heading_level() {
        let heading = Block::Heading {
            level: 2,
            text: "Summary".to_string(),
        };
        assert_eq!(
            heading.map_text(|text| text.len()),
            Block::Heading { level: 2, text: 7 }
        );
    }

    #[test]
    fn rule_has_no_text() {
        let mut calls = 0;
        let rule: Block<()> = Block::Rule.map_text(|_: String| calls += 1);
        assert_eq!(rule, Block::Rule);
        assert_eq!(calls, 0);
    }

    #[test]
    fn serializes_with_type_tag() {
        let blocks = vec![
            Block::Paragraph {
                text: vec![
                    InlineRun::Emphasized("bold".to_string()),
                    InlineRun::Plain(" text".to_string()),
                ],
            },
            Block::Rule,
        ];
        let json = serde_json::to_value(&blocks).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "type": "paragraph",
                    "text": [
                        { "style": "emphasized", "text": "bold" },
                        { "style": "plain", "text": " text" }
                    ]
                },
                { "type": "rule" }
            ])
        );
    }
}
