use crate::block::Block;
use crate::classify::{LineKind, classify};

/// Parse report text into a list of blocks.
///
/// Contiguous list items and table rows collapse into single `List`/`Table`
/// blocks; any other line (a blank one included) closes the open run.
pub fn parse(text: &str) -> Vec<Block> {
    let blocks = text
        .lines()
        .map(classify)
        .fold(ParseState::default(), ParseState::step)
        .finish();

    log::debug!(
        "parsed {} blocks from {} lines",
        blocks.len(),
        text.lines().count()
    );
    blocks
}

/// Run currently being accumulated
#[derive(Debug, Default)]
enum Mode {
    #[default]
    Idle,
    InList(Vec<String>),
    InTable {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Default)]
struct ParseState {
    mode: Mode,
    blocks: Vec<Block>,
}

impl ParseState {
    fn step(self, kind: LineKind<'_>) -> Self {
        let Self { mode, mut blocks } = self;

        let mode = match (mode, kind) {
            (Mode::InTable { headers, mut rows }, LineKind::TableRow { cells, separator }) => {
                if !separator {
                    rows.push(owned(cells));
                }
                Mode::InTable { headers, rows }
            }
            (Mode::InList(mut items), LineKind::ListItem(text)) => {
                push_item(&mut items, text);
                Mode::InList(items)
            }
            (open, kind) => {
                flush(open, &mut blocks);
                start(kind, &mut blocks)
            }
        };

        Self { mode, blocks }
    }

    fn finish(self) -> Vec<Block> {
        let Self { mode, mut blocks } = self;
        flush(mode, &mut blocks);
        blocks
    }
}

/// Handle a line with no run open.
fn start(kind: LineKind<'_>, blocks: &mut Vec<Block>) -> Mode {
    match kind {
        LineKind::TableRow {
            separator: true, ..
        } => Mode::Idle,
        LineKind::TableRow { cells, .. } => Mode::InTable {
            headers: owned(cells),
            rows: Vec::new(),
        },
        LineKind::ListItem(text) => {
            let mut items = Vec::new();
            push_item(&mut items, text);
            Mode::InList(items)
        }
        LineKind::Heading { level, text } => {
            blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
            Mode::Idle
        }
        LineKind::Rule => {
            blocks.push(Block::Rule);
            Mode::Idle
        }
        LineKind::Blank => Mode::Idle,
        LineKind::Text(text) => {
            blocks.push(Block::Paragraph {
                text: text.to_string(),
            });
            Mode::Idle
        }
    }
}

/// Close the open run, emitting its block.
fn flush(mode: Mode, blocks: &mut Vec<Block>) {
    match mode {
        Mode::Idle => {}
        // A run of bare markers produces nothing
        Mode::InList(items) if items.is_empty() => {}
        Mode::InList(items) => {
            log::trace!("flushing list of {} items", items.len());
            blocks.push(Block::List { items });
        }
        Mode::InTable { headers, rows } => {
            log::trace!(
                "flushing table of {} columns, {} rows",
                headers.len(),
                rows.len()
            );
            blocks.push(Block::Table { headers, rows });
        }
    }
}

fn push_item(items: &mut Vec<String>, text: &str) {
    if !text.is_empty() {
        items.push(text.to_string());
    }
}

fn owned(cells: Vec<&str>) -> Vec<String> {
    cells.into_iter().map(str::to_string).collect()
}
