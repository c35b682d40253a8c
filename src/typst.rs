use crate::block::{FormattedBlock, InlineRun};
use crate::config::Config;

/// Lists up to this many items are kept on one page
const UNBREAKABLE_LIST_ITEMS: usize = 5;

/// Convert formatted blocks to Typst markup
pub fn blocks_to_typst(blocks: &[FormattedBlock], config: &Config) -> String {
    let mut out = String::new();

    emit_preamble(config, &mut out);

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            FormattedBlock::Heading { .. } => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, &mut out);

                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn emit_preamble(config: &Config, out: &mut String) {
    out.push_str("#set page(paper: \"");
    out.push_str(&escape_string(&config.page.paper));
    out.push('"');
    if config.page.numbers {
        out.push_str(", numbering: \"1\"");
    }
    out.push_str(")\n");

    if let Some(family) = &config.font.family {
        out.push_str("#set text(font: \"");
        out.push_str(&escape_string(family));
        out.push_str("\")\n");
    }

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");
}

fn emit_block(block: &FormattedBlock, out: &mut String) {
    match block {
        FormattedBlock::Heading { level, text } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            runs_to_typst(text, out);
            out.push_str("\n\n");
        }
        FormattedBlock::Paragraph { text } => {
            runs_to_typst(text, out);
            out.push_str("\n\n");
        }
        FormattedBlock::List { items } => {
            // Wrap list to keep together when small, allow breaks when large
            if items.len() <= UNBREAKABLE_LIST_ITEMS {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(items, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(items, out);
                out.push('\n');
            }
        }
        FormattedBlock::Table { headers, rows } => {
            out.push_str("#block(breakable: false)[\n");
            table_to_typst(headers, rows, out);
            out.push_str("]\n\n");
        }
        FormattedBlock::Rule => {
            out.push_str("#line(length: 100%)\n\n");
        }
    }
}

fn runs_to_typst(runs: &[InlineRun], out: &mut String) {
    for (index, run) in runs.iter().enumerate() {
        match run {
            InlineRun::Plain(text) if index == 0 => escape_line_start(text, out),
            InlineRun::Plain(text) => escape_markup(text, out),
            InlineRun::Emphasized(text) if text.is_empty() => {}
            InlineRun::Emphasized(text) => {
                out.push('*');
                escape_markup(text, out);
                out.push('*');
            }
        }
    }
}

/// Header cells are already bold, so runs are emitted without strong markers.
fn runs_to_plain_typst(runs: &[InlineRun], out: &mut String) {
    for run in runs {
        escape_markup(run.text(), out);
    }
}

fn escape_markup(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '-'
            | '+' | '/' | '~' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// Like `escape_markup`, but also escapes a leading `1.` so the text is not
/// read as a numbered list item.
fn escape_line_start(text: &str, out: &mut String) {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && text[digits..].starts_with('.') {
        out.push_str(&text[..digits]);
        out.push_str("\\.");
        escape_markup(&text[digits + 1..], out);
    } else {
        escape_markup(text, out);
    }
}

/// Escape text for use inside a Typst string literal.
fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn list_to_typst(items: &[Vec<InlineRun>], out: &mut String) {
    for item in items {
        out.push_str("- ");
        runs_to_typst(item, out);
        out.push('\n');
    }
}

fn table_to_typst(headers: &[Vec<InlineRun>], rows: &[Vec<Vec<InlineRun>>], out: &mut String) {
    // Rows may be ragged; pad everything to the widest row
    let col_count = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    if col_count == 0 {
        return;
    }

    out.push_str("#table(\n");
    out.push_str(&format!("  columns: {},\n", col_count));

    // Header cells (bold)
    for cell in headers {
        out.push_str("  [*");
        runs_to_plain_typst(cell, out);
        out.push_str("*],\n");
    }
    pad_row(headers.len(), col_count, out);

    // Data rows
    for row in rows {
        for cell in row {
            out.push_str("  [");
            runs_to_typst(cell, out);
            out.push_str("],\n");
        }
        pad_row(row.len(), col_count, out);
    }

    out.push_str(")\n");
}

fn pad_row(len: usize, col_count: usize, out: &mut String) {
    for _ in len..col_count {
        out.push_str("  [],\n");
    }
}

#[cfg(test)]
mod tests {
    use crate::{Config, markdown_to_typst};
    use pretty_assertions::assert_eq;

    const PREAMBLE: &str = "#set page(paper: \"a4\")\n#set par(linebreaks: \"optimized\")\n\n";

    #[test]
    fn heading() {
        assert_eq!(
            markdown_to_typst("# Hello"),
            format!("{PREAMBLE}#block(breakable: false)[\n= Hello\n\n]\n\n")
        );
    }

    #[test]
    fn heading_with_following_content() {
        // Heading should be grouped with following paragraph
        let result = markdown_to_typst("### Title\n\nSome text.");
        assert!(result.contains("#block(breakable: false)[\n=== Title\n\nSome text.\n\n]\n\n"));
    }

    #[test]
    fn paragraph() {
        assert_eq!(
            markdown_to_typst("Hello world"),
            format!("{PREAMBLE}Hello world\n\n")
        );
    }

    #[test]
    fn bold() {
        assert_eq!(
            markdown_to_typst("환급 **35만원**"),
            format!("{PREAMBLE}환급 *35만원*\n\n")
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            markdown_to_typst("- one\n- two"),
            format!("{PREAMBLE}#block(breakable: false)[\n- one\n- two\n]\n\n")
        );
    }

    #[test]
    fn long_list_may_break() {
        let md = (1..=6).map(|n| format!("- {n}")).collect::<Vec<_>>().join("\n");
        assert_eq!(
            markdown_to_typst(&md),
            format!("{PREAMBLE}- 1\n- 2\n- 3\n- 4\n- 5\n- 6\n\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(markdown_to_typst("a # b"), format!("{PREAMBLE}a \\# b\n\n"));
        assert_eq!(markdown_to_typst("a_b"), format!("{PREAMBLE}a\\_b\n\n"));
        assert_eq!(
            markdown_to_typst("= 1/2"),
            format!("{PREAMBLE}\\= 1\\/2\n\n")
        );
    }

    #[test]
    fn escapes_numbered_list_markers() {
        assert_eq!(
            markdown_to_typst("1. 항목"),
            format!("{PREAMBLE}1\\. 항목\n\n")
        );
        assert_eq!(
            markdown_to_typst("1. 근로소득 공제 내역\n2. 의료비"),
            format!("{PREAMBLE}1\\. 근로소득 공제 내역\n\n2\\. 의료비\n\n")
        );
        assert_eq!(
            markdown_to_typst("- 12. 기부금"),
            format!("{PREAMBLE}#block(breakable: false)[\n- 12\\. 기부금\n]\n\n")
        );
    }

    #[test]
    fn digits_mid_text_are_untouched() {
        assert_eq!(
            markdown_to_typst("세율 6.6% 적용"),
            format!("{PREAMBLE}세율 6.6% 적용\n\n")
        );
        assert_eq!(
            markdown_to_typst("2024년 기준"),
            format!("{PREAMBLE}2024년 기준\n\n")
        );
    }

    #[test]
    fn table() {
        let md = "| A | B |\n|---|---|\n| 1 | **2** |";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 2,\n  [*A*],\n  [*B*],\n  [1],\n  [*2*],\n)\n]\n\n"
        );
        assert_eq!(markdown_to_typst(md), expected);
    }

    #[test]
    fn ragged_table_is_padded() {
        let md = "A | B\n1 | 2 | 3";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 3,\n  [*A*],\n  [*B*],\n  [],\n  [1],\n  [2],\n  [3],\n)\n]\n\n"
        );
        assert_eq!(markdown_to_typst(md), expected);
    }

    #[test]
    fn horizontal_rule() {
        assert_eq!(
            markdown_to_typst("---"),
            format!("{PREAMBLE}#line(length: 100%)\n\n")
        );
    }

    #[test]
    fn preamble_follows_config() {
        let mut config = Config::default();
        config.page.numbers = true;
        config.font.family = Some("Noto Sans CJK KR".to_string());

        let result = crate::markdown_to_typst_with_config("", &config);
        assert_eq!(
            result,
            "#set page(paper: \"a4\", numbering: \"1\")\n#set text(font: \"Noto Sans CJK KR\")\n#set par(linebreaks: \"optimized\")\n\n"
        );
    }
}
