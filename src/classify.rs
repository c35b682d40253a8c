/// Classification of a single trimmed line.
///
/// Each line is classified on its own; run accumulation happens afterwards in
/// the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A pipe-delimited row. `separator` rows (`---|---`) only mark the
    /// header/body boundary.
    TableRow { cells: Vec<&'a str>, separator: bool },
    Heading { level: u8, text: &'a str },
    /// A `-` or `*` item. The text may be empty for a bare marker.
    ListItem(&'a str),
    Rule,
    Blank,
    Text(&'a str),
}

const MAX_HEADING_LEVEL: usize = 4;
const RULE_MARKER: &str = "---";

/// Classify one line. Surrounding whitespace is trimmed first.
///
/// Checks run in a fixed order and the first match wins: table row, heading,
/// rule, list item, blank, text. Table rows are checked before headings and
/// list items, so `# Title | Extra` is a table row.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if let Some(cells) = table_cells(line) {
        return LineKind::TableRow {
            cells,
            separator: line.contains(RULE_MARKER),
        };
    }

    if let Some((level, text)) = heading(line) {
        return LineKind::Heading { level, text };
    }

    if line.starts_with(RULE_MARKER) {
        return LineKind::Rule;
    }

    if let Some(rest) = line.strip_prefix(['-', '*']) {
        return LineKind::ListItem(rest.trim());
    }

    if line.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text(line)
    }
}

/// Non-empty trimmed cells, if the line has at least two of them.
fn table_cells(line: &str) -> Option<Vec<&str>> {
    if !line.contains('|') {
        return None;
    }
    let cells: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect();
    (cells.len() >= 2).then_some(cells)
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line
        .bytes()
        .take_while(|&b| b == b'#')
        .take(MAX_HEADING_LEVEL)
        .count();
    if level == 0 {
        return None;
    }
    Some((level as u8, line[level..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", 1, "Title")]
    #[case("## Title", 2, "Title")]
    #[case("### Title", 3, "Title")]
    #[case("#### Title", 4, "Title")]
    #[case("##### Title", 4, "# Title")]
    #[case("###제목", 3, "제목")]
    #[case("  ##   padded  ", 2, "padded")]
    #[case("#", 1, "")]
    fn headings(#[case] line: &str, #[case] level: u8, #[case] text: &str) {
        assert_eq!(classify(line), LineKind::Heading { level, text });
    }

    #[rstest]
    #[case("- item", "item")]
    #[case("* item", "item")]
    #[case("-item", "item")]
    #[case("-", "")]
    #[case("*   ", "")]
    #[case("- 근로소득 공제", "근로소득 공제")]
    #[case("**bold** text", "*bold** text")]
    #[case("-- double", "- double")]
    fn list_items(#[case] line: &str, #[case] text: &str) {
        assert_eq!(classify(line), LineKind::ListItem(text));
    }

    #[rstest]
    #[case("---")]
    #[case("----------")]
    #[case("--- end ---")]
    #[case("   ---   ")]
    fn rules(#[case] line: &str) {
        assert_eq!(classify(line), LineKind::Rule);
    }

    #[test]
    fn table_row_cells_are_trimmed() {
        assert_eq!(
            classify("| 항목 | 금액 |"),
            LineKind::TableRow {
                cells: vec!["항목", "금액"],
                separator: false,
            }
        );
        assert_eq!(
            classify("A | B"),
            LineKind::TableRow {
                cells: vec!["A", "B"],
                separator: false,
            }
        );
    }

    #[rstest]
    #[case("---|---")]
    #[case("|---|---|")]
    #[case("| :--- | ---: |")]
    fn separator_rows(#[case] line: &str) {
        assert!(matches!(
            classify(line),
            LineKind::TableRow {
                separator: true,
                ..
            }
        ));
    }

    #[test]
    fn table_row_wins_over_heading_and_list() {
        assert_eq!(
            classify("# Title | Extra"),
            LineKind::TableRow {
                cells: vec!["# Title", "Extra"],
                separator: false,
            }
        );
        assert_eq!(
            classify("- a | b"),
            LineKind::TableRow {
                cells: vec!["- a", "b"],
                separator: false,
            }
        );
    }

    #[rstest]
    #[case("| only |")]
    #[case("a |")]
    #[case("||")]
    fn single_cell_pipe_lines_are_text(#[case] line: &str) {
        assert_eq!(classify(line), LineKind::Text(line.trim()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\r")]
    fn blanks(#[case] line: &str) {
        assert_eq!(classify(line), LineKind::Blank);
    }

    #[test]
    fn plain_text_keeps_trimmed_line() {
        assert_eq!(
            classify("  총 공제액은 **1,500,000원**입니다.  "),
            LineKind::Text("총 공제액은 **1,500,000원**입니다.")
        );
    }
}
