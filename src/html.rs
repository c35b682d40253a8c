use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::{FormattedBlock, InlineRun};
use crate::config::HtmlConfig;

/// Convert formatted blocks to an HTML fragment.
///
/// All text is escaped; only the element structure and `<strong>` come from
/// the renderer.
pub fn render_html(blocks: &[FormattedBlock], config: &HtmlConfig) -> String {
    let mut out = String::new();

    open_tag("div", &config.wrapper, &mut out);
    out.push('\n');
    for block in blocks {
        emit_block(block, config, &mut out);
    }
    out.push_str("</div>\n");

    out
}

fn emit_block(block: &FormattedBlock, config: &HtmlConfig, out: &mut String) {
    match block {
        FormattedBlock::Heading { level, text } => {
            let tag = format!("h{}", (*level).clamp(1, 4));
            element(&tag, config.heading_class(*level), text, out);
            out.push('\n');
        }
        FormattedBlock::Paragraph { text } => {
            element("p", &config.paragraph, text, out);
            out.push('\n');
        }
        FormattedBlock::List { items } => {
            open_tag("ul", &config.list, out);
            out.push('\n');
            for item in items {
                element("li", &config.list_item, item, out);
                out.push('\n');
            }
            out.push_str("</ul>\n");
        }
        FormattedBlock::Table { headers, rows } => {
            open_tag("div", &config.table_wrapper, out);
            open_tag("table", &config.table, out);
            out.push_str("<thead>");
            open_tag("tr", &config.header_row, out);
            for header in headers {
                element("th", &config.header_cell, header, out);
            }
            out.push_str("</tr></thead>\n<tbody>\n");
            for (index, row) in rows.iter().enumerate() {
                open_tag("tr", config.row_class(index), out);
                for cell in row {
                    element("td", &config.cell, cell, out);
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</tbody></table></div>\n");
        }
        FormattedBlock::Rule => {
            open_tag("hr", &config.rule, out);
            out.push('\n');
        }
    }
}

fn element(tag: &str, class: &str, runs: &[InlineRun], out: &mut String) {
    open_tag(tag, class, out);
    runs_to_html(runs, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn open_tag(tag: &str, class: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if !class.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&encode_double_quoted_attribute(class));
        out.push('"');
    }
    out.push('>');
}

fn runs_to_html(runs: &[InlineRun], out: &mut String) {
    for run in runs {
        match run {
            InlineRun::Plain(text) => out.push_str(&encode_text(text)),
            InlineRun::Emphasized(text) => {
                out.push_str("<strong>");
                out.push_str(&encode_text(text));
                out.push_str("</strong>");
            }
        }
    }
}
