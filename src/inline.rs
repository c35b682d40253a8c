use std::sync::OnceLock;

use regex::Regex;

use crate::block::InlineRun;

fn emphasis_regex() -> &'static Regex {
    static EMPHASIS: OnceLock<Regex> = OnceLock::new();
    // Non-greedy: each span closes at the next `**`
    EMPHASIS.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid emphasis regex"))
}

/// Split text into plain and emphasized runs.
///
/// `**...**` spans are matched left to right without nesting. An unmatched
/// `**` stays in the surrounding plain run as literal text. Empty plain runs
/// are never emitted.
pub fn format_inline(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut last = 0;

    for span in emphasis_regex().find_iter(text) {
        push_plain(&mut runs, &text[last..span.start()]);
        let inner = &span.as_str()[2..span.len() - 2];
        runs.push(InlineRun::Emphasized(inner.to_string()));
        last = span.end();
    }
    push_plain(&mut runs, &text[last..]);

    runs
}

fn push_plain(runs: &mut Vec<InlineRun>, text: &str) {
    if !text.is_empty() {
        runs.push(InlineRun::Plain(text.to_string()));
    }
}

/// Concatenated text of all runs, with the emphasis markers removed.
pub fn plain_text(runs: &[InlineRun]) -> String {
    runs.iter().map(InlineRun::text).collect()
}
