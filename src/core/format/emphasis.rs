//! Inline emphasis resolution for a single line of reply text.
//!
//! Two ordered passes over the raw bytes: bold (`**...**`) first, then
//! italic (`*...*`), because the syntaxes overlap. Each pass records
//! byte-range spans in a table; the output is rebuilt by consuming ranges
//! left to right, so the working text is never rewritten mid-scan.

use memchr::memchr;

use super::{InlineContent, InlineSpan};

/// Emphasis flavor carried by an [`InlineSpan::Emphasis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisKind {
    Bold,
    Italic,
}

/// One delimited run found during scanning. `start..end` covers the run
/// including its delimiters; `text_start..text_end` is the content.
#[derive(Debug, Clone, Copy)]
struct MarkedRun {
    start: usize,
    end: usize,
    text_start: usize,
    text_end: usize,
    kind: EmphasisKind,
}

/// Resolve `**bold**` and `*italic*` runs in `line` into ordered spans.
///
/// Unpaired asterisks stay literal, bold content is captured verbatim
/// (no nested resolution), and empty literal segments between runs are
/// dropped. Concatenating the result reproduces the line minus the
/// delimiters of matched runs.
pub fn resolve_emphasis(line: &str) -> InlineContent {
    let bytes = line.as_bytes();
    let bold = scan_bold(bytes);
    let italic = scan_italic(bytes, &bold);

    let mut runs: Vec<MarkedRun> = bold;
    runs.extend(italic);
    runs.sort_by_key(|run| run.start);

    let mut content = InlineContent::new();
    let mut cursor = 0;
    for run in runs {
        if run.start > cursor {
            content.push(InlineSpan::Text(line[cursor..run.start].to_string()));
        }
        content.push(InlineSpan::Emphasis {
            kind: run.kind,
            text: line[run.text_start..run.text_end].to_string(),
        });
        cursor = run.end;
    }
    if cursor < line.len() {
        content.push(InlineSpan::Text(line[cursor..].to_string()));
    }
    content
}

/// Pair `**` delimiters left to right, non-greedy: each opening pairs with
/// the nearest following `**`. Content may itself contain lone asterisks.
fn scan_bold(bytes: &[u8]) -> Vec<MarkedRun> {
    let mut runs = Vec::new();
    let mut i = 0;
    while let Some(open) = find_double_star(bytes, i) {
        match find_double_star(bytes, open + 2) {
            Some(close) => {
                runs.push(MarkedRun {
                    start: open,
                    end: close + 2,
                    text_start: open + 2,
                    text_end: close,
                    kind: EmphasisKind::Bold,
                });
                i = close + 2;
            }
            // An unclosed opening stays literal; no later pair can exist
            // once the search for a closing `**` has come up empty.
            None => break,
        }
    }
    runs
}

fn find_double_star(bytes: &[u8], mut from: usize) -> Option<usize> {
    while from + 1 < bytes.len() {
        let at = from + memchr(b'*', &bytes[from..])?;
        if bytes.get(at + 1) == Some(&b'*') {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

/// Find single-asterisk runs in the text left over between bold runs.
///
/// A delimiter only counts when it is not adjacent to another literal
/// asterisk (asterisks consumed by a bold run are no longer literal),
/// content is non-empty and asterisk-free, and a run never crosses a
/// bold run.
fn scan_italic(bytes: &[u8], bold: &[MarkedRun]) -> Vec<MarkedRun> {
    let star_outside_bold = |idx: usize| {
        bytes.get(idx) == Some(&b'*') && !bold.iter().any(|b| b.start <= idx && idx < b.end)
    };

    let mut gaps: Vec<(usize, usize)> = Vec::new();
    let mut cursor = 0;
    for run in bold {
        gaps.push((cursor, run.start));
        cursor = run.end;
    }
    gaps.push((cursor, bytes.len()));

    let mut runs = Vec::new();
    for (gap_start, gap_end) in gaps {
        let mut i = gap_start;
        while i < gap_end {
            let Some(offset) = memchr(b'*', &bytes[i..gap_end]) else {
                break;
            };
            let open = i + offset;
            if (open > 0 && star_outside_bold(open - 1)) || star_outside_bold(open + 1) {
                i = open + 1;
                continue;
            }
            let Some(close_offset) = memchr(b'*', &bytes[open + 1..gap_end]) else {
                i = open + 1;
                continue;
            };
            let close = open + 1 + close_offset;
            if star_outside_bold(close + 1) {
                i = open + 1;
                continue;
            }
            runs.push(MarkedRun {
                start: open,
                end: close + 1,
                text_start: open + 1,
                text_end: close,
                kind: EmphasisKind::Italic,
            });
            i = close + 1;
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineSpan {
        InlineSpan::Text(s.to_string())
    }

    fn bold(s: &str) -> InlineSpan {
        InlineSpan::Emphasis {
            kind: EmphasisKind::Bold,
            text: s.to_string(),
        }
    }

    fn italic(s: &str) -> InlineSpan {
        InlineSpan::Emphasis {
            kind: EmphasisKind::Italic,
            text: s.to_string(),
        }
    }

    fn rejoin(content: &InlineContent) -> String {
        content
            .iter()
            .map(|span| match span {
                InlineSpan::Text(t) => t.as_str(),
                InlineSpan::Emphasis { text, .. } => text.as_str(),
            })
            .collect()
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(resolve_emphasis("hello there"), vec![text("hello there")]);
    }

    #[test]
    fn bold_and_italic_resolve_in_reading_order() {
        assert_eq!(
            resolve_emphasis("**bold** and *italic*"),
            vec![bold("bold"), text(" and "), italic("italic")]
        );
    }

    #[test]
    fn bold_at_both_ends_drops_empty_literals() {
        assert_eq!(
            resolve_emphasis("**a** mid **b**"),
            vec![bold("a"), text(" mid "), bold("b")]
        );
    }

    #[test]
    fn lone_asterisk_stays_literal() {
        assert_eq!(resolve_emphasis("3 * 4 = 12"), vec![text("3 * 4 = 12")]);
    }

    #[test]
    fn unclosed_bold_stays_literal() {
        assert_eq!(
            resolve_emphasis("**almost bold"),
            vec![text("**almost bold")]
        );
    }

    #[test]
    fn italic_delimiters_adjacent_to_asterisks_do_not_match() {
        // `**` wins the pairing; the leftover sequence has no valid
        // single-asterisk pair.
        assert_eq!(resolve_emphasis("*a**b*"), vec![text("*a**b*")]);
    }

    #[test]
    fn bold_pairs_non_greedily() {
        assert_eq!(
            resolve_emphasis("**a** plain **b**"),
            vec![bold("a"), text(" plain "), bold("b")]
        );
    }

    #[test]
    fn bold_content_may_contain_a_lone_asterisk() {
        assert_eq!(
            resolve_emphasis("***bold***"),
            vec![bold("*bold"), text("*")]
        );
    }

    #[test]
    fn empty_bold_run_is_kept() {
        assert_eq!(resolve_emphasis("x****y"), vec![text("x"), bold(""), text("y")]);
    }

    #[test]
    fn italic_never_crosses_a_bold_run() {
        // The candidate pair around the bold run would nest emphasis; the
        // span table keeps runs flat, so those asterisks stay literal.
        assert_eq!(
            resolve_emphasis("*a **b** c*"),
            vec![text("*a "), bold("b"), text(" c*")]
        );
    }

    #[test]
    fn italic_right_after_bold_still_matches() {
        assert_eq!(
            resolve_emphasis("**a***b*"),
            vec![bold("a"), italic("b")]
        );
    }

    #[test]
    fn consecutive_italics_resolve_independently() {
        assert_eq!(
            resolve_emphasis("*a* *b*"),
            vec![italic("a"), text(" "), italic("b")]
        );
    }

    #[test]
    fn rejoined_spans_reproduce_reading_order() {
        let cases = [
            "**Type 1 Diabetes**: the body doesn't produce insulin",
            "Exercise regularly *(at least 150 minutes per week)*",
            "plain with ** stray and * markers",
            "*a**b*",
            "***bold***",
        ];
        for case in cases {
            let content = resolve_emphasis(case);
            let rejoined = rejoin(&content);
            let mut stripped = case.to_string();
            for run in &content {
                if let InlineSpan::Emphasis { kind, .. } = run {
                    let delim = match kind {
                        EmphasisKind::Bold => "**",
                        EmphasisKind::Italic => "*",
                    };
                    stripped = stripped.replacen(delim, "", 2);
                }
            }
            assert_eq!(rejoined, stripped, "reading order broken for {case:?}");
        }
    }

    #[test]
    fn multibyte_text_around_emphasis_is_preserved() {
        assert_eq!(
            resolve_emphasis("naïve **gras** café"),
            vec![text("naïve "), bold("gras"), text(" café")]
        );
    }
}
