//! Reply formatter: turns raw assistant text into renderable line elements.
//!
//! The backend produces a constrained markdown-like dialect (headings, a
//! flagged medical disclaimer, bullet/numbered lists, and `**bold**` /
//! `*italic*` emphasis). This module restructures that surface syntax into
//! [`RenderElement`] values, one per physical input line, for the UI layer
//! to style. It never fails: unmatched or malformed markup degrades to
//! literal text.
//!
//! Classification runs per line through [`RULES`] in priority order; the
//! first matching rule wins and a line is never classified twice.

pub mod emphasis;
pub mod list;

pub use emphasis::{resolve_emphasis, EmphasisKind};

/// Marker glyph rendered for asterisk, bullet, and hyphen list lines.
pub const BULLET_MARKER: &str = "•";

const WARNING_GLYPH: &str = "⚠️";
const DISCLAIMER_LABEL: &str = "Medical Disclaimer";
const DISCLAIMER_LABEL_COLON: &str = "Medical Disclaimer:";
const EDUCATIONAL_PHRASE: &str = "educational purposes";

/// One span of inline text within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    /// Literal text, reproduced exactly as it appeared.
    Text(String),
    /// An emphasized run with its delimiters stripped.
    Emphasis { kind: EmphasisKind, text: String },
}

/// Ordered inline spans; concatenating them reproduces the line's reading
/// order with all emphasis delimiters removed.
pub type InlineContent = Vec<InlineSpan>;

/// One display-ready unit derived from one physical input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderElement {
    /// A line that was empty after trimming.
    Blank,
    /// A `#`-prefixed header line. Header text keeps emphasis markers
    /// literal; see [`detect_heading`].
    Heading { level: u8, text: InlineContent },
    /// A flagged cautionary notice with disclaimer markup stripped.
    Disclaimer { text: String },
    /// One bullet or numbered entry with its visible marker.
    ListItem { marker: String, content: InlineContent },
    /// A plain line.
    Paragraph { content: InlineContent },
}

type Rule = fn(&str) -> Option<RenderElement>;

/// Line classification rules, evaluated top to bottom; the first match
/// wins. The order (blank, header, disclaimer, list) is a contract the
/// tests pin down. A paragraph is the fallback, not a rule.
const RULES: &[Rule] = &[
    detect_blank,
    detect_heading,
    detect_disclaimer,
    list::detect_list_item,
];

/// Format one raw reply into render elements, one per physical line.
///
/// An empty reply yields no elements; otherwise the output has exactly one
/// element per `\n`-separated line, in input order.
pub fn format_reply(raw: &str) -> Vec<RenderElement> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split('\n').map(classify_line).collect()
}

fn classify_line(line: &str) -> RenderElement {
    let trimmed = line.trim();
    RULES
        .iter()
        .find_map(|rule| rule(trimmed))
        .unwrap_or_else(|| RenderElement::Paragraph {
            content: resolve_emphasis(trimmed),
        })
}

fn detect_blank(trimmed: &str) -> Option<RenderElement> {
    trimmed.is_empty().then_some(RenderElement::Blank)
}

/// Detect a header: 1-3 leading `#`, at least one whitespace character,
/// then non-empty text. The displayed level is the marker count demoted by
/// two and capped at 6, so reply headers never outrank the app's own
/// chrome. Header text is deliberately not passed through emphasis
/// resolution; asterisks inside a header stay literal.
fn detect_heading(trimmed: &str) -> Option<RenderElement> {
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &trimmed[hashes..];
    let text = rest.trim_start();
    if text.len() == rest.len() || text.is_empty() {
        return None;
    }
    Some(RenderElement::Heading {
        level: (hashes as u8 + 2).min(6),
        text: vec![InlineSpan::Text(text.to_string())],
    })
}

/// Detect the medical-disclaimer notice: the warning glyph plus one of the
/// two recognized phrases, anywhere in the line. Takes priority over list
/// and paragraph classification so the notice always renders in its fixed
/// template, whatever emphasis markup it carries.
fn detect_disclaimer(trimmed: &str) -> Option<RenderElement> {
    if !trimmed.contains(WARNING_GLYPH) {
        return None;
    }
    if !trimmed.contains(DISCLAIMER_LABEL) && !trimmed.contains(EDUCATIONAL_PHRASE) {
        return None;
    }
    let text = trimmed
        .replace(WARNING_GLYPH, "")
        .replace("**", "")
        .replacen(DISCLAIMER_LABEL_COLON, "", 1)
        .trim()
        .to_string();
    Some(RenderElement::Disclaimer { text })
}
