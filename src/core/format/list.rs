//! List-line classification and marker extraction.
//!
//! Recognizes asterisk, bullet-glyph, hyphen, and `N.` numbered list
//! lines. Every glyph-style marker is normalized to [`BULLET_MARKER`] for
//! display; only numbered lines keep their numeral.

use super::{resolve_emphasis, RenderElement, BULLET_MARKER};

/// Glyph prefixes recognized as list markers, tested in order.
const GLYPH_MARKERS: [char; 3] = ['*', '•', '-'];

/// Classify `trimmed` as a list item, or `None` to fall through to
/// paragraph handling. Emphasis is resolved on the marker-stripped content
/// only, so marker characters never leak into emphasis spans.
pub(super) fn detect_list_item(trimmed: &str) -> Option<RenderElement> {
    let content = item_content(trimmed)?;
    Some(RenderElement::ListItem {
        marker: marker_glyph(trimmed),
        content: resolve_emphasis(content),
    })
}

/// The text after a recognized marker: the marker prefix, at least one
/// whitespace character, then a non-empty remainder.
fn item_content(trimmed: &str) -> Option<&str> {
    for glyph in GLYPH_MARKERS {
        if let Some(rest) = trimmed.strip_prefix(glyph) {
            return spaced_content(rest);
        }
    }
    let (_, rest) = split_leading_number(trimmed)?;
    spaced_content(rest)
}

fn spaced_content(rest: &str) -> Option<&str> {
    let content = rest.trim_start();
    (content.len() < rest.len() && !content.is_empty()).then_some(content)
}

/// Split `N.` off the front of a numbered line: the digit run and the text
/// after the dot.
fn split_leading_number(trimmed: &str) -> Option<(&str, &str)> {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?;
    Some((&trimmed[..digits], rest))
}

/// Pick the display marker for a matched list line.
///
/// The checks look for marker characters anywhere in the trimmed line, not
/// just at the marker position: a numbered line whose content contains an
/// asterisk or hyphen therefore renders with the normalized glyph instead
/// of its numeral.
fn marker_glyph(trimmed: &str) -> String {
    if trimmed.contains('*') || trimmed.contains('•') || trimmed.contains('-') {
        return BULLET_MARKER.to_string();
    }
    match split_leading_number(trimmed) {
        Some((digits, _)) => format!("{digits}."),
        None => BULLET_MARKER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::{format_reply, EmphasisKind, InlineSpan, RenderElement};

    fn expect_item(raw: &str) -> (String, Vec<InlineSpan>) {
        match format_reply(raw).remove(0) {
            RenderElement::ListItem { marker, content } => (marker, content),
            other => panic!("expected list item for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn asterisk_lines_normalize_to_the_bullet_glyph() {
        let elements = format_reply("* first\n* second");
        for (element, text) in elements.iter().zip(["first", "second"]) {
            assert_eq!(
                *element,
                RenderElement::ListItem {
                    marker: "•".to_string(),
                    content: vec![InlineSpan::Text(text.to_string())],
                }
            );
        }
    }

    #[test]
    fn glyph_and_hyphen_lines_normalize_too() {
        assert_eq!(expect_item("• point").0, "•");
        assert_eq!(expect_item("- point").0, "•");
    }

    #[test]
    fn numbered_lines_keep_their_numeral() {
        let elements = format_reply("1. one\n2. two\n12. twelve");
        let markers: Vec<_> = elements
            .iter()
            .map(|e| match e {
                RenderElement::ListItem { marker, .. } => marker.as_str(),
                other => panic!("expected list item, got {other:?}"),
            })
            .collect();
        assert_eq!(markers, vec!["1.", "2.", "12."]);
    }

    // Pinned quirk: marker characters anywhere in the line outrank the
    // numbered form, so the hyphen in the price range wins.
    #[test]
    fn numbered_line_with_hyphen_content_gets_the_glyph() {
        let (marker, _) = expect_item("1. costs $5,000 - $15,000");
        assert_eq!(marker, "•");
    }

    #[test]
    fn numbered_line_with_emphasis_gets_the_glyph() {
        let (marker, content) = expect_item("2. **bold** step");
        assert_eq!(marker, "•");
        assert_eq!(
            content,
            vec![
                InlineSpan::Emphasis {
                    kind: EmphasisKind::Bold,
                    text: "bold".to_string(),
                },
                InlineSpan::Text(" step".to_string()),
            ]
        );
    }

    #[test]
    fn emphasis_resolves_on_marker_stripped_content() {
        let (marker, content) = expect_item("* item with *emph*");
        assert_eq!(marker, "•");
        assert_eq!(
            content,
            vec![
                InlineSpan::Text("item with ".to_string()),
                InlineSpan::Emphasis {
                    kind: EmphasisKind::Italic,
                    text: "emph".to_string(),
                },
            ]
        );
    }

    #[test]
    fn marker_without_space_is_not_a_list() {
        for raw in ["*bold*", "-dash", "•dot", "3.14 is pi"] {
            assert!(
                matches!(
                    format_reply(raw)[0],
                    RenderElement::Paragraph { .. }
                ),
                "expected paragraph for {raw:?}"
            );
        }
    }

    #[test]
    fn marker_without_content_is_not_a_list() {
        for raw in ["* ", "-  ", "7. "] {
            // Trailing whitespace trims away, leaving no content.
            assert!(
                matches!(format_reply(raw)[0], RenderElement::Paragraph { .. }),
                "expected paragraph for {raw:?}"
            );
        }
    }

    #[test]
    fn number_without_dot_is_not_a_list() {
        assert!(matches!(
            format_reply("2024 was a year")[0],
            RenderElement::Paragraph { .. }
        ));
    }
}
