//! Maps formatted reply elements and chat messages to ratatui lines.
//!
//! This is the presentation half of the reply pipeline: the formatter
//! decides structure, this module decides styling. Each [`RenderElement`]
//! becomes exactly one line.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::bot::BotKind;
use crate::core::conversation::{Message, Role};
use crate::core::format::{EmphasisKind, InlineSpan, RenderElement};
use crate::ui::theme::Theme;

/// Lines for one chat message, including the trailing spacing line.
pub fn message_lines(message: &Message, theme: &Theme, accent: Color) -> Vec<Line<'static>> {
    let mut lines = match (message.role, &message.reply) {
        (Role::User, _) => vec![Line::from(vec![
            Span::styled("You: ", theme.user_prefix_style),
            Span::styled(message.content.clone(), theme.user_text_style),
        ])],
        (Role::App, _) => vec![Line::from(Span::styled(
            message.content.clone(),
            theme.app_text_style,
        ))],
        (Role::Assistant, Some(reply)) => reply
            .iter()
            .map(|element| element_line(element, theme, accent))
            .collect(),
        // An assistant message without parsed elements renders raw.
        (Role::Assistant, None) => message
            .content
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme.assistant_text_style)))
            .collect(),
    };
    lines.push(Line::from(""));
    lines
}

/// Style one structured element as a single display line.
pub fn element_line(element: &RenderElement, theme: &Theme, accent: Color) -> Line<'static> {
    match element {
        RenderElement::Blank => Line::from(""),
        RenderElement::Heading { level, text } => {
            Line::from(inline_spans(text, theme.heading_style(*level)))
        }
        RenderElement::Disclaimer { text } => Line::from(vec![
            Span::styled("⚠️ ", theme.disclaimer_style),
            Span::styled(
                "Medical Disclaimer: ",
                theme.disclaimer_style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(text.clone(), theme.disclaimer_style),
        ]),
        RenderElement::ListItem { marker, content } => {
            let mut spans = vec![
                Span::raw("  "),
                Span::styled(
                    format!("{marker} "),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
            ];
            spans.extend(inline_spans(content, theme.assistant_text_style));
            Line::from(spans)
        }
        RenderElement::Paragraph { content } => {
            Line::from(inline_spans(content, theme.assistant_text_style))
        }
    }
}

/// Empty-state block shown when a bot has no history yet.
pub fn greeting_lines(bot: BotKind, theme: &Theme) -> Vec<Line<'static>> {
    let profile = bot.profile();
    let accent = Style::default()
        .fg(theme.bot_accent(bot))
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {}", profile.icon, profile.greeting_title),
            accent,
        )),
        Line::from(""),
        Line::from(Span::styled(profile.greeting, theme.app_text_style)),
        Line::from(""),
    ]
}

fn inline_spans(content: &[InlineSpan], base: Style) -> Vec<Span<'static>> {
    content
        .iter()
        .map(|span| match span {
            InlineSpan::Text(text) => Span::styled(text.clone(), base),
            InlineSpan::Emphasis { kind, text } => {
                let modifier = match kind {
                    EmphasisKind::Bold => Modifier::BOLD,
                    EmphasisKind::Italic => Modifier::ITALIC,
                };
                Span::styled(text.clone(), base.add_modifier(modifier))
            }
        })
        .collect()
}
