//! Color and style policy for the chat interface.

use ratatui::style::{Color, Modifier, Style};

use crate::core::bot::BotKind;

#[derive(Debug, Clone)]
pub struct Theme {
    /// Overall background color to paint the full frame.
    pub background_color: Color,

    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub app_text_style: Style,
    pub disclaimer_style: Style,

    // Chrome
    pub title_style: Style,
    pub tab_inactive_style: Style,
    pub pending_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,

    // Per-bot accents, keyed by [`BotKind`]
    pub business_accent: Color,
    pub healthcare_accent: Color,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            app_text_style: Style::default().fg(Color::DarkGray),
            disclaimer_style: Style::default().fg(Color::Yellow),

            title_style: Style::default().fg(Color::Gray),
            tab_inactive_style: Style::default().fg(Color::DarkGray),
            pending_indicator_style: Style::default().fg(Color::DarkGray),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),

            business_accent: Color::LightBlue,
            healthcare_accent: Color::LightGreen,
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            assistant_text_style: Style::default().fg(Color::Black),
            app_text_style: Style::default().fg(Color::Gray),
            disclaimer_style: Style::default().fg(Color::Rgb(146, 64, 14)),

            title_style: Style::default().fg(Color::DarkGray),
            tab_inactive_style: Style::default().fg(Color::Gray),
            pending_indicator_style: Style::default().fg(Color::Gray),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),

            business_accent: Color::Blue,
            healthcare_accent: Color::Green,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    pub fn bot_accent(&self, bot: BotKind) -> Color {
        match bot {
            BotKind::Business => self.business_accent,
            BotKind::Healthcare => self.healthcare_accent,
        }
    }

    /// Style for a reply heading of the given display level. Deeper levels
    /// drop the accent but stay bold.
    pub fn heading_style(&self, level: u8) -> Style {
        let base = self.assistant_text_style.add_modifier(Modifier::BOLD);
        if level <= 4 {
            base.add_modifier(Modifier::UNDERLINED)
        } else {
            base
        }
    }
}
