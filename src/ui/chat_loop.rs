//! Main chat event loop and UI rendering.
//!
//! Owns the terminal session: draws the tab bar, transcript, and input
//! box, dispatches keys, and drains replies arriving from spawned
//! requests. One request is in flight at most; replies come back over an
//! unbounded channel tagged with the bot they belong to, so a reply lands
//! in the right history even if the user has switched tabs meanwhile.

use std::{error::Error, io, time::Duration};

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use crate::api;
use crate::core::bot::BotKind;
use crate::core::conversation::{ConversationStore, Message};
use crate::ui::render::{greeting_lines, message_lines};
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;

/// Effective settings after merging config and command-line flags.
pub struct Settings {
    pub base_url: String,
    pub bot: BotKind,
    pub theme: String,
    pub log_file: Option<String>,
}

/// A finished backend reply, tagged with the bot that produced it.
struct ReplyEvent {
    bot: BotKind,
    text: String,
}

struct ChatApp {
    store: ConversationStore,
    active_bot: BotKind,
    input: String,
    theme: Theme,
    dark_theme: bool,
    scroll_offset: u16,
    auto_scroll: bool,
    /// Bot we are waiting on, if a request is in flight.
    pending: Option<BotKind>,
    spinner_frame: usize,
    /// Health-probe outcome, shown beneath the greeting until the first
    /// message arrives.
    startup_notice: Option<String>,
    logging: LoggingState,
    client: reqwest::Client,
    base_url: String,
}

impl ChatApp {
    fn new(settings: Settings) -> Result<Self, Box<dyn Error>> {
        let logging = LoggingState::new(settings.log_file)?;
        let dark_theme = settings.theme.to_ascii_lowercase() != "light";
        Ok(ChatApp {
            store: ConversationStore::new(),
            active_bot: settings.bot,
            input: String::new(),
            theme: Theme::from_name(&settings.theme),
            dark_theme,
            scroll_offset: 0,
            auto_scroll: true,
            pending: None,
            spinner_frame: 0,
            startup_notice: None,
            logging,
            client: reqwest::Client::new(),
            base_url: settings.base_url,
        })
    }

    fn toggle_theme(&mut self) {
        self.dark_theme = !self.dark_theme;
        self.theme = if self.dark_theme {
            Theme::dark_default()
        } else {
            Theme::light()
        };
    }

    fn switch_bot(&mut self) {
        self.active_bot = self.active_bot.toggled();
        self.auto_scroll = true;
        self.scroll_offset = 0;
    }

    fn clear_active_history(&mut self) {
        self.store.clear(self.active_bot);
        self.auto_scroll = true;
        self.scroll_offset = 0;
        if let Err(e) = self.logging.log_cleared(self.active_bot.profile().label) {
            warn!(error = %e, "could not record clear in transcript log");
        }
    }

    fn record(&mut self, bot: BotKind, message: Message) {
        if let Err(e) = self.logging.log_message(&message) {
            warn!(error = %e, "could not write transcript log");
        }
        self.store.push(bot, message);
    }

    fn build_display_lines(&self) -> Vec<Line<'static>> {
        let bot = self.active_bot;
        let mut lines = if self.store.is_empty(bot) {
            let mut lines = greeting_lines(bot, &self.theme);
            if let Some(notice) = &self.startup_notice {
                lines.push(Line::from(Span::styled(
                    notice.clone(),
                    self.theme.app_text_style,
                )));
            }
            lines
        } else {
            let accent = self.theme.bot_accent(bot);
            self.store
                .history(bot)
                .iter()
                .flat_map(|message| message_lines(message, &self.theme, accent))
                .collect()
        };
        if self.pending == Some(bot) {
            let dots = ".".repeat(1 + (self.spinner_frame / 4) % 3);
            lines.push(Line::from(Span::styled(
                format!("Thinking{dots}"),
                self.theme.pending_indicator_style,
            )));
        }
        lines
    }

    fn calculate_max_scroll_offset(&self, available_height: u16) -> u16 {
        let total_lines = self.build_display_lines().len() as u16;
        total_lines.saturating_sub(available_height)
    }

    /// Move the viewport up by `delta` lines, detaching from auto-scroll.
    fn scroll_up(&mut self, delta: u16, available_height: u16) {
        let max_scroll = self.calculate_max_scroll_offset(available_height);
        if self.auto_scroll {
            self.scroll_offset = max_scroll;
        }
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.min(max_scroll).saturating_sub(delta);
    }

    /// Move the viewport down; reattaches auto-scroll at the bottom.
    fn scroll_down(&mut self, delta: u16, available_height: u16) {
        let max_scroll = self.calculate_max_scroll_offset(available_height);
        if self.auto_scroll {
            self.scroll_offset = max_scroll;
        }
        self.scroll_offset = self.scroll_offset.saturating_add(delta).min(max_scroll);
        if self.scroll_offset >= max_scroll {
            self.auto_scroll = true;
        }
    }
}

/// Height taken by chrome around the transcript: tab bar plus input box.
const CHROME_HEIGHT: u16 = 4;

fn transcript_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(CHROME_HEIGHT)
}

/// Run the interactive session until the user quits.
pub async fn run_chat(settings: Settings) -> Result<(), Box<dyn Error>> {
    let mut app = ChatApp::new(settings)?;

    // Probe the backend once before taking over the screen; the outcome
    // is reported beneath the greeting either way.
    let notice = match api::fetch_health(&app.client, &app.base_url).await {
        Ok(health) => format!(
            "Backend {} (bots: {})",
            health.status,
            health.bots.join(", ")
        ),
        Err(e) => {
            warn!(error = %e, "health probe failed");
            "Backend unreachable; replies will fall back to a fixed apology.".to_string()
        }
    };
    if let Err(e) = app.logging.log_message(&Message::app(notice.clone())) {
        warn!(error = %e, "could not write transcript log");
    }
    app.startup_notice = Some(notice);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<ReplyEvent>();

    let result = loop {
        terminal.draw(|frame| ui(frame, &app))?;

        if event::poll(Duration::from_millis(50))? {
            let height = transcript_height(terminal.size()?.height);
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.toggle_theme();
                    }
                    KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.clear_active_history();
                    }
                    KeyCode::Tab => {
                        app.switch_bot();
                    }
                    KeyCode::Enter => {
                        if app.input.trim().is_empty() || app.pending.is_some() {
                            continue;
                        }
                        let text = std::mem::take(&mut app.input);
                        let bot = app.active_bot;
                        app.record(bot, Message::user(text.clone()));
                        app.pending = Some(bot);
                        app.auto_scroll = true;
                        spawn_request(app.client.clone(), app.base_url.clone(), text, bot, &tx);
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.input.push(c);
                    }
                    KeyCode::Up => app.scroll_up(1, height),
                    KeyCode::Down => app.scroll_down(1, height),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.scroll_up(3, height),
                    MouseEventKind::ScrollDown => app.scroll_down(3, height),
                    _ => {}
                },
                _ => {}
            }
        } else {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
        }

        // Drain finished replies, then force a redraw.
        let mut received_any = false;
        while let Ok(reply) = rx.try_recv() {
            let message = Message::assistant(reply.text);
            app.record(reply.bot, message);
            if app.pending == Some(reply.bot) {
                app.pending = None;
            }
            received_any = true;
        }
        if received_any {
            app.auto_scroll = true;
            continue;
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn spawn_request(
    client: reqwest::Client,
    base_url: String,
    text: String,
    bot: BotKind,
    tx: &mpsc::UnboundedSender<ReplyEvent>,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        // Transport failure is downgraded to an ordinary reply; the fixed
        // apology goes through the same formatter as real replies.
        let text = match api::fetch_reply(&client, &base_url, text, bot).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, bot = bot.wire_name(), "chat request failed");
                api::FALLBACK_REPLY.to_string()
            }
        };
        let _ = tx.send(ReplyEvent { bot, text });
    });
}

fn ui(frame: &mut Frame, app: &ChatApp) {
    let theme = &app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    frame.render_widget(Paragraph::new(tab_line(app)), chunks[0]);

    let lines = app.build_display_lines();
    let max_offset = (lines.len() as u16).saturating_sub(chunks[1].height);
    let scroll_offset = if app.auto_scroll {
        max_offset
    } else {
        app.scroll_offset.min(max_offset)
    };

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset, 0));
    frame.render_widget(transcript, chunks[1]);

    let input_title = format!(
        "Ask the {} assistant (Enter send · Tab switch · ^L clear · ^T theme · ^C quit)",
        app.active_bot.profile().label
    );
    let input = Paragraph::new(app.input.as_str())
        .style(theme.input_text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.input_border_style)
                .title(Span::styled(input_title, theme.input_title_style)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(input, chunks[2]);

    frame.set_cursor_position((
        chunks[2].x + app.input.as_str().width() as u16 + 1,
        chunks[2].y + 1,
    ));
}

fn tab_line(app: &ChatApp) -> Line<'static> {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(" duobot ", theme.title_style)];
    for bot in BotKind::all() {
        let profile = bot.profile();
        let questions = app.store.question_count(bot);
        let badge = if questions > 0 {
            format!(" ({questions})")
        } else {
            String::new()
        };
        let style = if bot == app.active_bot {
            Style::default()
                .fg(theme.bot_accent(bot))
                .add_modifier(Modifier::BOLD)
        } else {
            theme.tab_inactive_style
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} {}{badge}", profile.icon, profile.label),
            style,
        ));
    }
    Line::from(spans)
}
