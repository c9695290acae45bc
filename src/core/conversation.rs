//! Per-bot message history.
//!
//! Each bot keeps an independent transcript; switching tabs never mixes
//! them. Assistant replies are parsed into render elements exactly once,
//! when they arrive, and the parsed form travels with the message.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::core::bot::BotKind;
use crate::core::format::{format_reply, RenderElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    /// App-authored notice shown in the transcript but never sent anywhere.
    App,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::App => "app",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
    /// Structured form of an assistant reply, parsed once on arrival.
    /// `None` for user and app messages, which render verbatim.
    pub reply: Option<Vec<RenderElement>>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        let content = content.into();
        let reply = Some(format_reply(&content));
        Message {
            role: Role::Assistant,
            content,
            timestamp: Local::now(),
            reply,
        }
    }

    pub fn app(content: impl Into<String>) -> Self {
        Self::plain(Role::App, content.into())
    }

    fn plain(role: Role, content: String) -> Self {
        Message {
            role,
            content,
            timestamp: Local::now(),
            reply: None,
        }
    }
}

/// Message histories for both bots.
#[derive(Default)]
pub struct ConversationStore {
    business: VecDeque<Message>,
    healthcare: VecDeque<Message>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self, bot: BotKind) -> &VecDeque<Message> {
        match bot {
            BotKind::Business => &self.business,
            BotKind::Healthcare => &self.healthcare,
        }
    }

    pub fn push(&mut self, bot: BotKind, message: Message) {
        self.history_mut(bot).push_back(message);
    }

    pub fn clear(&mut self, bot: BotKind) {
        self.history_mut(bot).clear();
    }

    pub fn is_empty(&self, bot: BotKind) -> bool {
        self.history(bot).is_empty()
    }

    /// Number of user turns in a bot's history; shown as the tab badge.
    pub fn question_count(&self, bot: BotKind) -> usize {
        self.history(bot)
            .iter()
            .filter(|message| message.role == Role::User)
            .count()
    }

    fn history_mut(&mut self, bot: BotKind) -> &mut VecDeque<Message> {
        match bot {
            BotKind::Business => &mut self.business,
            BotKind::Healthcare => &mut self.healthcare,
        }
    }
}
