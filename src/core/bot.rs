//! The two assistants exposed by the QA backend.
//!
//! Everything per-bot (wire name, labels, greeting copy) lives in one
//! keyed table so UI code can look presentation data up instead of
//! branching on the bot kind.

/// Which assistant a message or request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotKind {
    Business,
    Healthcare,
}

/// Static per-bot data. Accent colors live in the theme, keyed by
/// [`BotKind`], so profiles stay free of presentation types.
pub struct BotProfile {
    pub kind: BotKind,
    /// Name used in wire payloads (`botType`) and config files.
    pub wire_name: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// Heading shown in the empty-state greeting.
    pub greeting_title: &'static str,
    /// Prompt copy shown before the first message.
    pub greeting: &'static str,
}

pub const BOT_PROFILES: [BotProfile; 2] = [
    BotProfile {
        kind: BotKind::Business,
        wire_name: "business",
        label: "Business",
        icon: "🏢",
        greeting_title: "Business Assistant",
        greeting: "Ask me about services, pricing, company information, and business inquiries.",
    },
    BotProfile {
        kind: BotKind::Healthcare,
        wire_name: "healthcare",
        label: "Healthcare",
        icon: "♥",
        greeting_title: "Healthcare Assistant",
        greeting: "Ask me about health topics, symptoms, treatments, and medical information. \
                   (Educational purposes only)",
    },
];

impl BotKind {
    pub fn all() -> impl Iterator<Item = BotKind> {
        BOT_PROFILES.iter().map(|profile| profile.kind)
    }

    pub fn profile(self) -> &'static BotProfile {
        BOT_PROFILES
            .iter()
            .find(|profile| profile.kind == self)
            .expect("every bot kind has a profile entry")
    }

    pub fn wire_name(self) -> &'static str {
        self.profile().wire_name
    }

    pub fn from_wire_name(name: &str) -> Option<BotKind> {
        BOT_PROFILES
            .iter()
            .find(|profile| profile.wire_name == name)
            .map(|profile| profile.kind)
    }

    /// The other tab; drives the bot-switch key.
    pub fn toggled(self) -> BotKind {
        match self {
            BotKind::Business => BotKind::Healthcare,
            BotKind::Healthcare => BotKind::Business,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for kind in BotKind::all() {
            assert_eq!(BotKind::from_wire_name(kind.wire_name()), Some(kind));
        }
    }

    #[test]
    fn unknown_wire_names_are_rejected() {
        assert_eq!(BotKind::from_wire_name("finance"), None);
        assert_eq!(BotKind::from_wire_name(""), None);
    }

    #[test]
    fn toggling_alternates_between_both_bots() {
        assert_eq!(BotKind::Business.toggled(), BotKind::Healthcare);
        assert_eq!(BotKind::Healthcare.toggled().toggled(), BotKind::Healthcare);
    }

    #[test]
    fn profiles_cover_every_kind() {
        for kind in [BotKind::Business, BotKind::Healthcare] {
            assert_eq!(kind.profile().kind, kind);
        }
    }
}
