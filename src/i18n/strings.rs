/// Keys for the localized strings the skill's handlers speak.
///
/// The wire form (`as_key`) is what handlers pass to the request context's
/// `t()` lookup; an unknown key string echoes back unchanged instead of
/// failing, so the keys round-trip through `from_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Welcome,
    Help,
    Goodbye,
}

impl MessageKey {
    pub const fn as_key(&self) -> &'static str {
        match self {
            MessageKey::Welcome => "WELCOME",
            MessageKey::Help => "HELP",
            MessageKey::Goodbye => "GOODBYE",
        }
    }

    pub fn from_key(key: &str) -> Option<MessageKey> {
        match key {
            "WELCOME" => Some(MessageKey::Welcome),
            "HELP" => Some(MessageKey::Help),
            "GOODBYE" => Some(MessageKey::Goodbye),
            _ => None,
        }
    }
}

/// All localized user-facing strings for a locale.
#[derive(Debug, Clone)]
pub struct SkillStrings {
    /// Greeting spoken on LaunchRequest.
    pub welcome: &'static str,

    /// Spoken for AMAZON.HelpIntent.
    pub help: &'static str,

    /// Spoken for AMAZON.CancelIntent and AMAZON.StopIntent.
    pub goodbye: &'static str,
}

impl SkillStrings {
    pub fn get(&self, key: MessageKey) -> &'static str {
        match key {
            MessageKey::Welcome => self.welcome,
            MessageKey::Help => self.help,
            MessageKey::Goodbye => self.goodbye,
        }
    }
}

// ==================== English (en-US) Strings ====================

/// English strings (default locale).
pub const ENGLISH_STRINGS: SkillStrings = SkillStrings {
    welcome: "Hi, I am Tecorb Alex. You can ask me anything!",
    help: "You can ask for help. What would you like to do?",
    goodbye: "Goodbye!",
};

// ==================== French (fr-FR) Strings ====================

/// French strings.
pub const FRENCH_STRINGS: SkillStrings = SkillStrings {
    welcome: "Bonjour, je suis Alex Alex. Vous pouvez me poser une question !",
    help: "Vous pouvez demander de l'aide. Que voulez-vous faire ?",
    goodbye: "Au revoir !",
};

// ==================== Arabic (ar-SA) Strings ====================

/// Arabic strings.
pub const ARABIC_STRINGS: SkillStrings = SkillStrings {
    welcome: "مرحبًا، أنا تيكورب جارفيس. يمكنك أن تسألني أي شيء!",
    help: "يمكنك طلب المساعدة. ماذا تريد أن تفعل؟",
    goodbye: "مع السلامة!",
};
