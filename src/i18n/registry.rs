//! Locale registry: single source of truth for the locales the skill speaks.
//!
//! Built once behind a `OnceLock` on first access and immutable afterwards,
//! so translation tables are safe for unlimited concurrent readers.

use crate::i18n::strings::{SkillStrings, ARABIC_STRINGS, ENGLISH_STRINGS, FRENCH_STRINGS};
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale tag as the platform sends it (e.g. "en-US").
    pub tag: &'static str,

    /// English name of the locale's language.
    pub name: &'static str,

    /// Whether unmapped or missing tags resolve to this locale.
    /// Exactly one locale carries the flag.
    pub is_default: bool,

    /// Localized strings for this locale.
    pub strings: &'static SkillStrings,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Look up a locale by its exact tag.
    pub fn get_by_tag(&self, tag: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.tag == tag)
    }

    /// Translation table for the given tag, falling back to the default
    /// locale's table when the tag is unmapped. Exact string match, no tag
    /// normalization, never fails.
    pub fn resolve(&self, tag: &str) -> &'static SkillStrings {
        self.get_by_tag(tag)
            .map(|locale| locale.strings)
            .unwrap_or_else(|| self.default_locale().strings)
    }

    /// The default locale's configuration.
    ///
    /// # Panics
    /// Panics if no locale is flagged as default; `default_locales` always
    /// flags one, so this cannot happen for the built-in table.
    pub fn default_locale(&self) -> &LocaleConfig {
        self.locales
            .iter()
            .find(|locale| locale.is_default)
            .expect("No default locale found in registry")
    }

    /// Tags of every supported locale, in registration order.
    pub fn supported_tags(&self) -> Vec<&'static str> {
        self.locales.iter().map(|locale| locale.tag).collect()
    }
}

/// The built-in locale table.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            tag: "en-US",
            name: "English",
            is_default: true,
            strings: &ENGLISH_STRINGS,
        },
        LocaleConfig {
            tag: "fr-FR",
            name: "French",
            is_default: false,
            strings: &FRENCH_STRINGS,
        },
        LocaleConfig {
            tag: "ar-SA",
            name: "Arabic",
            is_default: false,
            strings: &ARABIC_STRINGS,
        },
    ]
}
