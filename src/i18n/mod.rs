//! Internationalization (i18n) module for the skill's spoken strings.
//!
//! All locale metadata, localized strings, and resolution logic lives here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales; resolution
//!   with default-locale fallback
//! - `strings`: Message keys and the localized string tables
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::LocaleRegistry;
//!
//! // Table for a supported locale
//! let french = LocaleRegistry::get().resolve("fr-FR");
//!
//! // Unmapped tags fall back to the default locale (en-US)
//! let fallback = LocaleRegistry::get().resolve("de-DE");
//! ```

mod registry;
mod strings;

pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::{MessageKey, SkillStrings};
