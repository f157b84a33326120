use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp used in events and session records.
pub type Timestamp = DateTime<Utc>;

// =============================================================================
// Enums
// =============================================================================

/// Interface language selected at the start of each search cycle.
///
/// Governs prompt text, category button labels, and the encyclopedia
/// edition queried for the rest of the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Uzbek.
    Uz,
    /// Russian.
    Ru,
    /// English.
    En,
}

impl Language {
    /// All languages the system knows about, in menu order.
    pub const ALL: [Language; 3] = [Language::Uz, Language::Ru, Language::En];

    /// Stable language code used in configuration and message catalogs.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Uz => "uz",
            Language::Ru => "ru",
            Language::En => "eng",
        }
    }

    /// Subdomain of the encyclopedia edition for this language.
    pub fn wiki_subdomain(&self) -> &'static str {
        match self {
            Language::Uz => "uz",
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Menu label shown on the language selection keyboard.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Uz => "O'zbekcha 🇺🇿",
            Language::Ru => "Русский 🇷🇺",
            Language::En => "English 🇺🇸",
        }
    }

    /// Look up a language by its configuration code.
    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.iter().copied().find(|l| l.code() == code)
    }

    /// Parse a user-supplied token into a language.
    ///
    /// Accepts the menu labels (with or without the flag suffix) and the
    /// bare configuration codes. Returns `None` for anything else; the
    /// caller decides whether to re-prompt.
    pub fn parse(token: &str) -> Option<Language> {
        let token = token.trim();
        if token.contains("O'zbekcha") || token.contains("Oʻzbekcha") {
            return Some(Language::Uz);
        }
        if token.contains("Русский") {
            return Some(Language::Ru);
        }
        if token.contains("English") {
            return Some(Language::En);
        }
        Language::from_code(&token.to_lowercase())
    }
}

/// Language-independent grouping of the material category the user picked.
///
/// Decided once when the category is collected, so downstream query logic
/// never matches against localized display strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryClass {
    /// Articles and anything unrecognized. No query augmentation.
    Article,
    /// Books: queries get a PDF/EPUB file-type hint.
    Book,
    /// Presentations: queries get a PPT/PPTX file-type hint.
    Presentation,
    /// Video clips: queries are restricted to the video platform.
    Video,
}

impl CategoryClass {
    /// Classify free-form category text into a stable class.
    ///
    /// Matches the category button labels of every supported language by
    /// case-insensitive substring, so a localized label or a close variant
    /// of one lands in the right class. Unmatched text is article-like.
    pub fn classify(text: &str) -> CategoryClass {
        let lowered = text.to_lowercase();
        const BOOK: [&str; 3] = ["kitob", "книга", "book"];
        const PRESENTATION: [&str; 3] = ["prezentatsiya", "презентация", "presentation"];
        const VIDEO: [&str; 2] = ["video", "видео"];
        if BOOK.iter().any(|m| lowered.contains(m)) {
            CategoryClass::Book
        } else if PRESENTATION.iter().any(|m| lowered.contains(m)) {
            CategoryClass::Presentation
        } else if VIDEO.iter().any(|m| lowered.contains(m)) {
            CategoryClass::Video
        } else {
            CategoryClass::Article
        }
    }
}

/// Which search backend executes queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Free-text web search (no credentials).
    FreeText,
    /// Keyed paid search API (requires api_key + context_id).
    PaidApi,
    /// Encyclopedia summary lookup on the raw topic.
    Encyclopedia,
}

impl ProviderKind {
    /// Stable name used in configuration and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::FreeText => "free-text",
            ProviderKind::PaidApi => "paid-api",
            ProviderKind::Encyclopedia => "encyclopedia",
        }
    }

    /// Parse a configuration/CLI token.
    pub fn from_str_opt(s: &str) -> Option<ProviderKind> {
        match s {
            "free-text" => Some(ProviderKind::FreeText),
            "paid-api" => Some(ProviderKind::PaidApi),
            "encyclopedia" => Some(ProviderKind::Encyclopedia),
            _ => None,
        }
    }
}

// =============================================================================
// Search outcomes
// =============================================================================

/// A single result returned by a provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title as reported by the provider.
    pub title: String,
    /// Canonical link to the result.
    pub link: String,
}

/// Why a search produced no results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// The provider returned no usable items.
    NoMatches,
    /// The paid provider reported zero total indexed matches, a stronger
    /// signal than an empty items list.
    ZeroIndexed,
}

/// Terminal outcome of one search attempt (or a full fallback sequence).
///
/// Adapters never let provider failures escape as errors; every failure is
/// converted into one of these variants at the adapter boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Ordered results, already capped at the configured maximum.
    Found(Vec<SearchResult>),
    /// No usable result; `reason` distinguishes the zero-indexed case.
    NotFound { reason: NotFoundReason },
    /// The provider failed (transport, parsing, or an error envelope).
    /// The message is for logs; it is never shown to the user raw.
    ProviderError(String),
}

impl Outcome {
    /// Whether this outcome carries results.
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    /// Tag name used in logs and events.
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Found(_) => "found",
            Outcome::NotFound { .. } => "not_found",
            Outcome::ProviderError(_) => "provider_error",
        }
    }
}
