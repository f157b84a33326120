//! Localized prompt catalog.
//!
//! One string table per supported language, keyed by the language selected
//! at the start of the cycle. The language prompt itself is trilingual
//! because no language has been chosen yet when it is shown.

use findly_core::types::Language;

/// Prompt shown in `AwaitingLanguage`, before a language exists.
pub fn language_prompt() -> &'static str {
    "Tilni tanlang / Выберите язык / Select language:"
}

/// Re-prompt after an unrecognized language token.
pub fn invalid_language() -> &'static str {
    "Iltimos, ro'yxatdagi tildan birini tanlang / Пожалуйста, выберите язык из списка / Please pick a language from the list:"
}

/// Labels offered on the language keyboard, in menu order.
pub fn language_options(supported: &[Language]) -> Vec<String> {
    supported.iter().map(|l| l.label().to_string()).collect()
}

/// Subject prompt, shown right after language selection.
pub fn welcome(lang: Language) -> &'static str {
    match lang {
        Language::Uz => "Qaysi fan bo'yicha material izlaymiz?",
        Language::Ru => "По какому предмету ищем материал?",
        Language::En => "What subject are we searching for?",
    }
}

/// Category prompt.
pub fn category_prompt(lang: Language) -> &'static str {
    match lang {
        Language::Uz => "Turini tanlang:",
        Language::Ru => "Выберите тип:",
        Language::En => "Select type:",
    }
}

/// Category button labels, in keyboard order.
pub fn category_buttons(lang: Language) -> [&'static str; 4] {
    match lang {
        Language::Uz => ["Maqola", "Kitob", "Prezentatsiya", "Video"],
        Language::Ru => ["Статья", "Книга", "Презентация", "Видео"],
        Language::En => ["Article", "Book", "Presentation", "Video"],
    }
}

/// Topic prompt.
pub fn topic_prompt(lang: Language) -> &'static str {
    match lang {
        Language::Uz => "Mavzu nomini kiriting:",
        Language::Ru => "Введите название темы:",
        Language::En => "Enter the topic name:",
    }
}

/// Progress message a transport may show while the search runs.
pub fn searching(lang: Language) -> &'static str {
    match lang {
        Language::Uz => "🔍 Qidirilmoqda...",
        Language::Ru => "🔍 Поиск...",
        Language::En => "🔍 Searching...",
    }
}

/// Ordinary not-found message.
pub fn not_found(lang: Language) -> &'static str {
    match lang {
        Language::Uz => "Ma'lumot topilmadi. Boshqacharoq yozib ko'ring.",
        Language::Ru => "Информация не найдена. Попробуйте другой запрос.",
        Language::En => "Information not found. Try a different query.",
    }
}

/// Distinct diagnostic for the paid provider's zero-indexed outcome.
pub fn zero_indexed(lang: Language) -> &'static str {
    match lang {
        Language::Uz => "Bu so'rov bo'yicha indeksda umuman hech narsa yo'q. Boshqa so'zlar bilan urinib ko'ring.",
        Language::Ru => "По этому запросу в индексе нет ни одного совпадения. Попробуйте другие слова.",
        Language::En => "The index reports no matches at all for this query. Try different wording.",
    }
}
