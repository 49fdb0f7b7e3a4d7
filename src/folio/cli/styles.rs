use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const BOOK_TITLE: &str = "book_title";
    pub const LABEL: &str = "label";
    pub const CHAPTER: &str = "chapter";
    pub const TITLE: &str = "title";
    pub const LOCATOR: &str = "locator";
    pub const BOOKMARK: &str = "bookmark";
    pub const LAST_READ: &str = "last_read";
    pub const HINT: &str = "hint";
    pub const RULE: &str = "rule";
    pub const TEXT: &str = "text";
    pub const NOTE: &str = "note";
    pub const HIGHLIGHT: &str = "highlight";
    pub const PROGRESS: &str = "progress";
    pub const SIZE: &str = "size";
    pub const SIZE_ACTIVE: &str = "size_active";
}

pub static FOLIO_THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    HashMap::from([
        (names::BOOK_TITLE, Style::new().bold().underlined()),
        (names::LABEL, Style::new().cyan().dim()),
        (names::CHAPTER, Style::new().bold()),
        (names::TITLE, Style::new().yellow().bold()),
        (names::LOCATOR, Style::new().dim()),
        (names::BOOKMARK, Style::new().yellow()),
        (names::LAST_READ, Style::new().green()),
        (names::HINT, Style::new().color256(246).italic()),
        (names::RULE, Style::new().dim()),
        (names::TEXT, Style::new()),
        (names::NOTE, Style::new().cyan().italic()),
        (names::HIGHLIGHT, Style::new().black().on_yellow()),
        (names::PROGRESS, Style::new().green()),
        (names::SIZE, Style::new().dim()),
        (names::SIZE_ACTIVE, Style::new().bold().reverse()),
    ])
});

/// Applies the named style. Unknown names leave the text untouched.
pub fn apply(name: &str, text: &str, use_color: bool) -> String {
    match FOLIO_THEME.get(name) {
        Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
        _ => text.to_string(),
    }
}
