//! Reading-view preferences.
//!
//! These belong to whoever draws the reading screen. The [`Navigator`]
//! never sees them and they are not persisted through the key-value store;
//! only the default [`FontSize`] lives in the config file.
//!
//! [`Navigator`]: crate::navigator::Navigator

use crate::error::FolioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
    #[serde(rename = "xl", alias = "extralarge")]
    ExtraLarge,
}

impl FontSize {
    pub const ALL: [FontSize; 4] = [
        FontSize::Small,
        FontSize::Normal,
        FontSize::Large,
        FontSize::ExtraLarge,
    ];

    /// Column width paragraphs are wrapped to. Bigger type, shorter lines.
    pub fn wrap_width(self) -> usize {
        match self {
            FontSize::Small => 88,
            FontSize::Normal => 72,
            FontSize::Large => 60,
            FontSize::ExtraLarge => 48,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Large => "large",
            FontSize::ExtraLarge => "xl",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontSize {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" | "s" => Ok(FontSize::Small),
            "normal" | "m" => Ok(FontSize::Normal),
            "large" | "l" => Ok(FontSize::Large),
            "xl" | "extralarge" | "extra-large" => Ok(FontSize::ExtraLarge),
            other => Err(FolioError::Config(format!(
                "Unknown font size: {} (expected small, normal, large or xl)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderPrefs {
    pub font_size: FontSize,
    pub font_menu_open: bool,
    /// Index into the current section's paragraphs.
    pub highlighted: Option<usize>,
}

impl ReaderPrefs {
    pub fn new(font_size: FontSize) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    /// Highlights paragraph `index`, or clears it if it was already the
    /// highlighted one.
    pub fn toggle_highlight(&mut self, index: usize) {
        self.highlighted = match self.highlighted {
            Some(current) if current == index => None,
            _ => Some(index),
        };
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    pub fn toggle_font_menu(&mut self) {
        self.font_menu_open = !self.font_menu_open;
    }

    pub fn close_font_menu(&mut self) {
        self.font_menu_open = false;
    }

    /// Picking a size also closes the picker.
    pub fn set_font_size(&mut self, size: FontSize) {
        self.font_size = size;
        self.font_menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_sizes_parse_and_print() {
        assert_eq!("Large".parse::<FontSize>().unwrap(), FontSize::Large);
        assert_eq!("xl".parse::<FontSize>().unwrap(), FontSize::ExtraLarge);
        assert_eq!("s".parse::<FontSize>().unwrap(), FontSize::Small);
        assert!("huge".parse::<FontSize>().is_err());
        for size in FontSize::ALL {
            assert_eq!(size.to_string().parse::<FontSize>().unwrap(), size);
        }
    }

    #[test]
    fn larger_sizes_wrap_narrower() {
        let widths: Vec<usize> = FontSize::ALL.iter().map(|s| s.wrap_width()).collect();
        assert!(widths.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn highlight_toggles_off_on_second_tap() {
        let mut prefs = ReaderPrefs::default();
        prefs.toggle_highlight(2);
        assert_eq!(prefs.highlighted, Some(2));
        prefs.toggle_highlight(0);
        assert_eq!(prefs.highlighted, Some(0));
        prefs.toggle_highlight(0);
        assert_eq!(prefs.highlighted, None);
    }

    #[test]
    fn choosing_a_size_closes_menu() {
        let mut prefs = ReaderPrefs::new(FontSize::Small);
        prefs.toggle_font_menu();
        assert!(prefs.font_menu_open);
        prefs.set_font_size(FontSize::Large);
        assert_eq!(prefs.font_size, FontSize::Large);
        assert!(!prefs.font_menu_open);
    }
}
