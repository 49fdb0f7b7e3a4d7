use crate::config::FolioConfig;
use crate::listing::ListingMode;
use crate::navigator::Navigator;
use crate::store::KeyValueStore;
use crate::views::{self, Screen};
use std::path::PathBuf;

pub mod bookmark;
pub mod config;
pub mod contents;
pub mod open;
pub mod resume;
pub mod step;

#[derive(Debug, Clone)]
pub struct FolioPaths {
    /// Holds config.json and the key-value store files.
    pub data_dir: PathBuf,
}

impl FolioPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub screen: Option<Screen>,
    pub config: Option<FolioConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }
}

fn reading_screen<S: KeyValueStore>(nav: &Navigator<S>) -> Screen {
    Screen::Reading(views::reading_view(nav))
}

fn contents_screen<S: KeyValueStore>(nav: &Navigator<S>, mode: ListingMode) -> Screen {
    Screen::Contents(views::contents_view(nav, mode))
}
