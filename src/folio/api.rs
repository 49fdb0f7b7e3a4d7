//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! every client, whether it runs one command per process or keeps a
//! session open.
//!
//! The facade:
//! - **Normalizes inputs**: user-typed locators become [`SectionLocator`]s
//! - **Dispatches** to the matching `commands::*::run`
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! Business logic lives in the commands and the [`Navigator`]; formatting
//! lives in the CLI.
//!
//! `FolioApi<S: KeyValueStore>` is generic over the store backend:
//! `FolioApi<FileStore>` in production, `FolioApi<MemStore>` in tests.

use crate::book::Book;
use crate::commands::{self, step::Direction};
use crate::error::Result;
use crate::listing::ListingMode;
use crate::locator::SectionLocator;
use crate::navigator::Navigator;
use crate::store::KeyValueStore;

pub struct FolioApi<S: KeyValueStore> {
    navigator: Navigator<S>,
    paths: commands::FolioPaths,
    /// Listing mode the contents screen was last shown in; `back` returns to it.
    mode: ListingMode,
}

impl<S: KeyValueStore> FolioApi<S> {
    pub fn new(book: Book, store: S, paths: commands::FolioPaths) -> Self {
        Self {
            navigator: Navigator::new(book, store),
            paths,
            mode: ListingMode::default(),
        }
    }

    pub fn contents(&mut self, mode: ListingMode) -> Result<commands::CmdResult> {
        self.mode = mode;
        commands::contents::run(&mut self.navigator, mode)
    }

    pub fn back(&mut self) -> Result<commands::CmdResult> {
        commands::contents::run(&mut self.navigator, self.mode)
    }

    pub fn open(&mut self, locator: &str) -> Result<commands::CmdResult> {
        let locator: SectionLocator = locator.parse()?;
        commands::open::run(&mut self.navigator, &locator)
    }

    pub fn next(&mut self) -> Result<commands::CmdResult> {
        commands::step::run(&mut self.navigator, Direction::Next)
    }

    pub fn prev(&mut self) -> Result<commands::CmdResult> {
        commands::step::run(&mut self.navigator, Direction::Prev)
    }

    pub fn resume(&mut self) -> Result<commands::CmdResult> {
        commands::resume::run(&mut self.navigator)
    }

    pub fn toggle_bookmark(&mut self, locator: Option<&str>) -> Result<commands::CmdResult> {
        let locator = locator.map(str::parse::<SectionLocator>).transpose()?;
        commands::bookmark::run(&mut self.navigator, locator.as_ref())
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn navigator(&self) -> &Navigator<S> {
        &self.navigator
    }

    pub fn paths(&self) -> &commands::FolioPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, FolioPaths, MessageLevel};
