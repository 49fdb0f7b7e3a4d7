//! # Content Tree
//!
//! A [`Book`] is the static, ordered hierarchy the reader walks:
//! chapters, each holding sections, each holding paragraph strings.
//! It is built once at startup by one of the loaders below and never
//! mutated afterwards.
//!
//! ## Sources
//!
//! - [`Book::embedded`]: the default book compiled into the binary.
//! - [`Book::from_json`]: `{"title": ..., "chapters": [...]}` or a bare
//!   array of chapters.
//! - [`Book::from_markdown`]: see [`markdown`] for the heading conventions.
//! - [`Book::load`]: picks one of the above from a file extension.
//!
//! Every loader validates the tree, so the rest of the crate can rely on
//! there being a first chapter with a first section and on ids being unique.

use crate::error::{FolioError, Result};
use crate::model::{Chapter, Position, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub mod markdown;

const EMBEDDED_BOOK: &str = include_str!("default_book.md");
const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BookFile {
    Full(Book),
    Chapters(Vec<Chapter>),
}

impl Book {
    /// Builds and validates a book from already-parsed parts.
    pub fn new(title: impl Into<String>, chapters: Vec<Chapter>) -> Result<Self> {
        let book = Self {
            title: title.into(),
            chapters,
        };
        book.validate()?;
        Ok(book)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_markdown(EMBEDDED_BOOK)
    }

    pub fn from_json(source: &str) -> Result<Self> {
        match serde_json::from_str::<BookFile>(source)? {
            BookFile::Full(book) => Self::new(book.title, book.chapters),
            BookFile::Chapters(chapters) => Self::new(UNTITLED, chapters),
        }
    }

    pub fn from_markdown(source: &str) -> Result<Self> {
        let (title, chapters) = markdown::parse(source);
        Self::new(title.unwrap_or_else(|| UNTITLED.to_string()), chapters)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let source = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading book");
        match ext.as_str() {
            "json" => Self::from_json(&source),
            "md" | "markdown" => Self::from_markdown(&source),
            _ => Err(FolioError::Book(format!(
                "unsupported book format: {} (expected .json or .md)",
                path.display()
            ))),
        }
    }

    fn validate(&self) -> Result<()> {
        let first = self
            .chapters
            .first()
            .ok_or_else(|| FolioError::Book("book has no chapters".to_string()))?;
        if first.sections.is_empty() {
            return Err(FolioError::Book(format!(
                "first chapter '{}' has no sections",
                first.id
            )));
        }

        let mut chapter_ids = HashSet::new();
        let mut section_ids = HashSet::new();
        for chapter in &self.chapters {
            if !chapter_ids.insert(chapter.id.as_str()) {
                return Err(FolioError::Book(format!(
                    "duplicate chapter id '{}'",
                    chapter.id
                )));
            }
            for section in &chapter.sections {
                if !section_ids.insert(section.id.as_str()) {
                    return Err(FolioError::Book(format!(
                        "duplicate section id '{}'",
                        section.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn first_position(&self) -> Position {
        Position::new(0, 0)
    }

    pub fn chapter(&self, pos: Position) -> Option<&Chapter> {
        self.chapters.get(pos.chapter)
    }

    pub fn section(&self, pos: Position) -> Option<&Section> {
        self.chapter(pos)
            .and_then(|chapter| chapter.sections.get(pos.section))
    }

    /// Locates a (chapter, section) id pair. The section must belong to that
    /// chapter; a matching section id under another chapter does not count.
    pub fn find(&self, chapter_id: &str, section_id: &str) -> Option<Position> {
        let ci = self.chapters.iter().position(|c| c.id == chapter_id)?;
        let si = self.chapters[ci]
            .sections
            .iter()
            .position(|s| s.id == section_id)?;
        Some(Position::new(ci, si))
    }

    pub fn position_of_section(&self, section_id: &str) -> Option<Position> {
        self.positions()
            .find(|pos| self.section(*pos).is_some_and(|s| s.id == section_id))
    }

    /// Every (chapter, section) position in reading order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.chapters
            .iter()
            .enumerate()
            .flat_map(|(ci, chapter)| (0..chapter.sections.len()).map(move |si| Position::new(ci, si)))
    }

    pub fn section_count(&self) -> usize {
        self.chapters.iter().map(|c| c.sections.len()).sum()
    }

    /// 1-based place of `pos` in reading order.
    pub fn ordinal(&self, pos: Position) -> usize {
        let before: usize = self.chapters[..pos.chapter.min(self.chapters.len())]
            .iter()
            .map(|c| c.sections.len())
            .sum();
        before + pos.section + 1
    }

    /// Section after `pos` in reading order.
    ///
    /// At the end of a chapter this is the first section of the next
    /// chapter. If that chapter has no sections there is no next position:
    /// the walk stops rather than skipping ahead to later chapters.
    pub fn next_position(&self, pos: Position) -> Option<Position> {
        let chapter = self.chapters.get(pos.chapter)?;
        if pos.section + 1 < chapter.sections.len() {
            return Some(Position::new(pos.chapter, pos.section + 1));
        }
        let next = self.chapters.get(pos.chapter + 1)?;
        (!next.sections.is_empty()).then(|| Position::new(pos.chapter + 1, 0))
    }

    /// Mirror of [`Book::next_position`]: the last section of the previous
    /// chapter when `pos` opens its chapter.
    pub fn prev_position(&self, pos: Position) -> Option<Position> {
        if pos.section > 0 {
            return Some(Position::new(pos.chapter, pos.section - 1));
        }
        let prev = self.chapters.get(pos.chapter.checked_sub(1)?)?;
        prev.sections
            .len()
            .checked_sub(1)
            .map(|last| Position::new(pos.chapter - 1, last))
    }

    /// Inverse of [`Book::ordinal`].
    pub fn position_at_ordinal(&self, ordinal: usize) -> Option<Position> {
        ordinal
            .checked_sub(1)
            .and_then(|n| self.positions().nth(n))
    }
}
