//! Read-only projections the table of contents needs.
//!
//! Both are plain functions of the current state and are recomputed on
//! every call; nothing is cached.

use crate::book::Book;
use crate::error::FolioError;
use crate::model::{Bookmarks, Chapter, LastRead, Section};
use serde::Serialize;
use std::str::FromStr;

/// Label used when there is nothing at all to resume.
pub const CONTINUE_PLACEHOLDER: &str = "Start reading";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    #[default]
    All,
    Bookmarks,
}

impl FromStr for ListingMode {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ListingMode::All),
            "bookmarks" | "bookmarked" => Ok(ListingMode::Bookmarks),
            other => Err(FolioError::Api(format!("Unknown listing mode: {}", other))),
        }
    }
}

/// A chapter together with the sections that passed the listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterListing<'a> {
    pub chapter: &'a Chapter,
    pub sections: Vec<&'a Section>,
}

/// Title for the "continue" button.
///
/// The last-read section's title when it still exists, else the first
/// section of the book, else [`CONTINUE_PLACEHOLDER`].
pub fn continue_label(book: &Book, last_read: Option<&LastRead>) -> String {
    last_read
        .and_then(|lr| book.find(&lr.chapter_id, &lr.section_id))
        .or_else(|| Some(book.first_position()))
        .and_then(|pos| book.section(pos))
        .map(|section| section.title.clone())
        .unwrap_or_else(|| CONTINUE_PLACEHOLDER.to_string())
}

/// Chapters with their visible sections.
///
/// In `All` mode every chapter is listed with all its sections, even a
/// chapter with none. In `Bookmarks` mode only bookmarked sections are kept
/// and chapters left empty are dropped.
pub fn filtered_listing<'a>(
    book: &'a Book,
    bookmarks: &Bookmarks,
    mode: ListingMode,
) -> Vec<ChapterListing<'a>> {
    book.chapters
        .iter()
        .map(|chapter| ChapterListing {
            chapter,
            sections: chapter
                .sections
                .iter()
                .filter(|s| mode == ListingMode::All || bookmarks.contains(&s.id))
                .collect(),
        })
        .filter(|listing| mode == ListingMode::All || !listing.sections.is_empty())
        .collect()
}
