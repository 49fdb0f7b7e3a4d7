//! Snapshots handed to presentation code.
//!
//! Views hold owned, serializable copies of what a screen needs. They are
//! rebuilt from the [`Navigator`] after every intent and never written back.

use crate::listing::ListingMode;
use crate::locator::SectionLocator;
use crate::model::Paragraph;
use crate::navigator::Navigator;
use crate::store::KeyValueStore;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SectionEntry {
    pub id: String,
    pub chapter_id: String,
    /// User-facing locator, e.g. `"1.2"`.
    pub locator: String,
    pub title: String,
    pub bookmarked: bool,
    pub last_read: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChapterEntry {
    pub id: String,
    pub number: u32,
    pub label: String,
    pub title: String,
    pub is_intro: bool,
    pub sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentsView {
    pub book_title: String,
    pub mode: ListingMode,
    pub chapters: Vec<ChapterEntry>,
    /// Size of the stored bookmark set, stale ids included.
    pub bookmark_count: usize,
    pub continue_label: String,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadingView {
    pub chapter_id: String,
    pub chapter_label: String,
    pub chapter_heading: String,
    pub section_id: String,
    pub section_title: String,
    pub display_title: String,
    pub locator: String,
    pub paragraphs: Vec<Paragraph>,
    pub bookmarked: bool,
    pub ordinal: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl ReadingView {
    /// Fraction of the book reached, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.ordinal as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    Contents(ContentsView),
    Reading(ReadingView),
}

pub fn contents_view<S: KeyValueStore>(nav: &Navigator<S>, mode: ListingMode) -> ContentsView {
    let book = nav.book();
    let last_read = nav.last_read();

    let chapters: Vec<ChapterEntry> = nav
        .listing(mode)
        .into_iter()
        .map(|listing| {
            let chapter = listing.chapter;
            let sections = listing
                .sections
                .iter()
                .map(|section| {
                    let locator = book
                        .find(&chapter.id, &section.id)
                        .map(|pos| SectionLocator::ordinal_of(book, pos).to_string())
                        .unwrap_or_default();
                    SectionEntry {
                        id: section.id.clone(),
                        chapter_id: chapter.id.clone(),
                        locator,
                        title: section.title.clone(),
                        bookmarked: nav.is_bookmarked(&section.id),
                        last_read: last_read.is_some_and(|lr| lr.section_id == section.id),
                    }
                })
                .collect();
            ChapterEntry {
                id: chapter.id.clone(),
                number: chapter.number,
                label: chapter.label(),
                title: chapter.title.clone(),
                is_intro: chapter.is_intro(),
                sections,
            }
        })
        .collect();

    let empty_message = chapters.is_empty().then(|| match mode {
        ListingMode::All => "The book is empty.".to_string(),
        ListingMode::Bookmarks => "No bookmarks yet.".to_string(),
    });

    ContentsView {
        book_title: book.title.clone(),
        mode,
        chapters,
        bookmark_count: nav.bookmarks().len(),
        continue_label: nav.continue_label(),
        empty_message,
    }
}

pub fn reading_view<S: KeyValueStore>(nav: &Navigator<S>) -> ReadingView {
    let book = nav.book();
    let pos = nav.position();
    let chapter = nav.current_chapter();
    let section = nav.current_section();
    let ordinal = book.ordinal(pos);
    let total = book.section_count();

    ReadingView {
        chapter_id: chapter.id.clone(),
        chapter_label: chapter.label(),
        chapter_heading: chapter.heading(),
        section_id: section.id.clone(),
        section_title: section.title.clone(),
        display_title: section.display_title().to_string(),
        locator: SectionLocator::ordinal_of(book, pos).to_string(),
        paragraphs: section.content.iter().map(|p| Paragraph::parse(p)).collect(),
        bookmarked: nav.is_bookmarked(&section.id),
        ordinal,
        total,
        has_prev: book.prev_position(pos).is_some(),
        has_next: book.next_position(pos).is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;
    use crate::book::Book;
    use crate::locator::SectionLocator;
    use crate::test_utils::{chapter, example_book, gapped_book, section};

    #[test]
    fn contents_view_flags_bookmarks_and_last_read() {
        let mut nav = Navigator::new(example_book(), MemStore::new());
        nav.select_section("c1", "s2");
        nav.toggle_bookmark("s1");
        nav.toggle_bookmark("stale");
        nav.back_to_contents();

        let view = contents_view(&nav, ListingMode::All);
        assert_eq!(view.chapters.len(), 2);
        assert_eq!(view.bookmark_count, 2);
        assert_eq!(view.continue_label, "B");
        assert!(view.empty_message.is_none());

        let c1 = &view.chapters[1];
        assert_eq!(c1.label, "CHAPTER 1");
        assert_eq!(c1.sections[0].locator, "1.1");
        assert!(c1.sections[0].bookmarked);
        assert!(!c1.sections[0].last_read);
        assert!(c1.sections[1].last_read);
        assert_eq!(view.chapters[0].sections[0].locator, "0.1");
    }

    #[test]
    fn empty_bookmark_listing_has_message() {
        let nav = Navigator::new(example_book(), MemStore::new());
        let view = contents_view(&nav, ListingMode::Bookmarks);
        assert!(view.chapters.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some("No bookmarks yet."));
    }

    #[test]
    fn reading_view_reports_progress_and_notes() {
        let mut nav = Navigator::new(gapped_book(), MemStore::new());
        nav.select_section("c", "c2");
        let view = reading_view(&nav);

        assert_eq!(view.display_title, "C two");
        assert_eq!(view.chapter_heading, "2. Chapter c");
        assert_eq!(view.ordinal, 4);
        assert_eq!(view.total, 5);
        assert!(view.has_prev && view.has_next);
        assert!(view.paragraphs[1].is_note());
        assert!((view.progress() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn reading_view_has_next_respects_empty_chapter() {
        let mut nav = Navigator::new(gapped_book(), MemStore::new());
        nav.select_section("a", "a2");
        let view = reading_view(&nav);
        assert!(view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn contents_locators_open_the_listed_section() {
        let book = Book::new(
            "Two intros",
            vec![
                chapter("pre", 0, vec![section("p1", "Preface")]),
                chapter("fore", 0, vec![section("f1", "Foreword")]),
                chapter("one", 1, vec![section("o1", "One")]),
            ],
        )
        .unwrap();
        let nav = Navigator::new(book, MemStore::new());
        let view = contents_view(&nav, ListingMode::All);

        let listed: Vec<_> = view.chapters.iter().flat_map(|c| &c.sections).collect();
        assert_eq!(listed[1].locator, "2");
        assert_eq!(listed[2].locator, "1.1");
        for entry in listed {
            let pos = entry
                .locator
                .parse::<SectionLocator>()
                .unwrap()
                .resolve(nav.book())
                .unwrap();
            assert_eq!(nav.book().section(pos).unwrap().id, entry.id);
        }
    }
}
