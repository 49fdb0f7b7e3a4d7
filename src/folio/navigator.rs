//! # Navigation State Machine
//!
//! [`Navigator`] is the single owner of reading state: which view is shown,
//! which section the reader is on, the bookmark set and the last-read
//! pointer. Presentation code gets snapshots and sends [`Intent`]s back;
//! it never mutates this state directly.
//!
//! ## States
//!
//! ```text
//!              select / continue
//!   Contents ─────────────────────▶ Reading(chapter, section)
//!      ▲                                 │  next / prev / select
//!      └──────────── back ───────────────┘◀─┘
//! ```
//!
//! The cursor always points at a real section. In `Contents` it still
//! holds the first section of the book (or wherever reading stopped),
//! which is what a later `next`/`prev` would step from.
//!
//! ## Write-through
//!
//! Opening any section stores the last-read pointer; toggling a bookmark
//! stores the whole bookmark set. No other operation writes, and no
//! operation writes both. Writes happen inside the call that changes the
//! in-memory value, after the change.
//!
//! ## Stepping
//!
//! See [`Book::next_position`]: stepping crosses chapter boundaries but
//! stops at a chapter with no sections instead of skipping past it.

use crate::book::Book;
use crate::hydrate;
use crate::listing::{self, ChapterListing, ListingMode};
use crate::model::{Bookmarks, Chapter, LastRead, Position, Section, ViewMode};
use crate::store::KeyValueStore;

/// Everything the presentation layer can ask the navigator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Select {
        chapter_id: String,
        section_id: String,
    },
    Back,
    Next,
    Prev,
    ToggleBookmark(String),
    Continue,
}

pub struct Navigator<S: KeyValueStore> {
    book: Book,
    store: S,
    view: ViewMode,
    cursor: Position,
    bookmarks: Bookmarks,
    last_read: Option<LastRead>,
}

impl<S: KeyValueStore> Navigator<S> {
    /// Creates a navigator in the contents view, hydrating bookmarks and
    /// the last-read pointer from `store`.
    pub fn new(book: Book, store: S) -> Self {
        let bookmarks = hydrate::load_bookmarks(&store);
        let last_read = hydrate::load_last_read(&store);
        let cursor = book.first_position();
        Self {
            book,
            store,
            view: ViewMode::Contents,
            cursor,
            bookmarks,
            last_read,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn position(&self) -> Position {
        self.cursor
    }

    pub fn current_chapter(&self) -> &Chapter {
        &self.book.chapters[self.cursor.chapter]
    }

    pub fn current_section(&self) -> &Section {
        &self.current_chapter().sections[self.cursor.section]
    }

    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, section_id: &str) -> bool {
        self.bookmarks.contains(section_id)
    }

    pub fn last_read(&self) -> Option<&LastRead> {
        self.last_read.as_ref()
    }

    /// Position the last-read pointer resolves to in this book, if any.
    pub fn last_read_position(&self) -> Option<Position> {
        self.last_read
            .as_ref()
            .and_then(|lr| self.book.find(&lr.chapter_id, &lr.section_id))
    }

    pub fn continue_label(&self) -> String {
        listing::continue_label(&self.book, self.last_read.as_ref())
    }

    pub fn listing(&self, mode: ListingMode) -> Vec<ChapterListing<'_>> {
        listing::filtered_listing(&self.book, &self.bookmarks, mode)
    }

    /// Opens the section at `pos` and records it as last read.
    ///
    /// Returns `false` without touching state if `pos` is outside the book.
    pub fn open(&mut self, pos: Position) -> bool {
        let Some(section) = self.book.section(pos) else {
            tracing::debug!(?pos, "open ignored, position outside book");
            return false;
        };
        let last_read = LastRead::new(&self.book.chapters[pos.chapter].id, &section.id);
        tracing::debug!(
            chapter = %last_read.chapter_id,
            section = %last_read.section_id,
            "open section"
        );

        self.cursor = pos;
        self.view = ViewMode::Reading;
        hydrate::save_last_read(&self.store, &last_read);
        self.last_read = Some(last_read);
        true
    }

    /// Opens the section `section_id` of chapter `chapter_id`.
    ///
    /// A pair that is not in the book is ignored and reported as `false`.
    pub fn select_section(&mut self, chapter_id: &str, section_id: &str) -> bool {
        match self.book.find(chapter_id, section_id) {
            Some(pos) => self.open(pos),
            None => {
                tracing::debug!(chapter_id, section_id, "select ignored, pair not in book");
                false
            }
        }
    }

    pub fn back_to_contents(&mut self) {
        tracing::debug!("back to contents");
        self.view = ViewMode::Contents;
    }

    /// Steps forward one section. Returns whether anything changed.
    pub fn next_section(&mut self) -> bool {
        if self.view != ViewMode::Reading {
            return false;
        }
        let target = self.book.next_position(self.cursor);
        match target {
            Some(pos) => self.open(pos),
            None => {
                tracing::debug!(cursor = ?self.cursor, "next: no following section");
                false
            }
        }
    }

    /// Steps back one section. Returns whether anything changed.
    pub fn prev_section(&mut self) -> bool {
        if self.view != ViewMode::Reading {
            return false;
        }
        let target = self.book.prev_position(self.cursor);
        match target {
            Some(pos) => self.open(pos),
            None => {
                tracing::debug!(cursor = ?self.cursor, "prev: no preceding section");
                false
            }
        }
    }

    /// Flips the bookmark for `section_id` and persists the whole set.
    /// Returns whether the section is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self, section_id: &str) -> bool {
        let marked = self.bookmarks.toggle(section_id);
        tracing::debug!(section_id, marked, "toggle bookmark");
        hydrate::save_bookmarks(&self.store, &self.bookmarks);
        marked
    }

    /// Reopens the last-read section, or the first section of the book
    /// when there is no pointer or it no longer resolves.
    pub fn continue_reading(&mut self) -> bool {
        let target = match self.last_read_position() {
            Some(pos) => pos,
            None => {
                if self.last_read.is_some() {
                    tracing::debug!(last_read = ?self.last_read, "last-read pointer is stale, starting over");
                }
                self.book.first_position()
            }
        };
        self.open(target)
    }

    /// Applies one intent. Returns whether state changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Select {
                chapter_id,
                section_id,
            } => self.select_section(&chapter_id, &section_id),
            Intent::Back => {
                let changed = self.view != ViewMode::Contents;
                self.back_to_contents();
                changed
            }
            Intent::Next => self.next_section(),
            Intent::Prev => self.prev_section(),
            Intent::ToggleBookmark(section_id) => {
                self.toggle_bookmark(&section_id);
                true
            }
            Intent::Continue => self.continue_reading(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrate::{BOOKMARKS_KEY, LAST_READ_KEY};
    use crate::store::memory::MemStore;
    use crate::test_utils::{example_book, gapped_book};

    fn nav(book: Book) -> Navigator<MemStore> {
        Navigator::new(book, MemStore::new())
    }

    fn here<S: KeyValueStore>(nav: &Navigator<S>) -> (String, String) {
        (
            nav.current_chapter().id.clone(),
            nav.current_section().id.clone(),
        )
    }

    fn pair(c: &str, s: &str) -> (String, String) {
        (c.to_string(), s.to_string())
    }

    #[test]
    fn starts_in_contents_at_first_section() {
        let nav = nav(example_book());
        assert_eq!(nav.view(), ViewMode::Contents);
        assert_eq!(here(&nav), pair("c0", "s0"));
        assert_eq!(nav.last_read(), None);
    }

    #[test]
    fn select_sets_last_read_for_every_pair() {
        let book = example_book();
        let mut nav = nav(book.clone());
        for pos in book.positions() {
            let chapter = &book.chapters[pos.chapter];
            let section = &chapter.sections[pos.section];
            assert!(nav.select_section(&chapter.id, &section.id));
            assert_eq!(nav.view(), ViewMode::Reading);
            assert_eq!(
                nav.last_read(),
                Some(&LastRead::new(&chapter.id, &section.id))
            );
        }
        assert_eq!(nav.store().write_count(LAST_READ_KEY), book.section_count());
        assert_eq!(nav.store().write_count(BOOKMARKS_KEY), 0);
    }

    #[test]
    fn select_unknown_pair_changes_nothing() {
        let mut nav = nav(example_book());
        assert!(!nav.select_section("c0", "s1"));
        assert_eq!(nav.view(), ViewMode::Contents);
        assert_eq!(nav.last_read(), None);
        assert_eq!(nav.store().write_count(LAST_READ_KEY), 0);
    }

    #[test]
    fn next_walks_whole_tree_then_stops() {
        let book = example_book();
        let mut nav = nav(book.clone());
        nav.continue_reading();

        let mut visited = vec![here(&nav)];
        while nav.next_section() {
            visited.push(here(&nav));
        }
        assert_eq!(
            visited,
            vec![pair("c0", "s0"), pair("c1", "s1"), pair("c1", "s2")]
        );

        let writes = nav.store().write_count(LAST_READ_KEY);
        assert!(!nav.next_section());
        assert_eq!(here(&nav), pair("c1", "s2"));
        assert_eq!(nav.store().write_count(LAST_READ_KEY), writes);
    }

    #[test]
    fn next_crosses_chapter_boundary() {
        let mut nav = nav(example_book());
        nav.select_section("c0", "s0");
        assert!(nav.next_section());
        assert_eq!(here(&nav), pair("c1", "s1"));
    }

    #[test]
    fn prev_at_start_is_noop() {
        let mut nav = nav(example_book());
        nav.select_section("c0", "s0");
        assert!(!nav.prev_section());
        assert_eq!(here(&nav), pair("c0", "s0"));
    }

    #[test]
    fn next_then_prev_returns_to_origin() {
        let book = gapped_book();
        let mut nav = nav(book.clone());
        for pos in book.positions() {
            nav.open(pos);
            if nav.next_section() {
                assert!(nav.prev_section());
                assert_eq!(nav.position(), pos);
            }
        }
    }

    #[test]
    fn prev_crosses_into_last_section_of_previous_chapter() {
        let mut nav = nav(example_book());
        nav.select_section("c1", "s1");
        assert!(nav.prev_section());
        assert_eq!(here(&nav), pair("c0", "s0"));
    }

    #[test]
    fn empty_chapter_stops_stepping() {
        let mut nav = nav(gapped_book());

        nav.select_section("a", "a2");
        assert!(!nav.next_section());
        assert_eq!(here(&nav), pair("a", "a2"));

        nav.select_section("c", "c1");
        assert!(!nav.prev_section());
        assert_eq!(here(&nav), pair("c", "c1"));
    }

    #[test]
    fn stepping_is_ignored_in_contents() {
        let mut nav = nav(example_book());
        assert!(!nav.next_section());
        assert!(!nav.prev_section());
        assert_eq!(nav.view(), ViewMode::Contents);
        assert_eq!(nav.store().write_count(LAST_READ_KEY), 0);
    }

    #[test]
    fn back_keeps_position_and_does_not_write() {
        let mut nav = nav(example_book());
        nav.select_section("c1", "s2");
        let writes = nav.store().write_count(LAST_READ_KEY);

        nav.back_to_contents();
        assert_eq!(nav.view(), ViewMode::Contents);
        assert_eq!(here(&nav), pair("c1", "s2"));
        assert_eq!(nav.store().write_count(LAST_READ_KEY), writes);
    }

    #[test]
    fn toggle_bookmark_twice_restores_set() {
        let mut nav = nav(example_book());
        let before = nav.bookmarks().clone();

        assert!(nav.toggle_bookmark("s1"));
        assert!(nav.is_bookmarked("s1"));
        assert!(!nav.toggle_bookmark("s1"));
        assert_eq!(nav.bookmarks(), &before);

        assert_eq!(nav.store().write_count(BOOKMARKS_KEY), 2);
        assert_eq!(nav.store().write_count(LAST_READ_KEY), 0);
        assert_eq!(nav.store().raw(BOOKMARKS_KEY).unwrap(), "[]");
    }

    #[test]
    fn bookmark_then_listing_shows_only_that_section() {
        let mut nav = nav(example_book());
        nav.toggle_bookmark("s1");
        let listing = nav.listing(ListingMode::Bookmarks);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].chapter.id, "c1");
        assert_eq!(listing[0].sections.len(), 1);
        assert_eq!(listing[0].sections[0].id, "s1");
    }

    #[test]
    fn continue_without_pointer_opens_first_section() {
        let mut nav = nav(example_book());
        assert!(nav.continue_reading());
        assert_eq!(nav.view(), ViewMode::Reading);
        assert_eq!(here(&nav), pair("c0", "s0"));
        assert_eq!(nav.last_read(), Some(&LastRead::new("c0", "s0")));
    }

    #[test]
    fn continue_resumes_persisted_pointer() {
        let store = MemStore::with_values([(
            LAST_READ_KEY,
            r#"{"chapterId":"c1","sectionId":"s2"}"#,
        )]);
        let mut nav = Navigator::new(example_book(), store);
        assert_eq!(nav.continue_label(), "B");
        nav.continue_reading();
        assert_eq!(here(&nav), pair("c1", "s2"));
    }

    #[test]
    fn continue_with_stale_pointer_falls_back() {
        let store = MemStore::with_values([(
            LAST_READ_KEY,
            r#"{"chapterId":"c1","sectionId":"deleted"}"#,
        )]);
        let mut nav = Navigator::new(example_book(), store);
        assert!(nav.continue_reading());
        assert_eq!(here(&nav), pair("c0", "s0"));
        assert_eq!(nav.last_read(), Some(&LastRead::new("c0", "s0")));
    }

    #[test]
    fn malformed_bookmarks_hydrate_empty() {
        let store = MemStore::with_values([(BOOKMARKS_KEY, "{{nope")]);
        let nav = Navigator::new(example_book(), store);
        assert!(nav.bookmarks().is_empty());
    }

    #[test]
    fn failed_writes_keep_in_memory_state() {
        let store = MemStore::new();
        store.set_simulate_write_error(true);
        let mut nav = Navigator::new(example_book(), store);

        assert!(nav.select_section("c1", "s1"));
        assert!(nav.toggle_bookmark("s1"));
        assert_eq!(nav.last_read(), Some(&LastRead::new("c1", "s1")));
        assert!(nav.is_bookmarked("s1"));
        assert_eq!(nav.store().raw(LAST_READ_KEY), None);
    }

    #[test]
    fn apply_dispatches_intents() {
        let mut nav = nav(example_book());
        assert!(nav.apply(Intent::Continue));
        assert!(nav.apply(Intent::Next));
        assert_eq!(here(&nav), pair("c1", "s1"));
        assert!(nav.apply(Intent::ToggleBookmark("s1".into())));
        assert!(nav.apply(Intent::Prev));
        assert!(nav.apply(Intent::Back));
        assert!(!nav.apply(Intent::Back));
        assert!(nav.apply(Intent::Select {
            chapter_id: "c1".into(),
            section_id: "s2".into(),
        }));
        assert_eq!(here(&nav), pair("c1", "s2"));
        assert!(nav.is_bookmarked("s1"));
    }

    #[test]
    fn state_survives_a_new_navigator_over_same_store() {
        let env = crate::test_utils::TestEnv::new();
        let mut nav = Navigator::new(example_book(), env.store);
        nav.select_section("c1", "s2");
        nav.toggle_bookmark("s0");

        let reopened = Navigator::new(
            example_book(),
            crate::store::fs::FileStore::new(env.root.clone()),
        );
        assert_eq!(reopened.view(), ViewMode::Contents);
        assert_eq!(reopened.last_read(), Some(&LastRead::new("c1", "s2")));
        assert!(reopened.is_bookmarked("s0"));
    }
}
