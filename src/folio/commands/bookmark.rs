use crate::commands::{reading_screen, CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::locator::SectionLocator;
use crate::model::ViewMode;
use crate::navigator::Navigator;
use crate::store::KeyValueStore;

/// Toggles a bookmark.
///
/// Without a locator the target is the open section, or the last-read one
/// when the table of contents is showing.
pub fn run<S: KeyValueStore>(
    nav: &mut Navigator<S>,
    locator: Option<&SectionLocator>,
) -> Result<CmdResult> {
    let pos = match locator {
        Some(locator) => locator.resolve(nav.book())?,
        None => match nav.view() {
            ViewMode::Reading => nav.position(),
            ViewMode::Contents => nav.last_read_position().ok_or_else(|| {
                FolioError::Api(
                    "Nothing to bookmark: open a section first or name one".to_string(),
                )
            })?,
        },
    };
    let section = nav
        .book()
        .section(pos)
        .ok_or_else(|| FolioError::SectionNotFound(format!("{:?}", pos)))?;
    let (section_id, title) = (section.id.clone(), section.title.clone());

    let marked = nav.toggle_bookmark(&section_id);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(if marked {
        format!("Bookmarked: {}", title)
    } else {
        format!("Bookmark removed: {}", title)
    }));

    if nav.view() == ViewMode::Reading {
        result = result.with_screen(reading_screen(nav));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrate::{BOOKMARKS_KEY, LAST_READ_KEY};
    use crate::store::memory::MemStore;
    use crate::test_utils::example_book;
    use crate::views::Screen;

    #[test]
    fn defaults_to_open_section() {
        let mut nav = Navigator::new(example_book(), MemStore::new());
        nav.select_section("c1", "s1");

        let result = run(&mut nav, None).unwrap();
        assert!(nav.is_bookmarked("s1"));
        assert_eq!(result.messages[0].content, "Bookmarked: A");
        let Some(Screen::Reading(view)) = result.screen else {
            panic!("expected reading screen");
        };
        assert!(view.bookmarked);
    }

    #[test]
    fn second_toggle_removes() {
        let mut nav = Navigator::new(example_book(), MemStore::new());
        let locator: SectionLocator = "s2".parse().unwrap();
        run(&mut nav, Some(&locator)).unwrap();
        let result = run(&mut nav, Some(&locator)).unwrap();

        assert!(!nav.is_bookmarked("s2"));
        assert_eq!(result.messages[0].content, "Bookmark removed: B");
        assert_eq!(nav.store().write_count(BOOKMARKS_KEY), 2);
        assert_eq!(nav.store().write_count(LAST_READ_KEY), 0);
    }

    #[test]
    fn contents_view_uses_last_read() {
        let store = MemStore::with_values([(LAST_READ_KEY, r#"{"chapterId":"c1","sectionId":"s2"}"#)]);
        let mut nav = Navigator::new(example_book(), store);

        let result = run(&mut nav, None).unwrap();
        assert!(nav.is_bookmarked("s2"));
        assert!(result.screen.is_none());
    }

    #[test]
    fn contents_view_without_pointer_is_an_error() {
        let mut nav = Navigator::new(example_book(), MemStore::new());
        assert!(matches!(run(&mut nav, None), Err(FolioError::Api(_))));
        assert_eq!(nav.store().write_count(BOOKMARKS_KEY), 0);
    }
}
