use crate::commands::{reading_screen, CmdMessage, CmdResult};
use crate::error::Result;
use crate::navigator::Navigator;
use crate::store::KeyValueStore;

/// Reopens the last-read section, or the first one when there is none.
pub fn run<S: KeyValueStore>(nav: &mut Navigator<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let stale = nav.last_read().is_some() && nav.last_read_position().is_none();
    if stale {
        result.add_message(CmdMessage::warning(
            "Last read section is no longer in this book; starting from the beginning.",
        ));
    }
    nav.continue_reading();
    Ok(result.with_screen(reading_screen(nav)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrate::LAST_READ_KEY;
    use crate::model::{LastRead, Position, ViewMode};
    use crate::store::memory::MemStore;
    use crate::test_utils::example_book;

    #[test]
    fn resumes_last_read() {
        let store = MemStore::with_values([(LAST_READ_KEY, r#"{"chapterId":"c1","sectionId":"s2"}"#)]);
        let mut nav = Navigator::new(example_book(), store);
        let result = run(&mut nav).unwrap();
        assert_eq!(nav.position(), Position::new(1, 1));
        assert_eq!(nav.view(), ViewMode::Reading);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn falls_back_to_first_section() {
        let mut nav = Navigator::new(example_book(), MemStore::new());
        run(&mut nav).unwrap();
        assert_eq!(nav.position(), Position::new(0, 0));
        assert_eq!(nav.last_read(), Some(&LastRead::new("c0", "s0")));
    }

    #[test]
    fn warns_about_stale_pointer() {
        let store = MemStore::with_values([(LAST_READ_KEY, r#"{"chapterId":"c9","sectionId":"s9"}"#)]);
        let mut nav = Navigator::new(example_book(), store);
        let result = run(&mut nav).unwrap();
        assert_eq!(nav.position(), Position::new(0, 0));
        assert_eq!(result.messages.len(), 1);
    }
}
