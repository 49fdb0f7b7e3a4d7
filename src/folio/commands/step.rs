use crate::commands::{reading_screen, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ViewMode;
use crate::navigator::Navigator;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Steps one section in `direction`.
///
/// From the table of contents this steps from the last-read section, opening
/// only the section it lands on. If there was no usable last-read pointer the
/// first section is shown as is; stepping past it right away would skip the
/// start of the book.
pub fn run<S: KeyValueStore>(nav: &mut Navigator<S>, direction: Direction) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let moved = if nav.view() == ViewMode::Contents {
        let Some(from) = nav.last_read_position() else {
            nav.continue_reading();
            result.add_message(CmdMessage::info("Starting from the beginning."));
            return Ok(result.with_screen(reading_screen(nav)));
        };
        let target = match direction {
            Direction::Next => nav.book().next_position(from),
            Direction::Prev => nav.book().prev_position(from),
        };
        nav.open(target.unwrap_or(from));
        target.is_some()
    } else {
        match direction {
            Direction::Next => nav.next_section(),
            Direction::Prev => nav.prev_section(),
        }
    };
    if !moved {
        result.add_message(CmdMessage::info(match direction {
            Direction::Next => "No next section.",
            Direction::Prev => "No previous section.",
        }));
    }

    Ok(result.with_screen(reading_screen(nav)))
}
