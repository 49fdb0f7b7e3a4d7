use crate::commands::{contents_screen, CmdResult};
use crate::error::Result;
use crate::listing::ListingMode;
use crate::navigator::Navigator;
use crate::store::KeyValueStore;

/// Shows the table of contents, leaving the reading view if needed.
pub fn run<S: KeyValueStore>(nav: &mut Navigator<S>, mode: ListingMode) -> Result<CmdResult> {
    nav.back_to_contents();
    Ok(CmdResult::default().with_screen(contents_screen(nav, mode)))
}
