use crate::commands::{reading_screen, CmdResult};
use crate::error::Result;
use crate::locator::SectionLocator;
use crate::navigator::Navigator;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(nav: &mut Navigator<S>, locator: &SectionLocator) -> Result<CmdResult> {
    let pos = locator.resolve(nav.book())?;
    nav.open(pos);
    Ok(CmdResult::default().with_screen(reading_screen(nav)))
}
