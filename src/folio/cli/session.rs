//! Interactive reading session.
//!
//! One [`FolioApi`] lives for the whole loop, so navigation state and the
//! reading view's font size, size picker and highlight carry over from one
//! line of input to the next. The prefs reset whenever a section is opened
//! from the table of contents, and the highlight clears whenever the
//! section changes.

use super::render::{format_messages, Renderer};
use folio::api::{CmdMessage, CmdResult, FolioApi};
use folio::error::Result;
use folio::listing::ListingMode;
use folio::model::ViewMode;
use folio::prefs::{FontSize, ReaderPrefs};
use folio::store::KeyValueStore;
use folio::views::{self, Screen};
use std::io::{BufRead, Write};

const PROMPT: &str = "folio> ";

const HELP: &str = "\
Commands:
  toc              table of contents
  bookmarks        bookmarked sections only
  open <loc>       open a section (1.2, 5 or an id)
  n / p            next / previous section
  c                continue where you left off
  b [loc]          toggle a bookmark
  back             back to the contents
  size <s>         small, normal, large or xl
  sizes            show or hide the size picker
  hl <n>           highlight paragraph n (again to clear)
  help             this text
  q                quit
";

const READING_HINT: &str = "n next · p prev · b bookmark · back contents · help";

enum Step {
    Continue,
    Quit,
}

pub struct Session<'a, S: KeyValueStore> {
    api: &'a mut FolioApi<S>,
    renderer: &'a Renderer,
    default_size: FontSize,
    prefs: ReaderPrefs,
}

impl<'a, S: KeyValueStore> Session<'a, S> {
    pub fn new(api: &'a mut FolioApi<S>, renderer: &'a Renderer, default_size: FontSize) -> Self {
        Self {
            api,
            renderer,
            default_size,
            prefs: ReaderPrefs::new(default_size),
        }
    }

    /// Runs until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let result = self.api.contents(ListingMode::All)?;
        self.emit(out, &result)?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;
            match self.handle(line.trim(), out)? {
                Step::Continue => {}
                Step::Quit => break,
            }
        }
        Ok(())
    }

    fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Step> {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (line, None),
        };
        tracing::debug!(cmd, ?arg, "session command");

        let was = (self.api.navigator().view(), self.api.navigator().position());
        let outcome = match (cmd, arg) {
            ("", _) => return Ok(Step::Continue),
            ("q" | "quit" | "exit", _) => return Ok(Step::Quit),
            ("help" | "?", _) => {
                write!(out, "{}", HELP)?;
                return Ok(Step::Continue);
            }
            ("toc" | "contents", _) => self.api.contents(ListingMode::All),
            ("bookmarks", _) => self.api.contents(ListingMode::Bookmarks),
            ("back", _) => self.api.back(),
            ("open" | "o", Some(loc)) => self.api.open(loc),
            ("n" | "next", _) => self.api.next(),
            ("p" | "prev", _) => self.api.prev(),
            ("c" | "continue", _) => self.api.resume(),
            ("b" | "bookmark", loc) => self.api.toggle_bookmark(loc),
            ("size", Some(size)) => Ok(self.set_size(size)),
            ("sizes", _) => Ok(self.toggle_sizes()),
            ("hl", Some(n)) => Ok(self.highlight(n)),
            _ => Ok(unknown(line)),
        };

        match outcome {
            Ok(result) => {
                self.sync_prefs(was);
                self.emit(out, &result)?;
            }
            Err(e) => {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e.to_string()));
                self.emit(out, &result)?;
            }
        }
        Ok(Step::Continue)
    }

    /// Applies the reset rules after an intent moved the reader.
    fn sync_prefs(&mut self, (was_view, was_pos): (ViewMode, folio::model::Position)) {
        let nav = self.api.navigator();
        if nav.view() != ViewMode::Reading {
            return;
        }
        if was_view == ViewMode::Contents {
            self.prefs = ReaderPrefs::new(self.default_size);
        } else if nav.position() != was_pos {
            self.prefs.clear_highlight();
        }
    }

    fn reading_result(&self) -> Option<CmdResult> {
        let nav = self.api.navigator();
        (nav.view() == ViewMode::Reading)
            .then(|| CmdResult::default().with_screen(Screen::Reading(views::reading_view(nav))))
    }

    fn set_size(&mut self, raw: &str) -> CmdResult {
        match raw.parse::<FontSize>() {
            Ok(size) => match self.reading_result() {
                Some(result) => {
                    self.prefs.set_font_size(size);
                    result
                }
                None => not_reading(),
            },
            Err(e) => message(CmdMessage::error(e.to_string())),
        }
    }

    fn toggle_sizes(&mut self) -> CmdResult {
        match self.reading_result() {
            Some(result) => {
                self.prefs.toggle_font_menu();
                result
            }
            None => not_reading(),
        }
    }

    fn highlight(&mut self, raw: &str) -> CmdResult {
        let Some(result) = self.reading_result() else {
            return not_reading();
        };
        let count = self.api.navigator().current_section().content.len();
        match raw.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => {
                self.prefs.toggle_highlight(n - 1);
                result
            }
            _ => message(CmdMessage::error(format!(
                "No paragraph {} (this section has {})",
                raw, count
            ))),
        }
    }

    fn emit<W: Write>(&self, out: &mut W, result: &CmdResult) -> Result<()> {
        if let Some(screen) = &result.screen {
            let hint = match screen {
                Screen::Reading(_) => READING_HINT,
                Screen::Contents(_) => "",
            };
            write!(out, "{}", self.renderer.screen(screen, &self.prefs, hint)?)?;
        }
        write!(out, "{}", format_messages(&result.messages))?;
        Ok(())
    }
}

fn message(message: CmdMessage) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(message);
    result
}

fn not_reading() -> CmdResult {
    message(CmdMessage::info("Open a section first."))
}

fn unknown(line: &str) -> CmdResult {
    message(CmdMessage::warning(format!(
        "Unknown command: {} (type help)",
        line
    )))
}
