//! # Rendering
//!
//! Turns view snapshots into terminal text. Templates live in
//! [`super::templates`]; this module prepares their data and owns the
//! Unicode-aware layout: word wrapping to the reading width, the progress
//! bar and the size picker row.

use super::styles::{self, names};
use super::templates::{CONTENTS_TEMPLATE, READING_TEMPLATE};
use colored::Colorize;
use folio::api::{CmdMessage, MessageLevel};
use folio::error::{FolioError, Result};
use folio::listing::ListingMode;
use folio::prefs::{FontSize, ReaderPrefs};
use folio::views::{ChapterEntry, ContentsView, ReadingView, Screen};
use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const BOOKMARK_MARKER: &str = "★";
pub const LAST_READ_MARKER: &str = "◂ last read";
const PROGRESS_CELLS: usize = 24;
const GUTTER_WIDTH: usize = 2;

#[derive(Serialize)]
struct ContentsData<'a> {
    book_title: &'a str,
    heading: String,
    empty_message: Option<&'a str>,
    chapters: &'a [ChapterEntry],
    continue_label: &'a str,
    bookmark_marker: &'static str,
    last_read_marker: &'static str,
}

#[derive(Serialize)]
struct ParagraphData {
    lines: Vec<String>,
    gutter: &'static str,
    style: &'static str,
}

#[derive(Serialize)]
struct SizeData {
    label: &'static str,
    style: &'static str,
}

#[derive(Serialize)]
struct ReadingData<'a> {
    header: &'a str,
    display_title: &'a str,
    bookmarked: bool,
    bookmark_marker: &'static str,
    rule: String,
    paragraphs: Vec<ParagraphData>,
    progress_bar: String,
    progress_label: String,
    font_menu: bool,
    sizes: Vec<SizeData>,
    hint: &'a str,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("style", move |value: Value, name: String| -> String {
            styles::apply(&name, &value.to_string(), use_color)
        });
        env.add_template("contents", CONTENTS_TEMPLATE)
            .map_err(render_error)?;
        env.add_template("reading", READING_TEMPLATE)
            .map_err(render_error)?;
        Ok(Self { env })
    }

    pub fn screen(&self, screen: &Screen, prefs: &ReaderPrefs, hint: &str) -> Result<String> {
        match screen {
            Screen::Contents(view) => self.contents(view),
            Screen::Reading(view) => self.reading(view, prefs, hint),
        }
    }

    pub fn contents(&self, view: &ContentsView) -> Result<String> {
        let heading = match view.mode {
            ListingMode::All => "Contents".to_string(),
            ListingMode::Bookmarks => format!("Bookmarks ({} saved)", view.bookmark_count),
        };
        let data = ContentsData {
            book_title: &view.book_title,
            heading,
            empty_message: view.empty_message.as_deref(),
            chapters: &view.chapters,
            continue_label: &view.continue_label,
            bookmark_marker: BOOKMARK_MARKER,
            last_read_marker: LAST_READ_MARKER,
        };
        self.render("contents", &data)
    }

    pub fn reading(&self, view: &ReadingView, prefs: &ReaderPrefs, hint: &str) -> Result<String> {
        let width = prefs.font_size.wrap_width();
        let text_width = width.saturating_sub(GUTTER_WIDTH);

        let paragraphs = view
            .paragraphs
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let (gutter, style) = if prefs.highlighted == Some(i) {
                    ("▌ ", names::HIGHLIGHT)
                } else if p.is_note() {
                    ("* ", names::NOTE)
                } else {
                    ("  ", names::TEXT)
                };
                ParagraphData {
                    lines: wrap(p.text(), text_width),
                    gutter,
                    style,
                }
            })
            .collect();

        let sizes = FontSize::ALL
            .iter()
            .map(|size| SizeData {
                label: size.as_str(),
                style: if *size == prefs.font_size {
                    names::SIZE_ACTIVE
                } else {
                    names::SIZE
                },
            })
            .collect();

        let data = ReadingData {
            header: &view.chapter_heading,
            display_title: &view.display_title,
            bookmarked: view.bookmarked,
            bookmark_marker: BOOKMARK_MARKER,
            rule: "─".repeat(width),
            paragraphs,
            progress_bar: progress_bar(view.progress(), PROGRESS_CELLS),
            progress_label: format!("{}/{} · {}", view.ordinal, view.total, view.locator),
            font_menu: prefs.font_menu_open,
            sizes,
            hint,
        };
        self.render("reading", &data)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let tmpl = self.env.get_template(name).map_err(render_error)?;
        tmpl.render(data).map_err(render_error)
    }
}

fn render_error(e: minijinja::Error) -> FolioError {
    FolioError::Api(format!("Failed to render output: {}", e))
}

pub fn format_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", format_messages(messages));
}

/// Filled/empty bar for `fraction` of `cells`.
pub fn progress_bar(fraction: f64, cells: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * cells as f64).round() as usize).min(cells);
    format!("{}{}", "█".repeat(filled), "░".repeat(cells - filled))
}

/// Greedy word wrap on display width.
///
/// Words wider than `width` are split between characters. Always returns at
/// least one line, so an empty paragraph still takes up a row.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if line_width > 0 && line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
            continue;
        }
        if line_width > 0 {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }
        for c in word.chars() {
            let char_width = c.width().unwrap_or(0);
            if line_width > 0 && line_width + char_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(c);
            line_width += char_width;
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
