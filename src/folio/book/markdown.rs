//! Markdown book source.
//!
//! ```text
//! # Book Title
//!
//! ## Before We Begin {#c0 .intro}
//! ### 1. Why Look Up {#s0}
//! First paragraph, soft-wrapped
//! across lines.
//!
//! * An annotation, shown with a marker.
//!
//! ## The Moon {#c1}
//! ### 1. Phases
//! ...
//! ```
//!
//! - The first `#` heading is the book title; text before the first `##` is ignored.
//! - `##` starts a chapter. The `.intro` class makes it chapter `0`; the rest
//!   are numbered 1, 2, ... in order.
//! - `###` starts a section. Paragraphs that appear before any `###` in a
//!   chapter go into a section named after the chapter.
//! - List items become annotation paragraphs (`"* text"`).
//! - `{#id}` sets an id; otherwise chapters get `ch{n}` and sections
//!   `{chapter_id}-s{m}`.

use crate::model::{Chapter, Section};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

enum Buffer {
    Idle,
    Heading {
        level: HeadingLevel,
        id: Option<String>,
        intro: bool,
        text: String,
    },
    Paragraph(String),
    Item(String),
}

#[derive(Default)]
struct BookBuilder {
    title: Option<String>,
    chapters: Vec<Chapter>,
    next_number: u32,
}

impl BookBuilder {
    fn heading(&mut self, level: HeadingLevel, id: Option<String>, intro: bool, text: String) {
        match level {
            HeadingLevel::H1 => {
                if self.title.is_none() {
                    self.title = Some(text);
                }
            }
            HeadingLevel::H2 => {
                let number = if intro {
                    0
                } else {
                    self.next_number += 1;
                    self.next_number
                };
                let id = id.unwrap_or_else(|| format!("ch{}", self.chapters.len() + 1));
                self.chapters.push(Chapter {
                    id,
                    number,
                    title: text,
                    sections: Vec::new(),
                });
            }
            _ => {
                if let Some(chapter) = self.chapters.last_mut() {
                    let id =
                        id.unwrap_or_else(|| format!("{}-s{}", chapter.id, chapter.sections.len() + 1));
                    chapter.sections.push(Section {
                        id,
                        title: text,
                        content: Vec::new(),
                    });
                } else {
                    tracing::debug!(heading = %text, "section heading before any chapter, skipped");
                }
            }
        }
    }

    fn paragraph(&mut self, text: String) {
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(chapter) = self.chapters.last_mut() else {
            return;
        };
        if chapter.sections.is_empty() {
            chapter.sections.push(Section {
                id: format!("{}-s1", chapter.id),
                title: chapter.title.clone(),
                content: Vec::new(),
            });
        }
        if let Some(section) = chapter.sections.last_mut() {
            section.content.push(text);
        }
    }
}

/// Parses a Markdown book into its title (if any) and chapters.
/// Validation is left to [`super::Book`].
pub fn parse(source: &str) -> (Option<String>, Vec<Chapter>) {
    let parser = Parser::new_ext(source, Options::ENABLE_HEADING_ATTRIBUTES);
    let mut builder = BookBuilder::default();
    let mut buffer = Buffer::Idle;

    for event in parser {
        match event {
            Event::Start(Tag::Heading {
                level, id, classes, ..
            }) => {
                buffer = Buffer::Heading {
                    level,
                    id: id.map(|s| s.to_string()),
                    intro: classes.iter().any(|c| &**c == "intro"),
                    text: String::new(),
                };
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Buffer::Heading {
                    level,
                    id,
                    intro,
                    text,
                } = std::mem::replace(&mut buffer, Buffer::Idle)
                {
                    builder.heading(level, id, intro, text.trim().to_string());
                }
            }
            Event::Start(Tag::Item) => buffer = Buffer::Item(String::new()),
            Event::End(TagEnd::Item) => {
                if let Buffer::Item(text) = std::mem::replace(&mut buffer, Buffer::Idle) {
                    builder.paragraph(format!("* {}", text.trim()));
                }
            }
            Event::Start(Tag::Paragraph) => {
                // Loose list items wrap their text in paragraphs; keep
                // collecting into the item.
                match &mut buffer {
                    Buffer::Item(text) if !text.is_empty() => text.push(' '),
                    Buffer::Item(_) => {}
                    _ => buffer = Buffer::Paragraph(String::new()),
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if matches!(buffer, Buffer::Paragraph(_)) {
                    if let Buffer::Paragraph(text) = std::mem::replace(&mut buffer, Buffer::Idle) {
                        builder.paragraph(text);
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => push_text(&mut buffer, &text),
            Event::SoftBreak => push_text(&mut buffer, " "),
            Event::HardBreak => push_text(&mut buffer, "\n"),
            _ => {}
        }
    }

    (builder.title, builder.chapters)
}

fn push_text(buffer: &mut Buffer, text: &str) {
    match buffer {
        Buffer::Heading { text: t, .. } | Buffer::Paragraph(t) | Buffer::Item(t) => t.push_str(text),
        Buffer::Idle => {}
    }
}
