//! Ways a user can name a section on the command line.
//!
//! - `"n.m"`: the m-th section (1-based) of the chapter numbered `n`. The
//!   intro chapter is number 0, so `"0.1"` is its first section. Only
//!   chapters whose number is unique in the book can be named this way.
//! - `"k"`: the k-th section of the whole book in reading order.
//! - anything else: a section id.
//!
//! A numeric form that names no section is retried as an id, so books with
//! ids like `"10"` stay reachable.

use crate::book::Book;
use crate::error::{FolioError, Result};
use crate::model::Position;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionLocator {
    Ordinal { chapter: u32, section: usize },
    Sequence(usize),
    Id(String),
}

impl SectionLocator {
    /// The `"n.m"` form that points at `pos`.
    ///
    /// Falls back to the sequence form when the chapter shares its number
    /// with another one (a book with two intro chapters, say).
    pub fn ordinal_of(book: &Book, pos: Position) -> Self {
        let number = book.chapter(pos).map(|c| c.number).unwrap_or_default();
        if chapter_numbered(book, number) == Some(pos.chapter) {
            SectionLocator::Ordinal {
                chapter: number,
                section: pos.section + 1,
            }
        } else {
            SectionLocator::Sequence(book.ordinal(pos))
        }
    }

    pub fn resolve(&self, book: &Book) -> Result<Position> {
        let found = match self {
            SectionLocator::Ordinal { chapter, section } => {
                chapter_numbered(book, *chapter).and_then(|ci| {
                    let si = section.checked_sub(1)?;
                    (si < book.chapters[ci].sections.len()).then(|| Position::new(ci, si))
                })
            }
            SectionLocator::Sequence(k) => book.position_at_ordinal(*k),
            SectionLocator::Id(id) => book.position_of_section(id),
        };
        let found = match (found, self) {
            (None, SectionLocator::Ordinal { .. } | SectionLocator::Sequence(_)) => {
                book.position_of_section(&self.to_string())
            }
            (found, _) => found,
        };
        found.ok_or_else(|| FolioError::SectionNotFound(self.to_string()))
    }
}

/// Index of the only chapter carrying `number`; `None` when absent or shared.
fn chapter_numbered(book: &Book, number: u32) -> Option<usize> {
    let mut matches = book
        .chapters
        .iter()
        .enumerate()
        .filter(|(_, c)| c.number == number)
        .map(|(i, _)| i);
    match (matches.next(), matches.next()) {
        (Some(i), None) => Some(i),
        _ => None,
    }
}

impl FromStr for SectionLocator {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FolioError::Api("Empty section locator".to_string()));
        }
        if let Some((chapter, section)) = s.split_once('.') {
            if let (Ok(chapter), Ok(section)) = (chapter.parse(), section.parse()) {
                return Ok(SectionLocator::Ordinal { chapter, section });
            }
        }
        if let Ok(k) = s.parse() {
            return Ok(SectionLocator::Sequence(k));
        }
        Ok(SectionLocator::Id(s.to_string()))
    }
}

impl fmt::Display for SectionLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionLocator::Ordinal { chapter, section } => write!(f, "{}.{}", chapter, section),
            SectionLocator::Sequence(k) => write!(f, "{}", k),
            SectionLocator::Id(id) => f.write_str(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{chapter, example_book, gapped_book, section};

    fn resolve(book: &Book, raw: &str) -> Result<Position> {
        raw.parse::<SectionLocator>()?.resolve(book)
    }

    #[test]
    fn parses_each_form() {
        assert_eq!(
            "1.2".parse::<SectionLocator>().unwrap(),
            SectionLocator::Ordinal {
                chapter: 1,
                section: 2
            }
        );
        assert_eq!(
            " 3 ".parse::<SectionLocator>().unwrap(),
            SectionLocator::Sequence(3)
        );
        assert_eq!(
            "moon-phases".parse::<SectionLocator>().unwrap(),
            SectionLocator::Id("moon-phases".into())
        );
        // Dotted but not numeric on both sides is an id.
        assert_eq!(
            "v1.x".parse::<SectionLocator>().unwrap(),
            SectionLocator::Id("v1.x".into())
        );
        assert!("".parse::<SectionLocator>().is_err());
    }

    #[test]
    fn resolves_by_chapter_number() {
        let book = example_book();
        assert_eq!(resolve(&book, "0.1").unwrap(), Position::new(0, 0));
        assert_eq!(resolve(&book, "1.2").unwrap(), Position::new(1, 1));
        assert!(matches!(
            resolve(&book, "1.3"),
            Err(FolioError::SectionNotFound(_))
        ));
        assert!(resolve(&book, "1.0").is_err());
        assert!(resolve(&book, "7.1").is_err());
    }

    #[test]
    fn resolves_by_sequence_and_id() {
        let book = gapped_book();
        assert_eq!(resolve(&book, "3").unwrap(), Position::new(2, 0));
        assert_eq!(resolve(&book, "c3").unwrap(), Position::new(2, 2));
        assert!(resolve(&book, "0").is_err());
        assert!(resolve(&book, "6").is_err());

        let err = resolve(&book, "missing").unwrap_err();
        assert_eq!(err.to_string(), "Section not found: missing");
    }

    #[test]
    fn ordinal_of_round_trips() {
        let book = gapped_book();
        for pos in book.positions() {
            let locator = SectionLocator::ordinal_of(&book, pos);
            assert_eq!(locator.resolve(&book).unwrap(), pos);
        }
        assert_eq!(
            SectionLocator::ordinal_of(&book, Position::new(2, 1)).to_string(),
            "2.2"
        );
    }

    #[test]
    fn shared_chapter_numbers_use_sequence_locators() {
        let book = Book::new(
            "Two intros",
            vec![
                chapter("pre", 0, vec![section("p1", "Preface")]),
                chapter("fore", 0, vec![section("f1", "Foreword")]),
                chapter("one", 1, vec![section("o1", "One")]),
            ],
        )
        .unwrap();

        let foreword = Position::new(1, 0);
        let locator = SectionLocator::ordinal_of(&book, foreword);
        assert_eq!(locator, SectionLocator::Sequence(2));
        assert_eq!(locator.resolve(&book).unwrap(), foreword);

        for pos in book.positions() {
            let locator = SectionLocator::ordinal_of(&book, pos);
            assert_eq!(locator.resolve(&book).unwrap(), pos);
        }
        assert_eq!(resolve(&book, "1.1").unwrap(), Position::new(2, 0));
        assert!(matches!(
            resolve(&book, "0.1"),
            Err(FolioError::SectionNotFound(_))
        ));
    }

    #[test]
    fn numeric_ids_resolve_when_no_position_matches() {
        let book = Book::from_json(
            r#"[{"id": "c", "number": 1, "title": "Only", "sections": [
                {"id": "10", "title": "Ten", "content": []},
                {"id": "20", "title": "Twenty", "content": []},
                {"id": "3.5", "title": "Dotted", "content": []}
            ]}]"#,
        )
        .unwrap();

        assert_eq!(resolve(&book, "20").unwrap(), Position::new(0, 1));
        assert_eq!(resolve(&book, "10").unwrap(), Position::new(0, 0));
        assert_eq!(resolve(&book, "3.5").unwrap(), Position::new(0, 2));
        // A sequence number that exists still wins over the id lookup.
        assert_eq!(resolve(&book, "2").unwrap(), Position::new(0, 1));
        assert!(resolve(&book, "30").is_err());
    }
}
