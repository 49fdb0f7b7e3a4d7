use serde::{Deserialize, Serialize};

/// One readable unit of a chapter.
///
/// Section ids are unique across the whole book, not just within a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Vec<String>,
}

impl Section {
    /// Title used for the large heading of the reading view.
    ///
    /// Authored titles often carry a numbering prefix ("2. The Tides"); the
    /// heading shows only the text after the first `". "`.
    pub fn display_title(&self) -> &str {
        self.title
            .split(". ")
            .nth(1)
            .filter(|rest| !rest.is_empty())
            .unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    /// `0` marks an introductory chapter, shown without numbering.
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Chapter {
    pub fn is_intro(&self) -> bool {
        self.number == 0
    }

    /// Short tag shown above the chapter title in the table of contents.
    pub fn label(&self) -> String {
        if self.is_intro() {
            "INTRO".to_string()
        } else {
            format!("CHAPTER {}", self.number)
        }
    }

    /// Title line for headers: numbered chapters get an "n. " prefix.
    pub fn heading(&self) -> String {
        if self.is_intro() {
            self.title.clone()
        } else {
            format!("{}. {}", self.number, self.title)
        }
    }
}

/// A paragraph string as the reading view sees it.
///
/// A leading `*` marks an annotation. This is a rendering distinction only:
/// both variants come from the same `content` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Paragraph {
    Text(String),
    Note(String),
}

impl Paragraph {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('*') {
            Some(rest) => Paragraph::Note(rest.strip_prefix(' ').unwrap_or(rest).to_string()),
            None => Paragraph::Text(raw.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Paragraph::Text(t) | Paragraph::Note(t) => t,
        }
    }

    pub fn is_note(&self) -> bool {
        matches!(self, Paragraph::Note(_))
    }
}

/// Index pair into the book: `chapters[chapter].sections[section]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub chapter: usize,
    pub section: usize,
}

impl Position {
    pub fn new(chapter: usize, section: usize) -> Self {
        Self { chapter, section }
    }
}

/// The most recently opened section, persisted as
/// `{"chapterId": "...", "sectionId": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRead {
    pub chapter_id: String,
    pub section_id: String,
}

impl LastRead {
    pub fn new(chapter_id: impl Into<String>, section_id: impl Into<String>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            section_id: section_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Contents,
    Reading,
}

/// Set of bookmarked section ids.
///
/// Keeps insertion order so the persisted array reads in the order the user
/// marked things, but never holds the same id twice. Ids are not checked
/// against the book: a stale id simply never matches a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Bookmarks {
    ids: Vec<String>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, section_id: &str) -> bool {
        self.ids.iter().any(|id| id == section_id)
    }

    /// Flips membership and returns whether the id is now bookmarked.
    pub fn toggle(&mut self, section_id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|id| id == section_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(section_id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Bookmarks {
    fn from(ids: Vec<String>) -> Self {
        let mut bookmarks = Bookmarks::new();
        for id in ids {
            if !bookmarks.contains(&id) {
                bookmarks.ids.push(id);
            }
        }
        bookmarks
    }
}

impl From<Bookmarks> for Vec<String> {
    fn from(bookmarks: Bookmarks) -> Self {
        bookmarks.ids
    }
}
