use crate::book::Book;
use crate::model::{Chapter, Section};
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn section(id: &str, title: &str) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        content: vec![format!("{} body", title), format!("* {} note", title)],
    }
}

pub fn chapter(id: &str, number: u32, sections: Vec<Section>) -> Chapter {
    Chapter {
        id: id.to_string(),
        number,
        title: format!("Chapter {}", id),
        sections,
    }
}

/// c0 (intro): s0 "Intro"; c1: s1 "A", s2 "B".
pub fn example_book() -> Book {
    Book::new(
        "Example",
        vec![
            chapter("c0", 0, vec![section("s0", "Intro")]),
            chapter("c1", 1, vec![section("s1", "A"), section("s2", "B")]),
        ],
    )
    .expect("example book is valid")
}

/// Chapter b has no sections: a1 a2 | (b) | c1 c2 c3.
pub fn gapped_book() -> Book {
    Book::new(
        "Gapped",
        vec![
            chapter("a", 0, vec![section("a1", "1. A one"), section("a2", "2. A two")]),
            chapter("b", 1, vec![]),
            chapter(
                "c",
                2,
                vec![
                    section("c1", "1. C one"),
                    section("c2", "2. C two"),
                    section("c3", "3. C three"),
                ],
            ),
        ],
    )
    .expect("gapped book is valid")
}

pub struct TestEnv {
    // Kept so the directory lives as long as the env
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }
}
