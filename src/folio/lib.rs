//! # Folio Architecture
//!
//! Folio is a **UI-agnostic e-book reading library**: a static book, a small
//! navigation state machine over it, and two pieces of reading state
//! (bookmarks and the last-read section) that survive restarts through a
//! key-value store. The terminal client in `cli/` is one way to drive it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders screens, runs the session loop │
//! │  - Owns view-local prefs (font size, highlight)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (locator strings → SectionLocator)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One intent each, returns CmdResult with a view snapshot  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (navigator.rs, listing.rs, views.rs, hydrate.rs)      │
//! │  - Navigator owns view mode, cursor, bookmarks, last-read   │
//! │  - Writes through to the store on every change              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Content (book/) and Storage (store/)                       │
//! │  - Book: immutable chapter/section tree                     │
//! │  - KeyValueStore: FileStore (production), MemStore (tests)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values. It
//! never prints, never exits the process and never assumes a terminal.
//! Logging goes through `tracing`; installing a subscriber is the client's
//! job.
//!
//! ## Failure Model
//!
//! Navigation itself cannot fail: unknown ids are no-ops, the cursor always
//! points at a real section. Persisted state is read fail-safe (anything
//! unreadable becomes the default) and written best-effort (failures are
//! logged, never surfaced). Errors ([`error::FolioError`]) come only from the
//! edges: loading a book, resolving a user-typed locator, config files.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests against [`store::memory::MemStore`],
//!    which counts writes per key and can simulate store failures.
//! 2. **API**: dispatch tests.
//! 3. **CLI**: argument parsing and rendering unit tests, plus end-to-end
//!    tests in `tests/` that run the binary against a temp data directory.

pub mod api;
pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod hydrate;
pub mod listing;
pub mod locator;
pub mod model;
pub mod navigator;
pub mod prefs;
pub mod store;
pub mod views;

#[cfg(test)]
pub mod test_utils;
