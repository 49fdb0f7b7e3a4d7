//! # CLI Layer
//!
//! One possible client for folio, not the application itself. This is the
//! only place that knows about stdout, stderr, exit codes and terminal
//! colors.
//!
//! ## One-shot and session modes
//!
//! Every subcommand except `session` builds a fresh [`folio::api::FolioApi`],
//! hydrated from the data directory, runs a single intent and exits. The
//! persisted bookmarks and last-read pointer are what connect one run to
//! the next, so `folio next` right after `folio read 1.1` lands on 1.2.
//!
//! `folio session` keeps one API alive and reads commands from stdin. It is
//! the only mode where the reading view's font size and highlight survive
//! between intents.
//!
//! Running `folio` with no subcommand shows the table of contents.
//!
//! ## Structure
//!
//! - `commands`: `run()`, context setup and per-command handlers
//! - `render`: screen rendering and message printing
//! - `session`: the interactive loop
//! - `setup`: clap definitions and log setup
//! - `styles`: terminal style table
//! - `templates`: output templates

mod commands;
mod render;
mod session;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
