//! # CLI Templates
//!
//! Screens are rendered from minijinja templates kept as standalone files,
//! which are easier to edit and diff than string literals in code.
//!
//! Templates are rendered with `trim_blocks` and `lstrip_blocks` on, so a
//! line holding only a block tag produces no output. A line that ends in a
//! block tag loses its newline too; templates close such lines with an
//! empty line to get the break back.
//!
//! Layout math (wrapping, bars, padding) stays in Rust. Templates pick
//! styles through the `style` filter, with the style name passed as data
//! where it depends on state.

pub const CONTENTS_TEMPLATE: &str = include_str!("templates/contents.jinja");
pub const READING_TEMPLATE: &str = include_str!("templates/reading.jinja");
