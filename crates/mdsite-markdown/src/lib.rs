//! Line-oriented Markdown renderer.
//!
//! Converts a Markdown document into a page title and an HTML fragment using an
//! ordered list of line rules. There is no parser or AST: each body line is
//! classified on its own, list items are hoisted into a single trailing `<ul>`.

pub mod render;
pub mod rules;

pub use render::{extract_title, render_markdown, RenderedDoc, UNTITLED};
pub use rules::{hoist_list_items, LineRule, LINE_RULES};
