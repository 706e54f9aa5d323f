//! Document Export Module for Inkpad
//!
//! Wraps converted notes in standalone, themed HTML documents.
//!
//! - `html.rs` - HTML document generation with theme styling

pub mod html;

pub use html::{generate_html_document, generate_html_fragment};
