//! Convert plain text into paginated PDF documents.
//!
//! Text is wrapped and paginated by the [layout] module against any [FontMetrics]
//! implementation, producing a [Document] of positioned lines that can then be written
//! out as a PDF with [Document::write].
//!
//! ```
//! use txt2pdf::layout::{LayoutConfig, LayoutEngine};
//! use txt2pdf::{DocumentFont, StandardFont};
//!
//! let config = LayoutConfig::default();
//! let engine = LayoutEngine::new(config, &StandardFont::Courier).expect("config is valid");
//! let document = engine.layout_str("hello world").expect("can lay out");
//!
//! let mut pdf: Vec<u8> = Vec::new();
//! document
//!     .write(&DocumentFont::Standard(StandardFont::Courier), &mut pdf)
//!     .expect("can write pdf");
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

mod afm;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Wrapping and paginating plain text
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod standard_font;
pub use standard_font::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
