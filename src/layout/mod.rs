//! Plain text layout: wrapping source lines into fragments and placing those
//! fragments onto pages.
//!
//! Data flows one way through three stages:
//!
//! - [`SourceLines`](crate::layout::SourceLines) splits the input into lines
//! - [`LineBreaker`](crate::layout::LineBreaker) greedily wraps one line into
//!   [`Fragment`](crate::layout::Fragment)s that fit the usable page width, cutting a
//!   fragment short at every form feed
//! - [`Paginator`](crate::layout::Paginator) places fragments top to bottom, starting a
//!   new page when the bottom margin is reached or a fragment asks for a page break
//!
//! [`LayoutEngine`](crate::layout::LayoutEngine) runs all three over a whole input.
//!
//! # Example
//!
//! ```
//! use txt2pdf::layout::{LayoutConfig, LayoutEngine};
//! use txt2pdf::StandardFont;
//!
//! let engine = LayoutEngine::new(LayoutConfig::default(), &StandardFont::Courier)
//!     .expect("default config is valid");
//! let document = engine
//!     .layout_str("hello world\nsecond page starts here:\u{c}and here it is")
//!     .expect("can lay out text");
//!
//! assert_eq!(document.pages.len(), 2);
//! assert_eq!(document.pages[0].lines[0].text(), "hello world ");
//! assert_eq!(document.pages[1].lines[0].text(), "and here it is ");
//! ```

mod breaker;
mod config;
mod engine;
mod lines;
mod paginator;

pub use breaker::*;
pub use config::*;
pub use engine::*;
pub use lines::*;
pub use paginator::*;
