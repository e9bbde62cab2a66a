//! Named page sizes for the paper formats text documents are laid out on.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape, or [`from_name`](crate::pagesize::from_name) to resolve a
//! user-supplied name such as `"a4"`.
//!
//! # Example
//!
//! ```
//! use txt2pdf::pagesize::{self, PageOrientation, A4, LETTER};
//!
//! assert_eq!(pagesize::from_name("letter"), Some(LETTER));
//! assert_eq!(pagesize::from_name("Tabloid"), None);
//!
//! let landscape = A4.landscape();
//! assert!(landscape.0 > landscape.1);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A0: PageSize = (Pt(841.0 * 72.0 / 25.4), Pt(1189.0 * 72.0 / 25.4));
pub const A1: PageSize = (Pt(594.0 * 72.0 / 25.4), Pt(841.0 * 72.0 / 25.4));
pub const A2: PageSize = (Pt(420.0 * 72.0 / 25.4), Pt(594.0 * 72.0 / 25.4));
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const A6: PageSize = (Pt(105.0 * 72.0 / 25.4), Pt(148.0 * 72.0 / 25.4));

/// Every size [`from_name`] understands, keyed by its canonical name
pub const NAMED_SIZES: [(&str, PageSize); 9] = [
    ("Letter", LETTER),
    ("Legal", LEGAL),
    ("A0", A0),
    ("A1", A1),
    ("A2", A2),
    ("A3", A3),
    ("A4", A4),
    ("A5", A5),
    ("A6", A6),
];

/// Look up a page size by name, ignoring ASCII case. Returns [None] for names
/// outside of [`NAMED_SIZES`].
pub fn from_name(name: &str) -> Option<PageSize> {
    NAMED_SIZES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, size)| size)
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
    /// Returns the size with width and height exchanged, whatever the current orientation.
    fn rotated(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            self.rotated()
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            self.rotated()
        }
    }

    fn rotated(self) -> PageSize {
        (self.1, self.0)
    }
}
