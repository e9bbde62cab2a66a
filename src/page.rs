use crate::content::render_lines;
use crate::font::DocumentFont;
use crate::layout::Fragment;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::Error;
use pdf_writer::{Finish, Name, Pdf, Ref};

/// A [Fragment] pinned to the baseline position it is drawn at
#[derive(Clone, PartialEq, Debug)]
pub struct PlacedFragment {
    pub fragment: Fragment,
    /// Where the fragment's baseline starts, measured from the bottom-left of the page
    pub coords: (Pt, Pt),
}

impl PlacedFragment {
    /// The text that gets drawn
    pub fn text(&self) -> &str {
        self.fragment.text()
    }
}

/// The objects a page refers to when it is written
#[derive(Copy, Clone, Debug)]
pub(crate) struct PageRefs {
    pub id: Ref,
    pub parent: Ref,
    pub font_id: Ref,
}

/// A single laid out page: its geometry and the lines drawn on it, top to bottom
#[derive(Clone, PartialEq, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out lines, in drawing order
    pub lines: Vec<PlacedFragment>,
}

impl Page {
    /// Create an empty page of the given size with the same margin on every side
    pub fn new(size: PageSize, margin: Pt) -> Page {
        let media_box = Rect::from_size(size.0, size.1);
        Page {
            media_box,
            content_box: media_box.inset(margin),
            lines: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// `true` if nothing is drawn on the page
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add_line(&mut self, fragment: Fragment, coords: (Pt, Pt)) {
        self.lines.push(PlacedFragment { fragment, coords });
    }

    /// Iterate over the drawn text of each line, top to bottom
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(PlacedFragment::text)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        ids: PageRefs,
        font: &DocumentFont,
        font_size: Pt,
        writer: &mut Pdf,
    ) -> Result<(), Error> {
        let PageRefs { id, parent, font_id } = ids;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        resources.fonts().pair(Name(b"F0"), font_id);
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_lines(&self.lines, font, font_size)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}
