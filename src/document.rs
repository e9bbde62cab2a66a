use crate::{
    font::DocumentFont,
    info::Info,
    page::{Page, PageRefs},
    refs::{ObjectReferences, RefType},
    units::Pt,
    Error,
};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

/// A laid out document: its pages in reading order, and the font size they were laid
/// out with. A document produced by the layout engine always has at least one page.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub info: Option<Info>,
    pub font_size: Pt,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(font_size: Pt, pages: Vec<Page>) -> Document {
        Document {
            info: None,
            font_size,
            pages,
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// The number of lines drawn across every page
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|page| page.lines.len()).sum()
    }

    /// Write the document as a PDF, drawing all text with `font`. `font` should be the
    /// font the document was laid out with, or lines may not fit their pages.
    ///
    /// The entire PDF is rendered in memory before being written out, so very large
    /// documents will allocate accordingly.
    pub fn write<W: Write>(self, font: &DocumentFont, mut w: W) -> Result<(), Error> {
        let Document {
            info,
            font_size,
            pages,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(refs.gen(RefType::Info), pages.len(), &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        font.write(&mut refs, &mut writer)?;
        let font_id = refs.get(RefType::Font).ok_or(Error::MissingFontTable("font"))?;

        for (page_index, (page, &id)) in pages.iter().zip(page_refs.iter()).enumerate() {
            let ids = PageRefs {
                id,
                parent: page_tree_id,
                font_id,
            };
            page.write(&mut refs, page_index, ids, font, font_size, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        let bytes = writer.finish();
        log::info!("wrote {} page(s), {} bytes", pages.len(), bytes.len());
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }
}
