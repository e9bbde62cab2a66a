use std::io::BufRead;

use super::{LayoutConfig, LineBreaker, Paginator, SourceLines};
use crate::font::FontMetrics;
use crate::{Document, Error, Page};

/// Lays plain text out onto pages: every source line is wrapped by a [LineBreaker] and
/// the resulting fragments are placed by a single [Paginator] shared by the whole run.
pub struct LayoutEngine<'f, F: FontMetrics + ?Sized> {
    config: LayoutConfig,
    font: &'f F,
}

impl<'f, F: FontMetrics + ?Sized> LayoutEngine<'f, F> {
    /// Create an engine, failing if the configuration leaves no room for text
    pub fn new(config: LayoutConfig, font: &'f F) -> Result<LayoutEngine<'f, F>, Error> {
        config.validate()?;
        Ok(LayoutEngine { config, font })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out everything `reader` yields into a [Document]
    pub fn layout<R: BufRead>(&self, reader: R) -> Result<Document, Error> {
        let mut pages: Vec<Page> = Vec::new();
        self.layout_with(reader, |page| {
            pages.push(page);
            Ok(())
        })?;
        Ok(Document::new(self.config.font_size, pages))
    }

    /// Lay out a string into a [Document]
    pub fn layout_str(&self, text: &str) -> Result<Document, Error> {
        self.layout(text.as_bytes())
    }

    /// Lay out everything `reader` yields, handing each page to `sink` as soon as it is
    /// complete. Pages arrive in order and at least one page is always produced. Returns
    /// the number of pages produced.
    ///
    /// Any error, from reading or from `sink`, stops the run immediately.
    pub fn layout_with<R, S>(&self, reader: R, mut sink: S) -> Result<usize, Error>
    where
        R: BufRead,
        S: FnMut(Page) -> Result<(), Error>,
    {
        let line_advance = self.config.line_advance(self.font);
        let max_width = self.config.usable_width();
        let mut paginator = Paginator::new(&self.config, line_advance);

        let mut page_count = 0usize;

        for line in SourceLines::new(reader) {
            let line = line?;
            for fragment in LineBreaker::new(&line, max_width, self.font, self.config.font_size) {
                paginator.push(fragment)?;
            }

            for page in paginator.drain_completed() {
                sink(page)?;
                page_count += 1;
            }
        }

        for page in paginator.finish() {
            sink(page)?;
            page_count += 1;
        }

        log::info!("laid out {page_count} page(s)");
        Ok(page_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Pt;
    use crate::StandardFont;
    use std::io;

    fn engine(config: LayoutConfig) -> LayoutEngine<'static, StandardFont> {
        LayoutEngine::new(config, &StandardFont::Courier).expect("config is valid")
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = LayoutConfig::default().margin(Pt(400.0)).clone();
        assert!(matches!(
            LayoutEngine::new(config, &StandardFont::Courier),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn blank_lines_take_up_a_line() {
        let document = engine(LayoutConfig::default())
            .layout_str("a\n\nb\n")
            .expect("can lay out");
        assert_eq!(document.pages.len(), 1);
        assert_eq!(
            document.pages[0].texts().collect::<Vec<_>>(),
            vec!["a ", " ", "b "]
        );
    }

    #[test]
    fn space_only_input_still_has_a_page() {
        let document = engine(LayoutConfig::default())
            .layout_str("   \n")
            .expect("can lay out");
        assert_eq!(document.pages.len(), 1);
        assert!(document.pages[0].is_empty());
    }

    #[test]
    fn sink_sees_pages_as_they_complete() {
        let mut seen = Vec::new();
        let count = engine(LayoutConfig::default())
            .layout_with("one\u{c}two\u{c}three".as_bytes(), |page| {
                seen.push(page.texts().map(str::to_string).collect::<Vec<_>>());
                Ok(())
            })
            .expect("can lay out");
        assert_eq!(count, 3);
        assert_eq!(seen, vec![vec!["one "], vec!["two "], vec!["three "]]);
    }

    #[test]
    fn sink_errors_abort_the_run() {
        let mut calls = 0;
        let result = engine(LayoutConfig::default()).layout_with("a\u{c}b\u{c}c".as_bytes(), |_| {
            calls += 1;
            Err(Error::Io(io::Error::new(io::ErrorKind::Other, "disk full")))
        });
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(calls, 1);
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn read_failures_surface() {
        let result = engine(LayoutConfig::default()).layout(io::BufReader::new(FailingReader));
        match result {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            Err(other) => panic!("expected an I/O error, got {other:?}"),
            Ok(_) => panic!("expected an I/O error, got a document"),
        }
    }
}
