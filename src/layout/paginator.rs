use std::collections::VecDeque;

use super::{Fragment, LayoutConfig};
use crate::pagesize::PageSize;
use crate::units::Pt;
use crate::{Error, Page};

/// Places [Fragment]s top to bottom onto pages, opening a new page when the vertical
/// cursor drops below the bottom margin or when a fragment forces a page break.
///
/// Pages are handed back in order as soon as they are closed through
/// [`Paginator::drain_completed`], so a consumer can process a long document one page at
/// a time. [`Paginator::finish`] closes the last page.
pub struct Paginator {
    media_size: PageSize,
    margin: Pt,
    line_advance: Pt,
    /// Baseline of the most recently drawn line on the open page
    y: Pt,
    current: Option<Page>,
    completed: VecDeque<Page>,
    pages_opened: usize,
}

impl Paginator {
    /// Create a paginator for the geometry in `config`, advancing `line_advance` for
    /// every line drawn
    pub fn new(config: &LayoutConfig, line_advance: Pt) -> Paginator {
        Paginator {
            media_size: config.media_size(),
            margin: config.margin,
            line_advance,
            // below any margin, so the first fragment always opens a page
            y: Pt(-1.0),
            current: None,
            completed: VecDeque::new(),
            pages_opened: 0,
        }
    }

    /// The baseline a page's first line is drawn at
    pub fn top_baseline(&self) -> Pt {
        self.media_size.1 - self.margin
    }

    /// Draw the fragment on the current page, opening pages as needed
    pub fn push(&mut self, fragment: Fragment) -> Result<(), Error> {
        if self.y < self.margin {
            self.open_page();
        }

        let forces_page_break = fragment.forces_page_break;
        let page = self.current.as_mut().ok_or(Error::NoOpenPage)?;
        self.y -= self.line_advance;
        page.add_line(fragment, (self.margin, self.y));

        if forces_page_break {
            log::debug!("page break requested on page {}", self.pages_opened);
            self.open_page();
        }
        Ok(())
    }

    /// Close the open page, if any, and start a fresh one with the cursor at the top
    fn open_page(&mut self) {
        self.close_page();
        self.current = Some(Page::new(self.media_size, self.margin));
        self.y = self.top_baseline() + self.line_advance;
        self.pages_opened += 1;
        log::debug!("opened page {}", self.pages_opened);
    }

    fn close_page(&mut self) {
        if let Some(page) = self.current.take() {
            log::debug!("closed a page with {} lines", page.lines.len());
            self.completed.push_back(page);
        }
    }

    /// How many pages have been started so far, including the open one
    pub fn pages_opened(&self) -> usize {
        self.pages_opened
    }

    /// Take every page that has been closed so far, in order
    pub fn drain_completed(&mut self) -> impl Iterator<Item = Page> + '_ {
        self.completed.drain(..)
    }

    /// Close the open page and return every page not yet drained. If no page was ever
    /// opened, a single empty page is returned so a document is never without pages.
    pub fn finish(mut self) -> Vec<Page> {
        if self.pages_opened == 0 {
            log::debug!("nothing was drawn, producing a single blank page");
            self.open_page();
        }
        self.close_page();
        self.completed.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 100x100 page with a 10pt margin holds baselines 90, 80, ... down to 0
    fn paginator() -> Paginator {
        let config = LayoutConfig::new((Pt(100.0), Pt(100.0))).margin(Pt(10.0)).clone();
        Paginator::new(&config, Pt(10.0))
    }

    fn line(text: &str) -> Fragment {
        Fragment::new(text, false)
    }

    fn baselines(page: &Page) -> Vec<f32> {
        page.lines.iter().map(|line| line.coords.1 .0).collect()
    }

    #[test]
    fn nothing_pushed_is_one_empty_page() {
        let pages = paginator().finish();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
        assert_eq!(pages[0].width(), Pt(100.0));
    }

    #[test]
    fn cursor_steps_down_one_advance_per_line() {
        let mut paginator = paginator();
        for text in ["a ", "b ", "c "] {
            paginator.push(line(text)).expect("page is open");
        }
        let pages = paginator.finish();
        assert_eq!(pages.len(), 1);
        assert_eq!(baselines(&pages[0]), vec![90.0, 80.0, 70.0]);
        assert!(pages[0].lines.iter().all(|line| line.coords.0 == Pt(10.0)));
    }

    #[test]
    fn exhausted_cursor_opens_a_new_page() {
        let mut paginator = paginator();
        for i in 0..12 {
            paginator.push(line(&format!("{i} "))).expect("page is open");
        }
        let pages = paginator.finish();
        assert_eq!(pages.len(), 2);
        // a line is still drawn while the previous baseline sits on the margin
        assert_eq!(
            baselines(&pages[0]),
            vec![90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0, 0.0]
        );
        assert_eq!(baselines(&pages[1]), vec![90.0, 80.0]);
        assert_eq!(pages[1].lines[0].text(), "10 ");
    }

    #[test]
    fn forced_break_starts_a_new_page_with_room_left() {
        let mut paginator = paginator();
        paginator.push(Fragment::new("abc ", true)).expect("page is open");
        paginator.push(line("def ")).expect("page is open");
        let pages = paginator.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].texts().collect::<Vec<_>>(), vec!["abc "]);
        assert_eq!(pages[1].texts().collect::<Vec<_>>(), vec!["def "]);
        assert_eq!(baselines(&pages[1]), vec![90.0]);
    }

    #[test]
    fn trailing_break_leaves_an_empty_page() {
        let mut paginator = paginator();
        paginator.push(Fragment::new("abc ", true)).expect("page is open");
        let pages = paginator.finish();
        assert_eq!(pages.len(), 2);
        assert!(pages[1].is_empty());
    }

    #[test]
    fn closed_pages_drain_in_order() {
        let mut paginator = paginator();
        paginator.push(Fragment::new("one ", true)).expect("page is open");
        paginator.push(Fragment::new("two ", true)).expect("page is open");

        let drained: Vec<Page> = paginator.drain_completed().collect();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].lines[0].text(), "one ");
        assert_eq!(drained[1].lines[0].text(), "two ");
        assert_eq!(paginator.drain_completed().count(), 0);

        let rest = paginator.finish();
        assert_eq!(rest.len(), 1);
        assert!(rest[0].is_empty());
    }

    #[test]
    fn landscape_pages_are_rotated() {
        let config = LayoutConfig::new((Pt(100.0), Pt(200.0)))
            .margin(Pt(10.0))
            .landscape(true)
            .clone();
        let mut paginator = Paginator::new(&config, Pt(10.0));
        paginator.push(line("a ")).expect("page is open");
        let pages = paginator.finish();
        assert_eq!(pages[0].width(), Pt(200.0));
        assert_eq!(pages[0].height(), Pt(100.0));
        assert_eq!(baselines(&pages[0]), vec![90.0]);
    }
}
