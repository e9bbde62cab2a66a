use crate::font::FontMetrics;
use crate::units::Pt;

/// Form feed. Forces the text following it onto a new page and is never drawn.
pub const PAGE_BREAK: char = '\u{000C}';

/// One drawable line of wrapped text
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Fragment {
    /// The words of the line, each followed by a single space
    text: String,
    /// Set when the line ended at a page-break marker
    pub forces_page_break: bool,
}

impl Fragment {
    pub fn new<S: Into<String>>(text: S, forces_page_break: bool) -> Fragment {
        Fragment {
            text: text.into(),
            forces_page_break,
        }
    }

    /// The text as it is drawn, including the trailing space after the last word
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The words making up the line, in order. Empty words from runs of spaces in the
    /// source line are kept.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text
            .strip_suffix(' ')
            .into_iter()
            .flat_map(|text| text.split(' '))
    }

    fn push_word(&mut self, word: &str) {
        self.text.push_str(word);
        self.text.push(' ');
    }
}

/// Split a source line into words on single spaces. Runs of spaces leave empty words
/// behind, except at the end of the line where they are dropped; an empty line is a
/// single empty word.
///
/// ```
/// use txt2pdf::layout::split_words;
///
/// assert_eq!(split_words("a  b"), vec!["a", "", "b"]);
/// assert_eq!(split_words("a b  "), vec!["a", "b"]);
/// assert_eq!(split_words(""), vec![""]);
/// assert!(split_words("   ").is_empty());
/// ```
pub fn split_words(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return vec![""];
    }

    let mut words: Vec<&str> = line.split(' ').collect();
    while words.last().is_some_and(|word| word.is_empty()) {
        words.pop();
    }
    words
}

/// Greedily wraps a single source line into [Fragment]s no wider than a width budget,
/// cutting a fragment short wherever a [PAGE_BREAK] appears. Fragments are produced
/// lazily, one per call to [Iterator::next].
///
/// A word wider than the whole budget is still emitted, alone on its own fragment.
pub struct LineBreaker<'a, F: FontMetrics + ?Sized> {
    words: Vec<&'a str>,
    /// The next word to place
    index: usize,
    max_width: Pt,
    font: &'a F,
    font_size: Pt,
}

impl<'a, F: FontMetrics + ?Sized> LineBreaker<'a, F> {
    pub fn new(line: &'a str, max_width: Pt, font: &'a F, font_size: Pt) -> LineBreaker<'a, F> {
        LineBreaker {
            words: split_words(line),
            index: 0,
            max_width,
            font,
            font_size,
        }
    }

    /// Whether adding the upcoming word to `fragment` would still fit the budget.
    /// The upcoming word is only measured up to any page-break marker it contains.
    fn next_word_fits(&self, fragment: &Fragment) -> bool {
        let Some(next) = self.words.get(self.index) else {
            return false;
        };
        let next = next
            .split_once(PAGE_BREAK)
            .map_or(*next, |(before, _)| before);

        let projected = self
            .font
            .width(&format!("{} {}", fragment.text, next), self.font_size);
        projected < self.max_width
    }
}

impl<F: FontMetrics + ?Sized> Iterator for LineBreaker<'_, F> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.words.len() {
            return None;
        }

        let mut fragment = Fragment::default();
        loop {
            let word = self.words[self.index];
            match word.split_once(PAGE_BREAK) {
                Some((before, after)) => {
                    if !before.is_empty() {
                        fragment.push_word(before);
                    }
                    // whatever follows the marker starts the next fragment
                    if after.is_empty() {
                        self.index += 1;
                    } else {
                        self.words[self.index] = after;
                    }
                    fragment.forces_page_break = true;
                    break;
                }
                None => {
                    fragment.push_word(word);
                    self.index += 1;
                }
            }

            if !self.next_word_fits(&fragment) {
                break;
            }
        }

        log::trace!(
            "wrapped fragment {:?} (page break: {})",
            fragment.text,
            fragment.forces_page_break
        );
        Some(fragment)
    }
}
