use crate::font::FontMetrics;
use crate::pagesize::{self, PageOrientation, PageSize};
use crate::units::Pt;
use crate::Error;

/// Distance between baselines, as a multiple of the font's bounding box height
pub const LINE_HEIGHT_FACTOR: f32 = 1.05;

/// The font size used when none is configured
pub const DEFAULT_FONT_SIZE: Pt = Pt(10.0);

/// The margin used on every side of the page when none is configured
pub const DEFAULT_MARGIN: Pt = Pt(40.0);

/// Page geometry and type size for a layout run. Settings are chained in place:
///
/// ```
/// use txt2pdf::layout::LayoutConfig;
/// use txt2pdf::Pt;
///
/// let config = LayoutConfig::default()
///     .page_size_named("a4")
///     .expect("a4 is a known page size")
///     .font_size(Pt(12.0))
///     .landscape(true)
///     .clone();
/// assert!(config.validate().is_ok());
/// assert!(config.media_size().0 > config.media_size().1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub font_size: Pt,
    /// The page size in its configured orientation, before `landscape` is applied
    pub page_size: PageSize,
    /// Applied to all four sides of the page
    pub margin: Pt,
    /// Lay pages out with their width and height exchanged
    pub landscape: bool,
    pub line_height_factor: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            font_size: DEFAULT_FONT_SIZE,
            page_size: pagesize::LETTER,
            margin: DEFAULT_MARGIN,
            landscape: false,
            line_height_factor: LINE_HEIGHT_FACTOR,
        }
    }
}

impl LayoutConfig {
    /// Create a config for the given page size, with every other setting at its default
    pub fn new(page_size: PageSize) -> LayoutConfig {
        LayoutConfig {
            page_size,
            ..LayoutConfig::default()
        }
    }

    /// Set the font size, modifying `self`
    pub fn font_size(&mut self, font_size: Pt) -> &mut Self {
        self.font_size = font_size;
        self
    }

    /// Set the page size, modifying `self`
    pub fn page_size(&mut self, page_size: PageSize) -> &mut Self {
        self.page_size = page_size;
        self
    }

    /// Set the page size by name (see [`pagesize::from_name`]), modifying `self`
    pub fn page_size_named(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.page_size =
            pagesize::from_name(name).ok_or_else(|| Error::UnknownPageSize(name.to_string()))?;
        Ok(self)
    }

    /// Set the margin applied to every side, modifying `self`
    pub fn margin<D: Into<Pt>>(&mut self, margin: D) -> &mut Self {
        self.margin = margin.into();
        self
    }

    /// Set whether pages are laid out in landscape, modifying `self`
    pub fn landscape(&mut self, landscape: bool) -> &mut Self {
        self.landscape = landscape;
        self
    }

    /// The size of the pages that will be produced, with `landscape` applied
    pub fn media_size(&self) -> PageSize {
        if self.landscape {
            self.page_size.rotated()
        } else {
            self.page_size
        }
    }

    /// The width available to a line of text
    pub fn usable_width(&self) -> Pt {
        self.media_size().0 - self.margin * 2.0
    }

    pub fn usable_height(&self) -> Pt {
        self.media_size().1 - self.margin * 2.0
    }

    /// Distance between consecutive baselines when set in `font`
    pub fn line_advance<F: FontMetrics + ?Sized>(&self, font: &F) -> Pt {
        font.line_advance(self.font_size) * self.line_height_factor
    }

    /// Check that the configuration leaves room to draw text
    pub fn validate(&self) -> Result<(), Error> {
        let positive = |value: f32| value.is_finite() && value > 0.0;

        if !positive(self.font_size.0) {
            return Err(Error::InvalidConfig("font size must be a positive number"));
        }
        if !positive(self.page_size.0 .0) || !positive(self.page_size.1 .0) {
            return Err(Error::InvalidConfig("page dimensions must be positive"));
        }
        if !self.margin.0.is_finite() || self.margin.0 < 0.0 {
            return Err(Error::InvalidConfig("margin must not be negative"));
        }
        if !positive(self.line_height_factor) {
            return Err(Error::InvalidConfig("line height factor must be positive"));
        }
        if !positive(self.usable_width().0) {
            return Err(Error::InvalidConfig("margins leave no usable width"));
        }
        if !positive(self.usable_height().0) {
            return Err(Error::InvalidConfig("margins leave no usable height"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::{A4, LETTER};
    use crate::StandardFont;

    #[test]
    fn defaults_match_the_text_conversion_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.font_size, Pt(10.0));
        assert_eq!(config.page_size, LETTER);
        assert_eq!(config.margin, Pt(40.0));
        assert!(!config.landscape);
        assert_eq!(config.line_height_factor, 1.05);
        assert_eq!(config.usable_width(), Pt(532.0));
        assert_eq!(config.usable_height(), Pt(712.0));
    }

    #[test]
    fn landscape_swaps_the_page() {
        let config = LayoutConfig::new(LETTER).landscape(true).clone();
        assert_eq!(config.media_size(), (Pt(792.0), Pt(612.0)));
        assert_eq!(config.usable_width(), Pt(712.0));
    }

    #[test]
    fn named_sizes_resolve_or_fail() {
        let mut config = LayoutConfig::default();
        assert!(config.page_size_named("A4").is_ok());
        assert_eq!(config.page_size, A4);

        assert!(matches!(
            config.page_size_named("B5"),
            Err(Error::UnknownPageSize(name)) if name == "B5"
        ));
        assert_eq!(config.page_size, A4);
    }

    #[test]
    fn line_advance_applies_the_factor() {
        let config = LayoutConfig::default();
        let advance = config.line_advance(&StandardFont::Courier);
        assert!((advance.0 - 10.55 * 1.05).abs() < 1e-3);
    }

    #[test]
    fn margins_that_swallow_the_page_are_rejected() {
        let config = LayoutConfig::new((Pt(100.0), Pt(300.0))).margin(Pt(50.0)).clone();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = LayoutConfig::new((Pt(300.0), Pt(100.0))).margin(Pt(60.0)).clone();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = LayoutConfig::default().margin(Pt(-1.0)).clone();
        assert!(config.validate().is_err());

        let config = LayoutConfig::default().font_size(Pt(0.0)).clone();
        assert!(config.validate().is_err());

        let config = LayoutConfig::default().margin(Pt(0.0)).clone();
        assert!(config.validate().is_ok());
    }
}
