use crate::afm;
use crate::font::FontMetrics;
use crate::refs::{ObjectReferences, RefType};
use crate::{Error, Pt};
use pdf_writer::{Name, Pdf};
use std::str::FromStr;

/// Every Courier glyph advances by the same amount, in thousandths of an em
const COURIER_ADVANCE: u16 = 600;

/// The PDF standard-14 fonts. These are built into every PDF reader, so they need no
/// font file and are never embedded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StandardFont {
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    pub const ALL: [StandardFont; 14] = [
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierOblique,
        StandardFont::CourierBoldOblique,
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::TimesBoldItalic,
        StandardFont::Symbol,
        StandardFont::ZapfDingbats,
    ];

    /// The PostScript name readers know the face by
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Look up a face by its exact PostScript name
    pub fn from_name(name: &str) -> Result<StandardFont, Error> {
        StandardFont::ALL
            .into_iter()
            .find(|font| font.base_font() == name)
            .ok_or_else(|| Error::UnknownStandardFont(name.to_string()))
    }

    /// Symbol and ZapfDingbats draw with their own built-in encoding rather than
    /// `WinAnsiEncoding`
    pub fn is_symbolic(&self) -> bool {
        matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats)
    }

    /// Per-code advances, or `None` for the fixed-pitch Courier faces
    fn widths(&self) -> Option<&'static [u16; 256]> {
        match self {
            StandardFont::Courier
            | StandardFont::CourierBold
            | StandardFont::CourierOblique
            | StandardFont::CourierBoldOblique => None,
            StandardFont::Helvetica | StandardFont::HelveticaOblique => Some(&afm::HELVETICA),
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => {
                Some(&afm::HELVETICA_BOLD)
            }
            StandardFont::TimesRoman => Some(&afm::TIMES_ROMAN),
            StandardFont::TimesBold => Some(&afm::TIMES_BOLD),
            StandardFont::TimesItalic => Some(&afm::TIMES_ITALIC),
            StandardFont::TimesBoldItalic => Some(&afm::TIMES_BOLD_ITALIC),
            StandardFont::Symbol => Some(&afm::SYMBOL),
            StandardFont::ZapfDingbats => Some(&afm::ZAPF_DINGBATS),
        }
    }

    /// `FontBBox` from the Adobe font metrics, as (y_min, y_max) in thousandths of an em
    fn vertical_bounds(&self) -> (f32, f32) {
        match self {
            StandardFont::Courier | StandardFont::CourierOblique => (-250.0, 805.0),
            StandardFont::CourierBold | StandardFont::CourierBoldOblique => (-250.0, 801.0),
            StandardFont::Helvetica | StandardFont::HelveticaOblique => (-225.0, 931.0),
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => (-228.0, 962.0),
            StandardFont::TimesRoman => (-218.0, 898.0),
            StandardFont::TimesBold => (-218.0, 935.0),
            StandardFont::TimesItalic => (-217.0, 883.0),
            StandardFont::TimesBoldItalic => (-218.0, 921.0),
            StandardFont::Symbol => (-293.0, 1010.0),
            StandardFont::ZapfDingbats => (-143.0, 820.0),
        }
    }

    /// The byte `ch` is drawn with. Characters the font's encoding can't represent are
    /// drawn as `?`.
    fn code(&self, ch: char) -> u8 {
        let code = if self.is_symbolic() {
            u8::try_from(u32::from(ch)).ok()
        } else {
            win_ansi_byte(ch)
        };
        code.unwrap_or(b'?')
    }

    /// Encode text as the hex string of its bytes in the font's encoding
    pub(crate) fn encode_hex(&self, text: &str) -> String {
        text.chars()
            .map(|ch| format!("{:02x}", self.code(ch)))
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Font);
        let mut font = writer.type1_font(id);
        font.base_font(Name(self.base_font().as_bytes()));
        if !self.is_symbolic() {
            font.encoding_predefined(Name(b"WinAnsiEncoding"));
        }
    }
}

impl FromStr for StandardFont {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandardFont::from_name(s)
    }
}

impl FontMetrics for StandardFont {
    fn width(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = match self.widths() {
            Some(widths) => text
                .chars()
                .map(|ch| u32::from(widths[usize::from(self.code(ch))]))
                .sum(),
            None => text.chars().count() as u32 * u32::from(COURIER_ADVANCE),
        };
        Pt(units as f32 * size.0 / 1000.0)
    }

    fn line_advance(&self, size: Pt) -> Pt {
        let (y_min, y_max) = self.vertical_bounds();
        Pt((y_max - y_min) / 1000.0 * size.0)
    }
}

/// Map a character onto its `WinAnsiEncoding` code, if it has one
fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7e | 0xa0..=0xff => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8a),
            '‹' => Some(0x8b),
            'Œ' => Some(0x8c),
            'Ž' => Some(0x8e),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9a),
            '›' => Some(0x9b),
            'œ' => Some(0x9c),
            'ž' => Some(0x9e),
            'Ÿ' => Some(0x9f),
            _ => None,
        },
    }
}
