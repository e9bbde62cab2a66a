use crate::{
    refs::{ObjectReferences, RefType},
    standard_font::StandardFont,
    Error, Pt,
};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::{
    types::{FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// The measurements the layout engine needs from a font. Implementations must be
/// deterministic: the same text at the same size always measures the same.
pub trait FontMetrics {
    /// The horizontal advance of `text` when set at `size`
    fn width(&self, text: &str, size: Pt) -> Pt;

    /// The height of the font's bounding box when set at `size`. The layout engine
    /// multiplies this by its line-height factor to get the distance between baselines.
    fn line_advance(&self, size: Pt) -> Pt;
}

impl<T: FontMetrics + ?Sized> FontMetrics for &T {
    fn width(&self, text: &str, size: Pt) -> Pt {
        (**self).width(text, size)
    }

    fn line_advance(&self, size: Pt) -> Pt {
        (**self).line_advance(size)
    }
}

/// A parsed TrueType or OpenType font. The font is embedded in its entirety in the
/// generated PDF, so large fonts may dramatically increase the size of the output.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, Error> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the full name of the font, if the font declares one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if the font declares one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Pt) -> f32 {
        size.0 / self.face.as_face_ref().units_per_em() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face.as_face_ref().glyph_index('\u{FFFD}').map(|i| i.0)
    }

    /// The glyph drawn for `ch`: its own glyph, else the replacement character, else `?`
    pub fn glyph_or_replacement(&self, ch: char) -> Option<u16> {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
    }

    /// Encode text as a hex string of glyph ids, suitable for an `Identity-H` font
    pub(crate) fn encode_hex(&self, text: &str) -> String {
        text.chars()
            .filter_map(|ch| self.glyph_or_replacement(ch))
            .map(|gid| format!("{gid:04x}"))
            .collect()
    }

    fn write_cid(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Result<Ref, Error> {
        let font_descriptor_id = self.write_descriptor(refs, writer)?;

        let id = refs.gen(RefType::CidFont);

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(pdf_writer::types::CidFontType::Type2);
        cid_font.base_font(Name(b"F0"));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let ids = self.glyph_ids()?;
        let ids_augmented = self.glyphs_sizing(&ids);

        let scaling = 1000.0 / self.face.as_face_ref().units_per_em() as f32;

        // the most popular width becomes the default
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for (_, (width, _)) in ids_augmented.values() {
            *widths_counts.entry(*width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&width, _)| width as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = ids_augmented
            .iter()
            .map(|(&cid, &(_, (width, _)))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);

        // consecutive glyph ids share a single width block
        let mut blocks = id_widths.into_iter();
        if let Some((first_cid, first_width)) = blocks.next() {
            let mut start_cid: u16 = first_cid;
            let mut current_widths: Vec<f32> = vec![first_width];
            for (cid, width) in blocks {
                if (cid - start_cid) as usize > current_widths.len() {
                    widths.consecutive(start_cid, current_widths.clone());
                    start_cid = cid;
                    current_widths.clear();
                }
                current_widths.push(width);
            }
            widths.consecutive(start_cid, current_widths);
        }
        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        Ok(id)
    }

    fn write_font_data(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::FontData);

        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Result<Ref, Error> {
        let font_data_stream_id = self.write_font_data(refs, writer);

        let gids = self.glyph_ids()?;
        let gids_augmented = self.glyphs_sizing(&gids);

        let max_width = gids_augmented
            .values()
            .map(|&(_, (w, _))| w)
            .max()
            .unwrap_or_default();
        let sum_width: usize = gids_augmented.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / gids_augmented.len().max(1) as f32;

        let face = self.face.as_face_ref();
        let id = refs.gen(RefType::FontDescriptor);

        let name = self.name().unwrap_or_else(|| "F0".to_string());
        let family = self.family().unwrap_or_else(|| name.clone());

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default()) as f32
                * scaling,
        );
        // TODO: derive the vertical stem width from the glyph outlines
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        Ok(id)
    }

    fn glyph_ids(&self) -> Result<HashMap<u16, char>, Error> {
        let mut map: HashMap<u16, char> = HashMap::new();

        let cmap = self
            .face
            .as_face_ref()
            .tables()
            .cmap
            .ok_or(Error::MissingFontTable("cmap"))?;

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        Ok(map)
    }

    fn glyphs_sizing(&self, ids: &HashMap<u16, char>) -> HashMap<u16, (char, (u16, i32))> {
        let face = self.face.as_face_ref();
        let mut ids_augmented: HashMap<u16, (char, (u16, i32))> = HashMap::new();
        for (&id, &ch) in ids.iter() {
            if let Some(gid) = face.glyph_index(ch) {
                if let Some(h_advance) = face.glyph_hor_advance(gid) {
                    let height = face
                        .glyph_bounding_box(gid)
                        .map(|bbox| glyph_height(bbox, face.descender()))
                        .unwrap_or(1000);
                    ids_augmented.insert(id, (ch, (h_advance, height)));
                }
            }
        }
        ids_augmented
    }

    fn write_to_unicode(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Result<Ref, Error> {
        let id = refs.gen(RefType::ToUnicode);

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        let mut ids: Vec<(u16, char)> = self.glyph_ids()?.into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // segments hold at most 100 entries, all sharing a high byte
        let mut cmap_blocks: Vec<Vec<(u16, char)>> = Vec::new();
        let mut current_block: Vec<(u16, char)> = Vec::new();
        let mut high_byte: u8 = 0;
        for &(id, ch) in ids.iter() {
            if (id >> 8) as u8 != high_byte || current_block.len() >= 100 {
                if !current_block.is_empty() {
                    cmap_blocks.push(std::mem::take(&mut current_block));
                }
                high_byte = (id >> 8) as u8;
            }

            current_block.push((id, ch));
        }
        if !current_block.is_empty() {
            cmap_blocks.push(current_block);
        }

        for block in cmap_blocks.into_iter() {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block.into_iter() {
                map.push_str(&format!("<{id:04x}> <{}>\n", utf16_hex(ch)));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        Ok(id)
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Result<(), Error> {
        let font_id = refs.gen(RefType::Font);
        let cid_font_id = self.write_cid(refs, writer)?;
        let to_unicode_id = self.write_to_unicode(refs, writer)?;

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(b"F0"));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
        Ok(())
    }
}

/// Glyph height below the ascender line, widened so malformed metrics can't overflow
fn glyph_height(bbox: owned_ttf_parser::Rect, descender: i16) -> i32 {
    i32::from(bbox.y_max) - i32::from(bbox.y_min) - i32::from(descender)
}

/// A character as UTF-16BE hex, the form ToUnicode CMaps map glyphs onto
fn utf16_hex(ch: char) -> String {
    let mut units = [0u16; 2];
    ch.encode_utf16(&mut units)
        .iter()
        .map(|unit| format!("{unit:04x}"))
        .collect()
}

impl FontMetrics for Font {
    /// Sum of the horizontal glyph advances; characters missing from the font are
    /// measured as the glyph that will be drawn in their place
    fn width(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .filter_map(|ch| self.glyph_or_replacement(ch))
            .map(|gid| {
                Pt(scaling
                    * self
                        .face
                        .as_face_ref()
                        .glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                        .unwrap_or_default() as f32)
            })
            .sum()
    }

    fn line_advance(&self, size: Pt) -> Pt {
        let bbox = self.face.as_face_ref().global_bounding_box();
        Pt(self.scaling(size) * (bbox.y_max as f32 - bbox.y_min as f32))
    }
}

/// The font a [`Document`](crate::Document) is written with
pub enum DocumentFont {
    /// A TrueType / OpenType font embedded in the PDF
    Embedded(Font),
    /// One of the standard PDF fonts every reader ships with
    Standard(StandardFont),
}

impl DocumentFont {
    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Result<(), Error> {
        match self {
            DocumentFont::Embedded(font) => font.write(refs, writer),
            DocumentFont::Standard(font) => {
                font.write(refs, writer);
                Ok(())
            }
        }
    }

    /// Encode text as the hex string body of a `Tj` operand
    pub(crate) fn encode_hex(&self, text: &str) -> String {
        match self {
            DocumentFont::Embedded(font) => font.encode_hex(text),
            DocumentFont::Standard(font) => font.encode_hex(text),
        }
    }
}

impl FontMetrics for DocumentFont {
    fn width(&self, text: &str, size: Pt) -> Pt {
        match self {
            DocumentFont::Embedded(font) => font.width(text, size),
            DocumentFont::Standard(font) => font.width(text, size),
        }
    }

    fn line_advance(&self, size: Pt) -> Pt {
        match self {
            DocumentFont::Embedded(font) => font.line_advance(size),
            DocumentFont::Standard(font) => font.line_advance(size),
        }
    }
}

impl From<Font> for DocumentFont {
    fn from(font: Font) -> Self {
        DocumentFont::Embedded(font)
    }
}

impl From<StandardFont> for DocumentFont {
    fn from(font: StandardFont) -> Self {
        DocumentFont::Standard(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_not_a_font() {
        assert!(matches!(
            Font::load(vec![0, 1, 2, 3]),
            Err(Error::FaceParsingError(_))
        ));
    }

    #[test]
    fn cmap_targets_are_utf16() {
        assert_eq!(utf16_hex('A'), "0041");
        assert_eq!(utf16_hex('\u{ffff}'), "ffff");
        assert_eq!(utf16_hex('😀'), "d83dde00");
        assert_eq!(utf16_hex('\u{10000}'), "d800dc00");
    }

    #[test]
    fn extreme_glyph_bounds_do_not_overflow() {
        let bbox = owned_ttf_parser::Rect {
            x_min: 0,
            y_min: i16::MIN,
            x_max: 0,
            y_max: i16::MAX,
        };
        assert_eq!(glyph_height(bbox, i16::MIN), 98_303);
    }

    #[test]
    fn references_measure_like_their_target() {
        let font = DocumentFont::from(StandardFont::Courier);
        let by_ref: &dyn FontMetrics = &font;
        assert_eq!(by_ref.width("abc", Pt(10.0)), font.width("abc", Pt(10.0)));
        assert_eq!(
            (&by_ref).line_advance(Pt(10.0)),
            StandardFont::Courier.line_advance(Pt(10.0))
        );
    }
}
