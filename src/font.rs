use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed TrueType / OpenType font. The font is embedded in its entirety when the
/// document is encoded, so large fonts will dramatically increase the size of the
/// generated PDF.
pub struct Font {
    pub face: OwnedFace,
}

/// One of the standard PDF fonts every viewer ships with. These are never embedded;
/// their metrics are compiled into the crate so that measuring text is pure and needs
/// no font files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

/// A font face that text styles can refer to
#[derive(Debug)]
pub enum FontFace {
    Builtin(BuiltinFont),
    TrueType(Font),
}

/// Immutable registry of the font faces available to a build, addressed by name from
/// the style sheet and by [`Id`] from laid out text runs.
#[derive(Debug)]
pub struct FontBook {
    faces: Arena<FontFace>,
    names: HashMap<String, Id<FontFace>>,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font").field("name", &self.name()).finish()
    }
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the full name of the font, if the font names itself
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if the font carries one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Horizontal advance of a single character. Characters the font has no glyph for
    /// measure as the replacement glyph (or `?`), which is also what gets drawn.
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let gid = self
            .glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .unwrap_or_default();
        self.scaling(size)
            * self
                .face
                .as_face_ref()
                .glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                .unwrap_or_default() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face
            .as_face_ref()
            .glyph_index('\u{FFFD}')
            .or_else(|| self.face.as_face_ref().glyph_index('?'))
            .map(|i| i.0)
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let ids = self.glyph_ids();
        let ids_augmented = self.glyphs_sizing(&ids);

        let scaling = 1000.0 / self.face.as_face_ref().units_per_em() as f32;

        // the most popular width becomes the default
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for (_, (_, (width, _))) in ids_augmented.iter() {
            *widths_counts.entry(*width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|&(&width, &count)| (count, width))
            .map(|(&width, _)| width as f32 * scaling)
            .unwrap_or(1000.0);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);

        let mut id_widths: Vec<(u16, f32)> = ids_augmented
            .iter()
            .map(|(&cid, &(_, (width, _)))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        if let Some(&(first_cid, first_width)) = id_widths.first() {
            let mut start_cid: u16 = first_cid;
            let mut current_widths: Vec<f32> = vec![first_width];
            for (cid, width) in id_widths.into_iter().skip(1) {
                if (cid - start_cid) as usize > current_widths.len() {
                    widths.consecutive(start_cid, current_widths.clone());
                    start_cid = cid;
                    current_widths.clear();
                }

                current_widths.push(width);
            }

            if !current_widths.is_empty() {
                widths.consecutive(start_cid, current_widths);
            }
        }

        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let gids = self.glyph_ids();
        let gids_augmented = self.glyphs_sizing(&gids);

        let max_width = gids_augmented
            .values()
            .map(|&(_, (w, _))| w)
            .max()
            .unwrap_or_default();
        let max_height = gids_augmented
            .values()
            .map(|&(_, (_, h))| h)
            .max()
            .unwrap_or_default();
        let sum_width: usize = gids_augmented.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / gids_augmented.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));

        let face = self.face.as_face_ref();
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        let family = self.family().unwrap_or_else(|| name.clone());

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::empty();
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / face.units_per_em() as f32;
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: sum_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
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
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn glyph_ids(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();

        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    fn glyphs_sizing(&self, ids: &HashMap<u16, char>) -> HashMap<u16, (char, (u16, i16))> {
        let face = self.face.as_face_ref();
        let mut ids_augmented: HashMap<u16, (char, (u16, i16))> = HashMap::new();
        for (&id, &ch) in ids.iter() {
            if let Some(gid) = face.glyph_index(ch) {
                if let Some(h_advance) = face.glyph_hor_advance(gid) {
                    let height = face
                        .glyph_bounding_box(gid)
                        .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                        .unwrap_or(1000);
                    ids_augmented.insert(id, (ch, (h_advance, height)));
                }
            }
        }
        ids_augmented
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

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

        let ids = self.glyph_ids();
        let mut ids: Vec<(u16, char)> = ids.into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // each bfchar block holds at most 100 entries sharing a high byte
        let mut cmap_blocks: Vec<Vec<(u16, char)>> = Vec::new();
        let mut current_block: Vec<(u16, char)> = Vec::new();
        let mut high_byte: u8 = 0;
        for (id, ch) in ids.iter() {
            if (id >> 8) as u8 != high_byte || current_block.len() >= 100 {
                if !current_block.is_empty() {
                    cmap_blocks.push(current_block.clone());
                }
                current_block.clear();
                high_byte = (id >> 8) as u8;
            }

            current_block.push((*id, *ch));
        }
        if !current_block.is_empty() {
            cmap_blocks.push(current_block);
        }

        for block in cmap_blocks.into_iter() {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block.into_iter() {
                let ch: u32 = ch.into();
                map.push_str(&format!("<{id:04x}> <{:04x}>\n", ch));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }

    fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

impl BuiltinFont {
    /// The PostScript name viewers know this font by
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Advance width of a character in 1/1000 em. Characters outside WinAnsi are
    /// measured as their unaccented base letter, or as an average glyph.
    pub fn width_1000(&self, ch: char) -> u16 {
        let bold = matches!(self, BuiltinFont::HelveticaBold);
        let table = if bold { &HELVETICA_BOLD_ASCII } else { &HELVETICA_ASCII };
        let ch = strip_accent(ch);
        match ch {
            ' '..='~' => table[ch as usize - 0x20],
            'º' | 'ª' => if bold { 365 } else { 370 },
            '—' => 1000,
            '–' => 556,
            '•' => 350,
            '«' | '»' => 556,
            '¿' | '¡' => if bold { 611 } else { 556 },
            '\u{2018}' | '\u{2019}' => if bold { 278 } else { 222 },
            '\u{201C}' | '\u{201D}' => if bold { 500 } else { 333 },
            _ => 556,
        }
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        size * 0.718
    }

    pub fn descent(&self, size: Pt) -> Pt {
        size * -0.207
    }
}

/// Map the accented Latin letters used in Spanish (and their neighbours) onto the
/// base letter, which has the same advance in Helvetica.
fn strip_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        'Ý' => 'Y',
        _ => ch,
    }
}

// AFM advance widths for 0x20..=0x7E
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl FontFace {
    /// Horizontal advance of `ch` at the given size
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        match self {
            FontFace::Builtin(builtin) => size * (builtin.width_1000(ch) as f32 / 1000.0),
            FontFace::TrueType(font) => font.advance(ch, size),
        }
    }

    /// Width of a whole string; newlines and other control characters take no space
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.advance(ch, size))
            .sum()
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        match self {
            FontFace::Builtin(builtin) => builtin.ascent(size),
            FontFace::TrueType(font) => font.ascent(size),
        }
    }

    pub fn descent(&self, size: Pt) -> Pt {
        match self {
            FontFace::Builtin(builtin) => builtin.descent(size),
            FontFace::TrueType(font) => font.descent(size),
        }
    }

    /// Write the font resources for this face, registering them as `Font(font_index)`
    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            FontFace::Builtin(builtin) => {
                let id = refs.gen(RefType::Font(font_index));
                let mut font = writer.type1_font(id);
                font.base_font(Name(builtin.base_font().as_bytes()));
                font.encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontFace::TrueType(font) => font.write(refs, font_index, writer),
        }
    }

    /// Encode text the way this face's content stream expects it: WinAnsi bytes for the
    /// built-in fonts, big-endian glyph ids for embedded ones.
    pub(crate) fn encode_text(&self, text: &str) -> Vec<u8> {
        match self {
            FontFace::Builtin(_) => to_winansi_bytes(text),
            FontFace::TrueType(font) => {
                let mut out = Vec::with_capacity(text.len() * 2);
                for ch in text.chars() {
                    let gid = font
                        .glyph_id(ch)
                        .or_else(|| font.replacement_glyph_id())
                        .unwrap_or_default();
                    out.extend_from_slice(&gid.to_be_bytes());
                }
                out
            }
        }
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes. Unmappable characters
/// become `?`.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c as u32 {
            0x0020..=0x007E => c as u8,
            0x00A0..=0x00FF => c as u8,
            0x20AC => 0x80,
            0x201A => 0x82,
            0x201E => 0x84,
            0x2026 => 0x85,
            0x2018 => 0x91,
            0x2019 => 0x92,
            0x201C => 0x93,
            0x201D => 0x94,
            0x2022 => 0x95,
            0x2013 => 0x96,
            0x2014 => 0x97,
            0x2122 => 0x99,
            _ => b'?',
        })
        .collect()
}

impl FontBook {
    /// An empty font book; see [`FontBook::with_builtin_fonts`] for the usual starting point
    pub fn new() -> FontBook {
        FontBook {
            faces: Arena::new(),
            names: HashMap::new(),
        }
    }

    /// A font book holding `Helvetica` and `Helvetica-Bold`
    pub fn with_builtin_fonts() -> FontBook {
        let mut book = FontBook::new();
        for builtin in [BuiltinFont::Helvetica, BuiltinFont::HelveticaBold] {
            book.register(builtin.base_font(), FontFace::Builtin(builtin));
        }
        book
    }

    /// Register a face under `name`, replacing any face previously registered under it
    pub fn register<S: ToString>(&mut self, name: S, face: FontFace) -> Id<FontFace> {
        let id = self.faces.alloc(face);
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn id_of(&self, name: &str) -> Option<Id<FontFace>> {
        self.names.get(name).copied()
    }

    pub fn get(&self, id: Id<FontFace>) -> Option<&FontFace> {
        self.faces.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id<FontFace>, &FontFace)> {
        self.faces.iter()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        FontBook::with_builtin_fonts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_widths_follow_afm_metrics() {
        let regular = FontFace::Builtin(BuiltinFont::Helvetica);
        let bold = FontFace::Builtin(BuiltinFont::HelveticaBold);

        assert!((regular.width_of_text("i", Pt(1000.0)).0 - 222.0).abs() < 1e-3);
        assert!((bold.width_of_text("i", Pt(1000.0)).0 - 278.0).abs() < 1e-3);
        assert_eq!(regular.width_of_text("Año", Pt(10.0)), regular.width_of_text("Ano", Pt(10.0)));
        assert!(bold.width_of_text("Informe", Pt(10.0)) > regular.width_of_text("Informe", Pt(10.0)));
    }

    #[test]
    fn winansi_encoding_keeps_spanish_text() {
        assert_eq!(to_winansi_bytes("Nº ñ"), vec![b'N', 0xBA, b' ', 0xF1]);
        assert_eq!(to_winansi_bytes("a—b"), vec![b'a', 0x97, b'b']);
        assert_eq!(to_winansi_bytes("✓"), vec![b'?']);
    }

    #[test]
    fn builtin_book_resolves_by_name() {
        let book = FontBook::with_builtin_fonts();
        let id = book.id_of("Helvetica-Bold").expect("bold registered");
        assert!(matches!(
            book.get(id),
            Some(FontFace::Builtin(BuiltinFont::HelveticaBold))
        ));
        assert!(book.id_of("Times-Roman").is_none());
    }
}
