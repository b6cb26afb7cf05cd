use crate::error::LayoutError;
use crate::font::{FontBook, FontFace};
use crate::style::TextStyle;
use crate::units::Pt;

/// Measures and wraps text against the faces of a [`FontBook`].
///
/// The measurer only borrows the font book, which is immutable for the duration of a
/// build, so the same `(text, style, width)` always produces the same lines.
#[derive(Copy, Clone)]
pub struct TextMeasurer<'a> {
    fonts: &'a FontBook,
}

impl<'a> TextMeasurer<'a> {
    pub fn new(fonts: &'a FontBook) -> TextMeasurer<'a> {
        TextMeasurer { fonts }
    }

    fn face(&self, style: &TextStyle) -> Result<&'a FontFace, LayoutError> {
        self.fonts
            .get(style.font)
            .ok_or_else(|| LayoutError::UndefinedFont(format!("#{}", style.font.index())))
    }

    /// Calculate the width of a given string of text set in `style`
    pub fn width(&self, text: &str, style: &TextStyle) -> Result<Pt, LayoutError> {
        Ok(self.face(style)?.width_of_text(text, style.size))
    }

    /// Split `text` into the lines it occupies when set in `style` no wider than
    /// `max_width`.
    ///
    /// Words are separated on whitespace and added greedily for as long as the
    /// candidate line still fits. A word that is wider than `max_width` on its own is
    /// put alone on its own line, unmodified. Empty input yields a single empty line,
    /// so callers always have at least one line to advance over.
    pub fn wrap(
        &self,
        text: &str,
        style: &TextStyle,
        max_width: Pt,
    ) -> Result<Vec<String>, LayoutError> {
        let face = self.face(style)?;

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if face.width_of_text(&candidate, style.size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{names, StyleSheet};

    fn body(fonts: &FontBook) -> TextStyle {
        StyleSheet::memo_default()
            .resolve(names::BODY, fonts)
            .expect("body style")
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let fonts = FontBook::with_builtin_fonts();
        let measurer = TextMeasurer::new(&fonts);
        let style = body(&fonts);
        assert_eq!(measurer.wrap("", &style, Pt(100.0)).unwrap(), vec![String::new()]);
        assert_eq!(measurer.wrap(" \t ", &style, Pt(100.0)).unwrap(), vec![String::new()]);
    }

    #[test]
    fn lines_never_exceed_width_unless_a_single_word() {
        let fonts = FontBook::with_builtin_fonts();
        let measurer = TextMeasurer::new(&fonts);
        let style = body(&fonts);
        let text = "Revisión de protocolos de bioseguridad en las clínicas de pregrado \
                    y elaboración del cronograma de auditorías internas \
                    electroencefalografistas";
        let width = Pt(120.0);

        let lines = measurer.wrap(text, &style, width).unwrap();
        assert!(lines.len() > 1);
        for line in &lines {
            let measured = measurer.width(line, &style).unwrap();
            assert!(
                measured <= width || !line.contains(' '),
                "{line:?} is {measured} wide"
            );
        }

        let rejoined = lines.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined.split(' ').collect::<Vec<_>>(), original);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let fonts = FontBook::with_builtin_fonts();
        let measurer = TextMeasurer::new(&fonts);
        let style = body(&fonts);
        let lines = measurer
            .wrap("a Supercalifragilisticoespialidoso b", &style, Pt(40.0))
            .unwrap();
        assert_eq!(lines, vec!["a", "Supercalifragilisticoespialidoso", "b"]);
    }

    #[test]
    fn wrapping_is_deterministic() {
        let fonts = FontBook::with_builtin_fonts();
        let measurer = TextMeasurer::new(&fonts);
        let style = body(&fonts);
        let text = lipsum::lipsum(60);
        let first = measurer.wrap(&text, &style, Pt(200.0)).unwrap();
        for _ in 0..5 {
            assert_eq!(measurer.wrap(&text, &style, Pt(200.0)).unwrap(), first);
        }
    }
}
