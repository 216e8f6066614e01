//! Single-column PDF documents: the title, a blank line, then the body
//! reflowed to the page margins.

use nr_core::{Error, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 8.0;
const LAYER: &str = "Layer 1";
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Usable line width between the left and right margins, in points.
pub const TEXT_WIDTH_PT: f32 = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) * PT_PER_MM;
/// Lines that fit between the top and bottom margins.
pub const LINES_PER_PAGE: usize = 33;

/// Helvetica advance width in 1/1000 em (standard AFM metrics).
/// Anything outside printable ASCII is measured as a full em.
fn glyph_units(c: char) -> u16 {
    match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | '\\' | ']' | 'I' | 'f' | 't' => 278,
        '"' => 355,
        '\'' => 191,
        '(' | ')' | '-' | '`' | 'r' => 333,
        '*' => 389,
        '+' | '<' | '=' | '>' | '~' => 584,
        '%' => 889,
        '&' => 667,
        '@' => 1015,
        '^' => 469,
        '{' | '}' => 334,
        '|' => 260,
        'i' | 'j' | 'l' => 222,
        'J' | 'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
        'w' | 'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'm' | 'M' => 833,
        'W' => 944,
        'G' | 'O' | 'Q' => 778,
        'F' | 'T' | 'Z' => 611,
        'L' => 556,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        '#' | '$' | '?' | '_' | '0'..='9' => 556,
        'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 556,
        _ => 1000,
    }
}

fn char_width(c: char) -> f32 {
    f32::from(glyph_units(c)) * FONT_SIZE_PT / 1000.0
}

/// Rendered width of `text` in points at the body font size.
pub fn text_width(text: &str) -> f32 {
    text.chars().map(char_width).sum()
}

/// Splits a word into pieces no wider than `max_width`.
fn split_word(word: &str, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;

    for c in word.chars() {
        let w = char_width(c);
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Greedy word wrap on rendered width. Newlines are kept as paragraph breaks
/// and words wider than `max_width` are split.
pub fn wrap_text(text: &str, max_width: f32) -> Vec<String> {
    let space = char_width(' ');
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0;

        for word in paragraph.split_whitespace() {
            for piece in split_word(word, max_width) {
                let piece_width = text_width(&piece);
                if !line.is_empty() && line_width + space + piece_width > max_width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                if !line.is_empty() {
                    line.push(' ');
                    line_width += space;
                }
                line.push_str(&piece);
                line_width += piece_width;
            }
        }
        lines.push(line);
    }

    lines
}

pub fn paginate(lines: Vec<String>, per_page: usize) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines.chunks(per_page.max(1)).map(|page| page.to_vec()).collect()
}

/// The built-in fonts only cover Latin-1; anything else prints as '?'.
/// Newlines are kept for wrapping, other whitespace becomes a space.
fn printable_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' => c,
            c if c.is_whitespace() => ' ',
            c if (c as u32) < 0x100 && !c.is_control() => c,
            _ => '?',
        })
        .collect()
}

/// Renders `title` and `body` to PDF bytes.
pub fn render_pdf(title: &str, body: &str) -> Result<Vec<u8>> {
    let text = format!("{}\n\n{}", title, body);
    let pages = paginate(wrap_text(&printable_text(&text), TEXT_WIDTH_PT), LINES_PER_PAGE);
    debug!("Rendering '{}' on {} page(s)", title, pages.len());

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Export(format!("Failed to load font: {}", e)))?;

    for (i, lines) in pages.iter().enumerate() {
        let (page, layer) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER)
        };
        let layer = doc.get_page(page).get_layer(layer);

        let mut y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
        for line in lines {
            if !line.is_empty() {
                layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
            }
            y -= LINE_HEIGHT_MM;
        }
    }

    doc.save_to_bytes()
        .map_err(|e| Error::Export(format!("Failed to write PDF: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_paragraph_breaks() {
        let lines = wrap_text("Title\n\nfirst line\nsecond", TEXT_WIDTH_PT);
        assert_eq!(lines, vec!["Title", "", "first line", "second"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap_text("the quick brown fox jumps", 60.0);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|l| text_width(l) <= 60.0));
    }

    #[test]
    fn test_wrap_splits_long_words() {
        // Three capital Ms are just under 30pt at 12pt.
        let lines = wrap_text("ab MMMMMMM", 30.0);
        assert_eq!(lines, vec!["ab", "MMM", "MMM", "M"]);
    }

    #[test]
    fn test_wide_glyphs_stay_inside_margins() {
        let capitals = "MMMMMMMMMM ".repeat(20);
        let lines = wrap_text(&capitals, TEXT_WIDTH_PT);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l) <= TEXT_WIDTH_PT));

        let timestamps = "2024-05-01 09:30:00 - WWW 0000 - 88888888 ".repeat(10);
        assert!(wrap_text(&timestamps, TEXT_WIDTH_PT)
            .iter()
            .all(|l| text_width(l) <= TEXT_WIDTH_PT));
    }

    #[test]
    fn test_narrow_glyphs_fit_more_per_line() {
        let narrow = wrap_text(&"illi ".repeat(60), TEXT_WIDTH_PT);
        let wide = wrap_text(&"WMWM ".repeat(60), TEXT_WIDTH_PT);
        assert!(narrow[0].len() > wide[0].len());
    }

    #[test]
    fn test_paginate() {
        let lines: Vec<String> = (0..70).map(|i| i.to_string()).collect();
        let pages = paginate(lines, LINES_PER_PAGE);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), LINES_PER_PAGE);
        assert_eq!(pages[2], vec!["66", "67", "68", "69"]);
        assert_eq!(paginate(Vec::new(), LINES_PER_PAGE).len(), 1);
    }

    #[test]
    fn test_printable_text() {
        assert_eq!(printable_text("Café 📈 up\r\nnext\u{7}"), "Café ? up \nnext?");
    }

    #[test]
    fn test_render_pdf() {
        let bytes = render_pdf("Overall Summary", "Markets were broadly positive.").unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let long_body = "Quarterly revenue grew across every segment. ".repeat(200);
        let long = render_pdf("Per-Article Summaries", &long_body).unwrap();
        assert!(long.len() > bytes.len());
    }
}
