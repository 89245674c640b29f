use std::{fs::File, path::Path};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use crate::render::{
    RenderError, TargetFormat,
    settings::{FontFiles, RenderSettings},
};

use super::{
    FlowAlign, Flowable, POINTS_PER_INCH, StylePreset,
    markup::{Span, parse_markup},
    metrics::{Face, char_width, text_width},
};

/// A4 in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

/// A piece of text at an absolute position, `y` being the baseline measured
/// from the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub face: Face,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacedPage {
    pub items: Vec<PlacedText>,
}

#[derive(Debug)]
struct Piece {
    text: String,
    face: Face,
    width: f32,
}

/// Whitespace-delimited word, possibly spanning several styles.
#[derive(Debug, Default)]
struct Word {
    pieces: Vec<Piece>,
    width: f32,
}

impl Word {
    fn push(&mut self, text: String, face: Face, size: f32) {
        let width = text_width(&text, face, size);
        self.width += width;
        self.pieces.push(Piece { text, face, width });
    }

    fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

fn split_words(spans: &[Span], preset: &StylePreset) -> Vec<Word> {
    let size = preset.font_size;
    let mut words = vec![];
    let mut current = Word::default();

    for span in spans {
        let face = Face::from_flags(span.bold || preset.bold, span.italic, span.mono);
        let mut buf = String::new();
        for c in span.text.chars() {
            if c.is_whitespace() {
                if !buf.is_empty() {
                    current.push(std::mem::take(&mut buf), face, size);
                }
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            } else {
                buf.push(c);
            }
        }
        if !buf.is_empty() {
            current.push(buf, face, size);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Greedy fill. A word wider than the line gets a line of its own.
fn break_lines(words: Vec<Word>, avail: f32, space: f32) -> Vec<Vec<Word>> {
    let mut lines = vec![];
    let mut line: Vec<Word> = vec![];
    let mut width = 0.0;

    for word in words {
        let needed = if line.is_empty() {
            word.width
        } else {
            width + space + word.width
        };
        if needed > avail && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            width = word.width;
        } else {
            width = needed;
        }
        line.push(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

struct Layout {
    margin: f32,
    y: f32,
    pages: Vec<PlacedPage>,
}

impl Layout {
    fn new(margin: f32) -> Self {
        Self {
            margin,
            y: PAGE_HEIGHT - margin,
            pages: vec![PlacedPage::default()],
        }
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().is_none_or(|p| p.items.is_empty())
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < self.margin && !self.page_is_empty() {
            self.pages.push(PlacedPage::default());
            self.y = PAGE_HEIGHT - self.margin;
        }
    }

    fn place(&mut self, item: PlacedText) {
        if let Some(page) = self.pages.last_mut() {
            page.items.push(item);
        }
    }

    fn paragraph(&mut self, markup: &str, preset: StylePreset) {
        let size = preset.font_size;
        let space = char_width(' ', Face::Regular, size);
        let left = self.margin + preset.left_indent;
        let avail = PAGE_WIDTH - 2.0 * self.margin - preset.left_indent;

        let lines = break_lines(split_words(&parse_markup(markup), &preset), avail, space);
        let count = lines.len();
        for (idx, line) in lines.into_iter().enumerate() {
            self.ensure_room(preset.leading);
            self.y -= preset.leading;

            let natural: f32 =
                line.iter().map(|w| w.width).sum::<f32>() + space * (line.len() - 1) as f32;
            let last_line = idx + 1 == count;
            let (mut x, gap) = match preset.align {
                FlowAlign::Left => (left, space),
                FlowAlign::Center => (left + ((avail - natural) / 2.0).max(0.0), space),
                FlowAlign::Justify if !last_line && line.len() > 1 && natural < avail => {
                    (left, space + (avail - natural) / (line.len() - 1) as f32)
                }
                FlowAlign::Justify => (left, space),
            };

            for word in line {
                for piece in word.pieces {
                    self.place(PlacedText {
                        text: piece.text,
                        face: piece.face,
                        size,
                        x,
                        y: self.y,
                    });
                    x += piece.width;
                }
                x += gap;
            }
        }
        if count > 0 {
            self.y -= preset.space_after;
        }
    }

    fn spacer(&mut self, height: f32) {
        // A gap at the top of a fresh page is dropped.
        if !self.page_is_empty() {
            self.y -= height;
        }
    }
}

/// Positions every flowable on A4 pages. Always yields at least one page.
pub fn layout(story: &[Flowable], settings: &RenderSettings) -> Vec<PlacedPage> {
    let mut layout = Layout::new(settings.margin_inches * POINTS_PER_INCH);
    for flowable in story {
        match flowable {
            Flowable::Paragraph { style, markup } => {
                layout.paragraph(markup, style.preset(settings.body_font_size))
            }
            Flowable::Spacer(height) => layout.spacer(*height),
        }
    }
    layout.pages
}

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / POINTS_PER_INCH)
}

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
    mono: IndirectFontRef,
    mono_bold: IndirectFontRef,
}

impl FontSet {
    fn load(doc: &PdfDocumentReference, files: Option<&FontFiles>) -> Result<Self, RenderError> {
        match files {
            Some(files) => Self::external(doc, files),
            None => Self::builtin(doc),
        }
    }

    fn builtin(doc: &PdfDocumentReference) -> Result<Self, RenderError> {
        let add = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| RenderError::backend(TargetFormat::Flow, e))
        };
        Ok(Self {
            regular: add(BuiltinFont::TimesRoman)?,
            bold: add(BuiltinFont::TimesBold)?,
            italic: add(BuiltinFont::TimesItalic)?,
            bold_italic: add(BuiltinFont::TimesBoldItalic)?,
            mono: add(BuiltinFont::Courier)?,
            mono_bold: add(BuiltinFont::CourierBold)?,
        })
    }

    fn external(doc: &PdfDocumentReference, files: &FontFiles) -> Result<Self, RenderError> {
        let add = |path: &Path| -> Result<IndirectFontRef, RenderError> {
            let file = File::open(path).map_err(|source| RenderError::Font {
                path: path.display().to_string(),
                source,
            })?;
            doc.add_external_font(file)
                .map_err(|e| RenderError::backend(TargetFormat::Flow, e))
        };
        let bold = add(&files.bold)?;
        let mono = add(&files.mono)?;
        Ok(Self {
            regular: add(&files.regular)?,
            italic: add(&files.italic)?,
            bold_italic: bold.clone(),
            bold,
            mono_bold: mono.clone(),
            mono,
        })
    }

    fn get(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Italic => &self.italic,
            Face::BoldItalic => &self.bold_italic,
            Face::Mono => &self.mono,
            Face::MonoBold => &self.mono_bold,
        }
    }
}

/// Lays out the story and serializes it into PDF bytes.
pub fn typeset(
    title: &str,
    story: &[Flowable],
    settings: &RenderSettings,
) -> Result<Vec<u8>, RenderError> {
    let pages = layout(story, settings);
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
    let fonts = FontSet::load(&doc, settings.pdf_fonts.as_ref())?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            let (p, l) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(p).get_layer(l);
        }
        for item in &page.items {
            layer.use_text(
                item.text.as_str(),
                item.size,
                mm(item.x),
                mm(item.y),
                fonts.get(item.face),
            );
        }
    }
    log::debug!("typeset {} pdf pages", pages.len());

    doc.save_to_bytes()
        .map_err(|e| RenderError::backend(TargetFormat::Flow, e))
}
