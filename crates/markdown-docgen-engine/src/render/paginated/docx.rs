use docx_rs::{AlignmentType, Docx, PageMargin, Paragraph, Run, RunFonts, Style, StyleType};

use crate::render::settings::RenderSettings;

use super::{Align, MAX_HEADING_DEPTH, PageModel, PageParagraph, PageStyle, StyledRun};

const TWIPS_PER_INCH: f32 = 1440.0;

/// Heading sizes in points, indexed by depth - 1.
const HEADING_SIZES: [f32; MAX_HEADING_DEPTH as usize] = [16.0, 14.0, 13.0, 12.0, 11.0, 11.0];

fn heading_style_id(level: u8) -> String {
    format!("Heading{level}")
}

/// Word sizes are expressed in half-points.
fn half_points(size: f32) -> usize {
    (size * 2.0).round() as usize
}

/// Encodes a laid out [`PageModel`] into a Word document.
pub fn encode(model: &PageModel, settings: &RenderSettings) -> Docx {
    let margin = (settings.margin_inches * TWIPS_PER_INCH).round() as i32;
    let mut docx = Docx::new().page_margin(
        PageMargin::new()
            .top(margin)
            .bottom(margin)
            .left(margin)
            .right(margin),
    );

    for level in 1..=MAX_HEADING_DEPTH {
        docx = docx.add_style(
            Style::new(heading_style_id(level), StyleType::Paragraph)
                .name(format!("Heading {level}"))
                .size(half_points(HEADING_SIZES[level as usize - 1]))
                .bold(),
        );
    }

    for p in &model.paragraphs {
        docx = docx.add_paragraph(paragraph(p, settings));
    }
    docx
}

fn paragraph(p: &PageParagraph, settings: &RenderSettings) -> Paragraph {
    let mut para = Paragraph::new().align(alignment(p.align));
    if let PageStyle::Heading(level) = p.style {
        para = para.style(&heading_style_id(level));
    }
    for r in &p.runs {
        para = para.add_run(run(r, settings));
    }
    para
}

fn run(r: &StyledRun, settings: &RenderSettings) -> Run {
    let family = if r.monospace {
        &settings.code_font
    } else {
        &settings.body_font
    };
    let mut run = Run::new().add_text(&r.text).fonts(
        RunFonts::new()
            .ascii(family)
            .hi_ansi(family)
            .cs(family)
            .east_asia(family),
    );
    if r.bold {
        run = run.bold();
    }
    if r.italic {
        run = run.italic();
    }
    if let Some(size) = r.size {
        run = run.size(half_points(size));
    }
    run
}

fn alignment(align: Align) -> AlignmentType {
    match align {
        Align::Left => AlignmentType::Left,
        Align::Center => AlignmentType::Center,
        Align::Right => AlignmentType::Right,
        Align::Justify => AlignmentType::Both,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_point_conversion() {
        assert_eq!(half_points(12.0), 24);
        assert_eq!(half_points(10.0), 20);
        assert_eq!(half_points(10.5), 21);
    }

    #[test]
    fn heading_style_ids() {
        assert_eq!(heading_style_id(1), "Heading1");
        assert_eq!(heading_style_id(6), "Heading6");
    }
}
