//! Flowable page-layout backend.
//!
//! The IR becomes a *story*: an ordered list of [`Flowable`]s, each
//! paragraph carrying a single string with embedded inline tags
//! (`<b>`, `<i>`, `<font face="Courier">`). This loses the discrete run
//! structure the Word backend keeps, which is inherent to a one-string
//! per element layout model.
//!
//! The story is typeset onto A4 pages by [`pdf`] when the artifact is
//! written.

pub mod markup;
pub mod metrics;
pub mod pdf;

use chrono::NaiveDate;

use crate::parsing::{
    blocks::{Block, Document},
    inline::Run,
};

use super::{Artifact, RenderError, Renderer, TargetFormat, list_marker, settings::RenderSettings};

pub const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAlign {
    Left,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStyle {
    Title,
    Body,
    Heading(u8),
    ListItem,
}

/// Resolved typographic parameters of a [`FlowStyle`], in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePreset {
    pub font_size: f32,
    pub leading: f32,
    pub bold: bool,
    pub align: FlowAlign,
    pub space_after: f32,
    pub left_indent: f32,
}

impl FlowStyle {
    pub fn preset(&self, body_size: f32) -> StylePreset {
        let body = StylePreset {
            font_size: body_size,
            leading: body_size + 2.0,
            bold: false,
            align: FlowAlign::Justify,
            space_after: 0.0,
            left_indent: 0.0,
        };
        match self {
            FlowStyle::Title => StylePreset {
                font_size: 16.0,
                leading: 19.0,
                bold: true,
                align: FlowAlign::Center,
                space_after: 30.0,
                ..body
            },
            FlowStyle::Body => body,
            FlowStyle::Heading(level) => {
                let size = heading_size(*level);
                StylePreset {
                    font_size: size,
                    leading: size + 3.0,
                    bold: true,
                    align: FlowAlign::Left,
                    space_after: 12.0,
                    ..body
                }
            }
            FlowStyle::ListItem => StylePreset {
                align: FlowAlign::Left,
                left_indent: 18.0,
                ..body
            },
        }
    }
}

/// 14pt for the two top levels, one point less per level after that.
fn heading_size(level: u8) -> f32 {
    (16.0 - f32::from(level.max(2))).max(11.0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph { style: FlowStyle, markup: String },
    /// Vertical gap in points.
    Spacer(f32),
}

/// Serializes runs into one tagged string.
///
/// Run text is escaped first and wrapped in tags afterwards, so the only
/// `<`/`>` left in the result belong to tags.
pub fn markup_runs(runs: &[Run]) -> String {
    runs.iter()
        .map(|run| {
            let text = html_escape::encode_text(run.text());
            match run {
                Run::Plain(_) => text.into_owned(),
                Run::Bold(_) => format!("<b>{text}</b>"),
                Run::Italic(_) => format!("<i>{text}</i>"),
                Run::Code(_) => format!("<font face=\"Courier\">{text}</font>"),
            }
        })
        .collect()
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

pub struct FlowRenderer {
    settings: RenderSettings,
}

impl FlowRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Builds the story: title, date line, then every block followed by a
    /// spacer.
    pub fn story(&self, title: &str, doc: &Document, date: NaiveDate) -> Vec<Flowable> {
        let block_gap = 0.2 * POINTS_PER_INCH;
        let mut story = vec![
            Flowable::Paragraph {
                style: FlowStyle::Title,
                markup: escape(title),
            },
            Flowable::Paragraph {
                style: FlowStyle::Body,
                markup: escape(&self.settings.date_stamp(date)),
            },
            Flowable::Spacer(0.3 * POINTS_PER_INCH),
        ];

        for block in &doc.blocks {
            match block {
                Block::Heading { level, runs } => story.push(Flowable::Paragraph {
                    style: FlowStyle::Heading(*level),
                    markup: markup_runs(runs),
                }),
                Block::Paragraph { runs } => story.push(Flowable::Paragraph {
                    style: FlowStyle::Body,
                    markup: markup_runs(runs),
                }),
                Block::List { ordered, items } => {
                    for (i, item) in items.iter().enumerate() {
                        story.push(Flowable::Paragraph {
                            style: FlowStyle::ListItem,
                            markup: format!("{}{}", list_marker(*ordered, i), markup_runs(item)),
                        });
                    }
                }
            }
            story.push(Flowable::Spacer(block_gap));
        }
        story
    }
}

impl Renderer for FlowRenderer {
    fn format(&self) -> TargetFormat {
        TargetFormat::Flow
    }

    fn render(
        &self,
        title: &str,
        doc: &Document,
        date: NaiveDate,
    ) -> Result<Box<dyn Artifact>, RenderError> {
        let story = self.story(title, doc, date);
        log::debug!(
            "flow story: {} flowables from {} blocks",
            story.len(),
            doc.blocks.len()
        );
        Ok(Box::new(PdfArtifact {
            title: title.to_string(),
            story,
            settings: self.settings.clone(),
        }))
    }
}

pub struct PdfArtifact {
    pub title: String,
    pub story: Vec<Flowable>,
    pub settings: RenderSettings,
}

impl Artifact for PdfArtifact {
    fn extension(&self) -> &'static str {
        TargetFormat::Flow.extension()
    }

    fn write_to(self: Box<Self>, out: &mut std::fs::File) -> Result<(), RenderError> {
        use std::io::Write;

        let bytes = pdf::typeset(&self.title, &self.story, &self.settings)?;
        out.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{blocks::BuildOptions, parse_document};
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    fn story(content: &str) -> Vec<Flowable> {
        let doc = parse_document(content, &BuildOptions::default());
        FlowRenderer::new(RenderSettings::default()).story("Doc", &doc, date())
    }

    fn markups(story: &[Flowable]) -> Vec<&str> {
        story
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph { markup, .. } => Some(markup.as_str()),
                Flowable::Spacer(_) => None,
            })
            .collect()
    }

    #[test]
    fn runs_become_tags() {
        assert_eq!(
            markup_runs(&[
                Run::Plain("a ".into()),
                Run::Bold("b".into()),
                Run::Italic("c".into()),
                Run::Code("d".into()),
            ]),
            "a <b>b</b><i>c</i><font face=\"Courier\">d</font>"
        );
    }

    #[test]
    fn text_is_escaped_before_tags_are_added() {
        assert_eq!(
            markup_runs(&[Run::Bold("a<b>&c".into()), Run::Code("x > y".into())]),
            "<b>a&lt;b&gt;&amp;c</b><font face=\"Courier\">x &gt; y</font>"
        );
    }

    #[test]
    fn story_shape() {
        let story = story("# Head\nbody & more\n* one\n* two");
        insta::assert_debug_snapshot!(markups(&story), @r#"
        [
            "Doc",
            "Created: 31.01.2025",
            "Head",
            "body &amp; more",
            "• one",
            "• two",
        ]
        "#);
    }

    #[test]
    fn story_is_deterministic() {
        let content = "# H\n\nPara **one** with `code`.\n\n* x\n* y\n\n1. a\n2. b";
        assert_eq!(story(content), story(content));
    }

    #[test]
    fn styles_follow_blocks() {
        let story = story("## Sub\ntext\n1. item");
        let styles: Vec<FlowStyle> = story
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph { style, .. } => Some(*style),
                Flowable::Spacer(_) => None,
            })
            .collect();
        assert_eq!(
            styles,
            vec![
                FlowStyle::Title,
                FlowStyle::Body,
                FlowStyle::Heading(2),
                FlowStyle::Body,
                FlowStyle::ListItem,
            ]
        );
    }

    #[test]
    fn each_block_is_followed_by_a_spacer() {
        let story = story("a\nb");
        let spacers = story
            .iter()
            .filter(|f| matches!(f, Flowable::Spacer(_)))
            .count();
        // One after the date line plus one per block.
        assert_eq!(spacers, 3);
    }

    #[test]
    fn title_is_escaped() {
        let story = story("");
        assert_eq!(markups(&story)[0], "Doc");
        let doc = Document::default();
        let story = FlowRenderer::new(RenderSettings::default()).story("R&D <draft>", &doc, date());
        assert_eq!(markups(&story)[0], "R&amp;D &lt;draft&gt;");
    }

    #[test]
    fn presets() {
        let title = FlowStyle::Title.preset(12.0);
        assert_eq!(title.font_size, 16.0);
        assert_eq!(title.align, FlowAlign::Center);
        assert_eq!(FlowStyle::Body.preset(12.0).leading, 14.0);
        assert_eq!(FlowStyle::Heading(1).preset(12.0).font_size, 14.0);
        assert_eq!(FlowStyle::Heading(2).preset(12.0).font_size, 14.0);
        assert_eq!(FlowStyle::Heading(4).preset(12.0).font_size, 12.0);
        assert_eq!(FlowStyle::Heading(6).preset(12.0).font_size, 11.0);
        assert_eq!(FlowStyle::ListItem.preset(12.0).left_indent, 18.0);
    }
}
