//! Word-processor backend.
//!
//! Rendering happens in two steps: [`PaginatedRenderer::layout`] maps the IR
//! onto a [`PageModel`] of paragraphs with discrete styled runs, then
//! [`docx::encode`] turns that model into a `docx_rs::Docx`.

pub mod docx;

use chrono::NaiveDate;

use crate::parsing::{
    blocks::{Block, Document},
    inline::Run,
};

use super::{Artifact, RenderError, Renderer, TargetFormat, list_marker, settings::RenderSettings};

/// Deepest heading style the Word backend declares.
pub const MAX_HEADING_DEPTH: u8 = 6;

/// Size of the date stamp in points.
const DATE_FONT_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    /// Heading at the given depth, `1..=MAX_HEADING_DEPTH`.
    Heading(u8),
    Normal,
}

/// One inline run with explicit formatting flags.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    /// Explicit size in points; `None` inherits from the paragraph style.
    pub size: Option<f32>,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            monospace: false,
            size: None,
        }
    }

    fn from_run(run: &Run) -> Self {
        let mut out = Self::plain(run.text());
        match run {
            Run::Plain(_) => {}
            Run::Bold(_) => out.bold = true,
            Run::Italic(_) => out.italic = true,
            Run::Code(_) => out.monospace = true,
        }
        out
    }

    fn sized(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageParagraph {
    pub style: PageStyle,
    pub align: Align,
    pub runs: Vec<StyledRun>,
}

/// Backend-neutral description of the Word document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageModel {
    pub paragraphs: Vec<PageParagraph>,
}

pub struct PaginatedRenderer {
    settings: RenderSettings,
}

impl PaginatedRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Lays out title, date stamp, spacer and then every block in order.
    pub fn layout(&self, title: &str, doc: &Document, date: NaiveDate) -> PageModel {
        let body_size = self.settings.body_font_size;
        let mut paragraphs = vec![
            PageParagraph {
                style: PageStyle::Heading(1),
                align: Align::Center,
                runs: vec![StyledRun::plain(title)],
            },
            PageParagraph {
                style: PageStyle::Normal,
                align: Align::Right,
                runs: vec![StyledRun {
                    italic: true,
                    ..StyledRun::plain(self.settings.date_stamp(date))
                }
                .sized(DATE_FONT_SIZE)],
            },
            PageParagraph {
                style: PageStyle::Normal,
                align: Align::Left,
                runs: vec![],
            },
        ];

        for block in &doc.blocks {
            match block {
                Block::Heading { level, runs } => paragraphs.push(PageParagraph {
                    style: PageStyle::Heading((*level).clamp(1, MAX_HEADING_DEPTH)),
                    align: Align::Left,
                    runs: runs.iter().map(StyledRun::from_run).collect(),
                }),
                Block::Paragraph { runs } => paragraphs.push(PageParagraph {
                    style: PageStyle::Normal,
                    align: Align::Justify,
                    runs: body_runs(runs, body_size),
                }),
                Block::List { ordered, items } => {
                    for (i, item) in items.iter().enumerate() {
                        let mut runs =
                            vec![StyledRun::plain(list_marker(*ordered, i)).sized(body_size)];
                        runs.extend(body_runs(item, body_size));
                        paragraphs.push(PageParagraph {
                            style: PageStyle::Normal,
                            align: Align::Left,
                            runs,
                        });
                    }
                }
            }
        }

        PageModel { paragraphs }
    }
}

fn body_runs(runs: &[Run], size: f32) -> Vec<StyledRun> {
    runs.iter()
        .map(|r| StyledRun::from_run(r).sized(size))
        .collect()
}

impl Renderer for PaginatedRenderer {
    fn format(&self) -> TargetFormat {
        TargetFormat::Paginated
    }

    fn render(
        &self,
        title: &str,
        doc: &Document,
        date: NaiveDate,
    ) -> Result<Box<dyn Artifact>, RenderError> {
        let model = self.layout(title, doc, date);
        log::debug!(
            "paginated layout: {} paragraphs from {} blocks",
            model.paragraphs.len(),
            doc.blocks.len()
        );
        Ok(Box::new(DocxArtifact(docx::encode(&model, &self.settings))))
    }
}

pub struct DocxArtifact(pub docx_rs::Docx);

impl Artifact for DocxArtifact {
    fn extension(&self) -> &'static str {
        TargetFormat::Paginated.extension()
    }

    fn write_to(self: Box<Self>, out: &mut std::fs::File) -> Result<(), RenderError> {
        self.0
            .build()
            .pack(out)
            .map_err(|e| RenderError::backend(TargetFormat::Paginated, e))
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

    fn layout(content: &str) -> PageModel {
        let doc = parse_document(content, &BuildOptions::default());
        PaginatedRenderer::new(RenderSettings::default()).layout("Report", &doc, date())
    }

    #[test]
    fn title_date_and_spacer_come_first() {
        let model = layout("");
        assert_eq!(model.paragraphs.len(), 3);

        let title = &model.paragraphs[0];
        assert_eq!(title.style, PageStyle::Heading(1));
        assert_eq!(title.align, Align::Center);
        assert_eq!(title.runs[0].text, "Report");

        let stamp = &model.paragraphs[1];
        assert_eq!(stamp.align, Align::Right);
        assert!(stamp.runs[0].italic);
        assert_eq!(stamp.runs[0].text, "Created: 31.01.2025");
        assert_eq!(stamp.runs[0].size, Some(10.0));

        assert!(model.paragraphs[2].runs.is_empty());
    }

    #[test]
    fn only_the_title_is_centered() {
        let model = layout("# Big\n### Small");
        let body = &model.paragraphs[3..];
        assert_eq!(body[0].style, PageStyle::Heading(1));
        assert_eq!(body[1].style, PageStyle::Heading(3));
        assert!(body.iter().all(|p| p.align != Align::Center));
    }

    #[test]
    fn paragraph_runs_stay_discrete() {
        let model = layout("a **b** *c* `d`");
        let p = &model.paragraphs[3];
        assert_eq!(p.align, Align::Justify);
        let flags: Vec<_> = p
            .runs
            .iter()
            .map(|r| (r.text.as_str(), r.bold, r.italic, r.monospace))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("a ", false, false, false),
                ("b", true, false, false),
                (" ", false, false, false),
                ("c", false, true, false),
                (" ", false, false, false),
                ("d", false, false, true),
            ]
        );
        assert!(p.runs.iter().all(|r| r.size == Some(12.0)));
    }

    #[test]
    fn list_items_get_literal_markers() {
        let model = layout("7. seven\n9. nine\n\n- dash\n* star");
        let texts: Vec<String> = model.paragraphs[3..]
            .iter()
            .map(|p| p.runs.iter().map(|r| r.text.as_str()).collect())
            .collect();
        assert_eq!(texts, vec!["1. seven", "2. nine", "• dash", "• star"]);
    }

    #[test]
    fn heading_depth_is_capped() {
        let doc = Document {
            blocks: vec![Block::Heading {
                level: 9,
                runs: vec![Run::Plain("deep".into())],
            }],
        };
        let model = PaginatedRenderer::new(RenderSettings::default()).layout("t", &doc, date());
        assert_eq!(model.paragraphs[3].style, PageStyle::Heading(MAX_HEADING_DEPTH));
    }

    #[test]
    fn layout_is_deterministic() {
        let content = "# H\n* a\n1. b\ntext";
        assert_eq!(layout(content), layout(content));
    }
}
