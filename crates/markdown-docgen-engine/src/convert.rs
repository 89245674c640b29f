use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};

use crate::{
    output::{self, OutputError, OutputFinalizer},
    parsing::{
        blocks::{BuildOptions, Document},
        parse_document,
    },
    render::{RenderError, RenderSettings, TargetFormat, renderer_for},
};

/// Characters of content shown in log lines.
const PREVIEW_CHARS: usize = 40;

/// Everything one conversion needs from its caller.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub content: String,
    pub title: String,
    pub format: TargetFormat,
    /// Only used to compose the artifact file name.
    pub caller_id: String,
}

/// Pipeline stage, as reported in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the IR. Parsing cannot fail, so this stage only shows up in
    /// logs, never in a [`ConvertError`].
    Parse,
    Render,
    /// Serializing the artifact and moving it into place. Backends that
    /// serialize lazily report their failures here.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parse => write!(f, "parse"),
            Stage::Render => write!(f, "render"),
            Stage::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FailureKind {
    #[error("render backend failure: {0}")]
    RenderBackendFailure(#[source] RenderError),
    #[error("filesystem failure: {0}")]
    FilesystemFailure(#[source] OutputError),
}

#[derive(Debug, thiserror::Error)]
#[error("Conversion for caller {caller_id} to {format} failed during {stage}: {kind}")]
pub struct ConvertError {
    pub stage: Stage,
    pub caller_id: String,
    pub format: TargetFormat,
    #[source]
    pub kind: FailureKind,
}

/// Content preview for logs, truncated to `max` chars with a "..." suffix.
pub fn preview(s: &str, max: usize) -> String {
    let mut chars = s.chars();
    let mut out: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}

/// The conversion entry point: content in, artifact path out.
///
/// Holds no mutable state, so one service can be shared across threads and
/// concurrent conversions only meet at the destination directory.
#[derive(Debug, Clone)]
pub struct DocumentService {
    finalizer: OutputFinalizer,
    options: BuildOptions,
    settings: RenderSettings,
}

impl DocumentService {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        options: BuildOptions,
        settings: RenderSettings,
    ) -> Result<Self, OutputError> {
        Ok(Self {
            finalizer: OutputFinalizer::new(output_dir)?,
            options,
            settings,
        })
    }

    pub fn output_dir(&self) -> &Path {
        self.finalizer.dir()
    }

    /// Builds only the IR, without rendering.
    pub fn build_ir(&self, content: &str) -> Document {
        parse_document(content, &self.options)
    }

    pub fn convert(&self, req: &ConversionRequest) -> Result<PathBuf, ConvertError> {
        self.convert_at(req, Local::now().naive_local())
    }

    /// Like [`DocumentService::convert`] with an explicit generation time,
    /// used for the date stamp and the file name.
    pub fn convert_at(
        &self,
        req: &ConversionRequest,
        at: NaiveDateTime,
    ) -> Result<PathBuf, ConvertError> {
        let fail = |stage: Stage, kind: FailureKind| {
            log::error!(
                "Conversion failed: caller={} format={} stage={stage}: {kind}",
                req.caller_id,
                req.format
            );
            ConvertError {
                stage,
                caller_id: req.caller_id.clone(),
                format: req.format,
                kind,
            }
        };

        log::info!(
            "Converting for caller={} format={} content={:?}",
            req.caller_id,
            req.format,
            preview(&req.content, PREVIEW_CHARS)
        );

        let doc = self.build_ir(&req.content);
        log::debug!("stage={} blocks={}", Stage::Parse, doc.blocks.len());

        let renderer = renderer_for(req.format, &self.settings);
        let artifact = renderer
            .render(&req.title, &doc, at.date())
            .map_err(|e| fail(Stage::Render, FailureKind::RenderBackendFailure(e)))?;

        let path = self
            .finalizer
            .finalize_at(artifact, &req.caller_id, at)
            .map_err(|e| {
                let kind = match e {
                    OutputError::Render(e) => FailureKind::RenderBackendFailure(e),
                    other => FailureKind::FilesystemFailure(other),
                };
                fail(Stage::Write, kind)
            })?;

        log::info!(
            "Document created for caller={}: {}",
            req.caller_id,
            path.display()
        );
        Ok(path)
    }

    pub fn cleanup(&self, path: &Path) -> bool {
        output::cleanup(path)
    }
}
