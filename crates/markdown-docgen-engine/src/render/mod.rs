//! # Rendering
//!
//! Both backends consume the same [`Document`] IR; the caller picks one
//! through [`TargetFormat`] and nothing upstream inspects the format again.
//!
//! - **`paginated`**: Word documents via `docx-rs`. Every `Run` stays a
//!   discrete styled run.
//! - **`flow`**: PDF via `printpdf`. Every element carries one string with
//!   embedded inline tags, which is then typeset.
//!
//! A renderer produces an [`Artifact`]; writing it to disk is the output
//! finalizer's job.

pub mod flow;
pub mod paginated;
pub mod settings;

use std::{fmt, fs::File, str::FromStr};

use chrono::NaiveDate;

use crate::parsing::blocks::Document;

pub use flow::FlowRenderer;
pub use paginated::PaginatedRenderer;
pub use settings::{FontFiles, RenderSettings};

/// The closed set of output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// Sectioned word-processor document (`.docx`).
    Paginated,
    /// Flowable page layout (`.pdf`).
    Flow,
}

impl TargetFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Paginated => "docx",
            TargetFormat::Flow => "pdf",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetFormat::Paginated => write!(f, "paginated"),
            TargetFormat::Flow => write!(f, "flow"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown target format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for TargetFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paginated" | "docx" | "word" => Ok(TargetFormat::Paginated),
            "flow" | "pdf" => Ok(TargetFormat::Flow),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{format} backend failed: {message}")]
    Backend {
        format: TargetFormat,
        message: String,
    },
    #[error("Failed to load font {path}: {source}")]
    Font {
        path: String,
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub(crate) fn backend(format: TargetFormat, err: impl fmt::Display) -> Self {
        RenderError::Backend {
            format,
            message: err.to_string(),
        }
    }
}

/// A rendered, backend-native document waiting to be serialized.
pub trait Artifact {
    fn extension(&self) -> &'static str;

    /// Serializes the document into `out`. Consumes the artifact because
    /// both backends consume their document on save.
    fn write_to(self: Box<Self>, out: &mut File) -> Result<(), RenderError>;
}

/// A backend turning the IR into an [`Artifact`].
pub trait Renderer: Send + Sync {
    fn format(&self) -> TargetFormat;

    /// `date` is the generation date stamped under the title.
    fn render(
        &self,
        title: &str,
        doc: &Document,
        date: NaiveDate,
    ) -> Result<Box<dyn Artifact>, RenderError>;
}

/// Maps a format onto its renderer. The only place the format is matched.
pub fn renderer_for(format: TargetFormat, settings: &RenderSettings) -> Box<dyn Renderer> {
    match format {
        TargetFormat::Paginated => Box::new(PaginatedRenderer::new(settings.clone())),
        TargetFormat::Flow => Box::new(FlowRenderer::new(settings.clone())),
    }
}

/// Marker prefix for list item `index` (zero based).
pub(crate) fn list_marker(ordered: bool, index: usize) -> String {
    if ordered {
        format!("{}. ", index + 1)
    } else {
        "• ".to_string()
    }
}
