pub mod convert;
pub mod output;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use convert::{ConversionRequest, ConvertError, DocumentService, FailureKind, Stage};
pub use output::{OutputError, OutputFinalizer, artifact_file_name, cleanup};
pub use parsing::{
    blocks::{Block, BuildOptions, Document, ParseMode},
    inline::{Run, tokenize},
    parse_document,
};
pub use render::{
    Artifact, FontFiles, RenderError, RenderSettings, Renderer, TargetFormat, renderer_for,
};
