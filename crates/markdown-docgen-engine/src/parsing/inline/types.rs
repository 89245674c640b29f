use serde::Serialize;

/// A minimal styled piece of inline text.
///
/// The contained text is never empty; the tokenizer drops empty pieces
/// instead of emitting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Run {
    /// Text without any styling.
    Plain(String),
    /// `**text**` or `__text__`.
    Bold(String),
    /// `*text*` or `_text_`.
    Italic(String),
    /// `` `text` ``, rendered in a monospace face.
    Code(String),
}

impl Run {
    /// Returns the text carried by this run regardless of its style.
    pub fn text(&self) -> &str {
        match self {
            Run::Plain(t) | Run::Bold(t) | Run::Italic(t) | Run::Code(t) => t,
        }
    }
}
