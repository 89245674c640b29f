use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.+)$").expect("valid heading regex"));

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*\-•][ \t]+(.+)$").expect("valid bullet regex"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[ \t]+(.+)$").expect("valid numbered item regex"));

/// Classification of a single line, carrying the residual text to tokenize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Whitespace only. Structurally significant: it ends a pending list.
    Blank,
    Heading { level: u8, text: &'a str },
    /// `* x`, `- x` or `• x`; the marker is dropped.
    UnorderedItem(&'a str),
    /// `12. x`; the numeral is dropped, renderers number items themselves.
    OrderedItem(&'a str),
    /// Anything else, as the whole trimmed line.
    Text(&'a str),
}

/// Classifies one line. The line is trimmed before matching.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = HEADING.captures(trimmed)
        && let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2))
    {
        return LineKind::Heading {
            // The pattern caps the run at six `#`.
            level: hashes.as_str().len() as u8,
            text: text.as_str(),
        };
    }

    if let Some(text) = UNORDERED_ITEM.captures(trimmed).and_then(|c| c.get(1)) {
        return LineKind::UnorderedItem(text.as_str());
    }

    if let Some(text) = ORDERED_ITEM.captures(trimmed).and_then(|c| c.get(1)) {
        return LineKind::OrderedItem(text.as_str());
    }

    LineKind::Text(trimmed)
}
