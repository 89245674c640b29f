/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: nothing inside them is parsed as emphasis.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';
}

/// Sentinels wrapped around the decimal index of an extracted code span.
pub struct Placeholder;

impl Placeholder {
    pub const OPEN: char = '\u{E000}';
    pub const CLOSE: char = '\u{E001}';

    /// Leading UTF-8 byte of [`Placeholder::OPEN`], used as a scan stop.
    pub const OPEN_LEAD: u8 = 0xEE;

    pub fn token(index: usize) -> String {
        format!("{}{index}{}", Self::OPEN, Self::CLOSE)
    }
}
