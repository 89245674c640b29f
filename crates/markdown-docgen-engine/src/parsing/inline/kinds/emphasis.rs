pub struct Emphasis;

impl Emphasis {
    pub const BOLD_STAR: &'static [u8; 2] = b"**";
    pub const BOLD_UNDERSCORE: &'static [u8; 2] = b"__";
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';

    /// Bytes at which a plain-text run must stop to let a match be tried.
    pub fn is_marker(b: u8) -> bool {
        b == Self::STAR || b == Self::UNDERSCORE
    }
}
