//! Approximate advance widths for line breaking, in em units of the Times
//! and Courier families.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Italic,
    BoldItalic,
    Mono,
    MonoBold,
}

impl Face {
    pub fn from_flags(bold: bool, italic: bool, mono: bool) -> Self {
        match (bold, italic, mono) {
            (false, _, true) => Face::Mono,
            (true, _, true) => Face::MonoBold,
            (false, false, false) => Face::Regular,
            (true, false, false) => Face::Bold,
            (false, true, false) => Face::Italic,
            (true, true, false) => Face::BoldItalic,
        }
    }

    pub fn is_mono(&self) -> bool {
        matches!(self, Face::Mono | Face::MonoBold)
    }

    fn is_bold(&self) -> bool {
        matches!(self, Face::Bold | Face::BoldItalic | Face::MonoBold)
    }
}

const MONO_EM: f32 = 0.6;

fn serif_em(c: char) -> f32 {
    match c {
        ' ' => 0.25,
        'i' | 'j' | 'l' | 't' | 'f' | 'r' | 'I' => 0.30,
        '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.27,
        'm' | 'w' | 'M' | 'W' => 0.76,
        c if c.is_ascii_digit() => 0.5,
        c if c.is_uppercase() => 0.68,
        c if c.is_alphabetic() => 0.48,
        _ => 0.5,
    }
}

/// Width of `c` in points at `size`.
pub fn char_width(c: char, face: Face, size: f32) -> f32 {
    let em = if face.is_mono() {
        MONO_EM
    } else if face.is_bold() {
        serif_em(c) * 1.06
    } else {
        serif_em(c)
    };
    em * size
}

/// Width of `text` in points at `size`.
pub fn text_width(text: &str, face: Face, size: f32) -> f32 {
    text.chars().map(|c| char_width(c, face, size)).sum()
}
