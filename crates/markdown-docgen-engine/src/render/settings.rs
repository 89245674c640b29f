use std::path::PathBuf;

use chrono::NaiveDate;

/// TrueType files used by the PDF backend instead of the built-in faces.
///
/// The built-in PDF faces only cover Latin text; point these at a family
/// with wider coverage for other scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFiles {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
    pub mono: PathBuf,
}

/// Presentation settings shared by both backends.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Margin on all four sides.
    pub margin_inches: f32,
    /// Body text size in points.
    pub body_font_size: f32,
    /// Label in front of the generation date.
    pub date_label: String,
    /// Body font family name for the Word backend.
    pub body_font: String,
    /// Monospace font family name for the Word backend.
    pub code_font: String,
    pub pdf_fonts: Option<FontFiles>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            margin_inches: 1.0,
            body_font_size: 12.0,
            date_label: "Created".to_string(),
            body_font: "Times New Roman".to_string(),
            code_font: "Courier New".to_string(),
            pdf_fonts: None,
        }
    }
}

impl RenderSettings {
    pub fn date_stamp(&self, date: NaiveDate) -> String {
        format!("{}: {}", self.date_label, date.format("%d.%m.%Y"))
    }
}
