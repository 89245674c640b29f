use markdown_docgen_engine::{BuildOptions, FontFiles, ParseMode, RenderSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How input text is split into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Markdown,
    Paragraphs,
}

impl From<Mode> for ParseMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Markdown => ParseMode::Markdown,
            Mode::Paragraphs => ParseMode::Paragraphs,
        }
    }
}

/// TrueType files for the PDF backend. All four must be set to take effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mono: Option<PathBuf>,
}

impl FontsConfig {
    fn font_files(&self) -> Option<FontFiles> {
        Some(FontFiles {
            regular: self.regular.clone()?,
            bold: self.bold.clone()?,
            italic: self.italic.clone()?,
            mono: self.mono.clone()?,
        })
    }

    fn expand(&mut self) {
        for path in [
            &mut self.regular,
            &mut self.bold,
            &mut self.italic,
            &mut self.mono,
        ]
        .into_iter()
        .flatten()
        {
            if let Some(expanded) = Config::expand_path(path) {
                *path = expanded;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub mode: Mode,
    pub subheading_max_len: usize,
    pub date_label: String,
    pub margin_inches: f32,
    pub body_font_size: f32,
    pub fonts: FontsConfig,
}

impl Default for Config {
    fn default() -> Self {
        let settings = RenderSettings::default();
        Self {
            output_dir: PathBuf::from("generated_docs"),
            mode: Mode::default(),
            subheading_max_len: BuildOptions::default().subheading_max_len,
            date_label: settings.date_label,
            margin_inches: settings.margin_inches,
            body_font_size: settings.body_font_size,
            fonts: FontsConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in configured paths
        config.output_dir = Self::expand_path(&config.output_dir).unwrap_or(config.output_dir);
        config.fonts.expand();

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-docgen");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            mode: self.mode.into(),
            subheading_max_len: self.subheading_max_len,
            ..BuildOptions::default()
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            margin_inches: self.margin_inches,
            body_font_size: self.body_font_size,
            date_label: self.date_label.clone(),
            pdf_fonts: self.fonts.font_files(),
            ..RenderSettings::default()
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-docgen/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_dir, PathBuf::from("generated_docs"));
        assert_eq!(config.subheading_max_len, 100);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
mode = "paragraphs"
date_label = "Erstellt"
"#,
        )
        .unwrap();

        assert_eq!(config.mode, Mode::Paragraphs);
        assert_eq!(config.date_label, "Erstellt");
        assert_eq!(config.margin_inches, 1.0);
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "mode = \"html\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("DOCGEN_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$DOCGEN_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("DOCGEN_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        assert_eq!(Config::expand_path(&path), Some(path));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            output_dir: PathBuf::from("/tmp/docs"),
            mode: Mode::Paragraphs,
            body_font_size: 11.0,
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_tilde_in_output_dir_is_expanded() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "output_dir = \"~/docs\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        let output_dir = config.output_dir.to_string_lossy();
        assert!(!output_dir.starts_with('~'));
        assert!(output_dir.ends_with("docs"));
    }

    #[test]
    fn test_fonts_need_all_four_files() {
        let mut fonts = FontsConfig {
            regular: Some("/f/r.ttf".into()),
            bold: Some("/f/b.ttf".into()),
            italic: Some("/f/i.ttf".into()),
            mono: None,
        };
        assert_eq!(fonts.font_files(), None);

        fonts.mono = Some("/f/m.ttf".into());
        let files = fonts.font_files().unwrap();
        assert_eq!(files.mono, PathBuf::from("/f/m.ttf"));
    }

    #[test]
    fn test_maps_onto_engine_types() {
        let config = Config {
            mode: Mode::Paragraphs,
            subheading_max_len: 60,
            date_label: "Date".into(),
            margin_inches: 0.5,
            ..Config::default()
        };

        let options = config.build_options();
        assert_eq!(options.mode, ParseMode::Paragraphs);
        assert_eq!(options.subheading_max_len, 60);
        assert_eq!(options.subheading_level, 2);

        let settings = config.render_settings();
        assert_eq!(settings.date_label, "Date");
        assert_eq!(settings.margin_inches, 0.5);
        assert_eq!(settings.pdf_fonts, None);
        assert_eq!(settings.code_font, "Courier New");
    }
}
