//! User-tunable look and behaviour of the editor window.
//!
//! Read from `settings.toml` in the platform config directory, or from the
//! path given with `--config`. Every key is optional.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PLACEHOLDER: &str = "[ Please Type Here ]";
pub const DEFAULT_ERROR_PLACEHOLDER: &str = "[ Error Messages ]";
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings from `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_color(self) -> iced::Color {
        iced::Color::from_rgb8(self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub family: FontFamily,
    pub size: f32,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: FontFamily::Serif,
            size: 12.0,
        }
    }
}

impl FontSettings {
    pub fn regular(&self) -> iced::Font {
        let family = match self.family {
            FontFamily::Serif => iced::font::Family::Serif,
            FontFamily::SansSerif => iced::font::Family::SansSerif,
            FontFamily::Monospace => iced::font::Family::Monospace,
        };
        iced::Font {
            family,
            ..iced::Font::DEFAULT
        }
    }

    pub fn bold(&self) -> iced::Font {
        iced::Font {
            weight: iced::font::Weight::Bold,
            ..self.regular()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WindowSize(pub u32, pub u32);

impl WindowSize {
    pub fn to_size(self) -> iced::Size {
        iced::Size::new(self.0 as f32, self.1 as f32)
    }
}

/// Which hook runs when the input passes validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnRun {
    None,
    Compile,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub background_color: Rgb,
    pub panel_color: Rgb,
    pub text_color: Rgb,
    pub font: FontSettings,
    pub placeholder_text: String,
    pub error_placeholder_text: String,
    pub window_size: WindowSize,
    pub asset_dir: Option<PathBuf>,
    pub on_run: OnRun,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_color: Rgb(36, 27, 53),
            panel_color: Rgb(48, 41, 63),
            text_color: Rgb(255, 255, 255),
            font: FontSettings::default(),
            placeholder_text: DEFAULT_PLACEHOLDER.to_string(),
            error_placeholder_text: DEFAULT_ERROR_PLACEHOLDER.to_string(),
            window_size: WindowSize(800, 550),
            asset_dir: None,
            on_run: OnRun::Compile,
        }
    }
}

impl Settings {
    /// `<config dir>/apbl-studio/settings.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "apbl-studio").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// An explicit path must exist; the default location may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    tracing::debug!("no settings file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
