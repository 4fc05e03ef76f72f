//! Configuration persistence for sharey settings

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        // #ff0000
        Self {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        }
    }
}

/// Rejected color literal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #rrggbb or #rgb")]
pub struct ParseColorError(pub String);

impl ShapeColor {
    pub const WHITE: ShapeColor = ShapeColor {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Build a color from 8-bit channels
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` or the short `#rgb` form
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(err)?;
        if !digits.is_ascii() {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match digits.len() {
            6 => Ok(Self::from_rgb_u8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::from_rgb_u8(
                    short(&digits[0..1])?,
                    short(&digits[1..2])?,
                    short(&digits[2..3])?,
                ))
            }
            _ => Err(err()),
        }
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

impl FromStr for ShapeColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareyConfig {
    /// Stroke color for new editor sessions
    pub shape_color: ShapeColor,
    /// Stroke width for new editor sessions
    pub stroke_width: f32,
    /// Largest canvas a loaded image is scaled down to
    pub max_canvas_width: u32,
    pub max_canvas_height: u32,
    /// Border color of the crop selection
    #[serde(default = "default_crop_highlight")]
    pub crop_highlight: ShapeColor,
    /// Library file, `None` means the platform data directory
    #[serde(default)]
    pub library_path: Option<PathBuf>,
    /// Maximum serialized library size in bytes
    #[serde(default = "default_library_quota")]
    pub library_quota_bytes: usize,
    /// How long a toast stays visible
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
}

fn default_crop_highlight() -> ShapeColor {
    // #66d9ef
    ShapeColor::from_rgb_u8(0x66, 0xd9, 0xef)
}

fn default_library_quota() -> usize {
    5 * 1024 * 1024
}

fn default_toast_duration_ms() -> u64 {
    3000
}

impl ShareyConfig {
    /// Directory and file name under the platform config dir
    pub const ID: &'static str = "sharey";

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load configuration from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read(path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Error loading config, using defaults: {:?}", err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read config {}: {:?}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            log::error!("No config directory available for saving");
            return;
        };
        self.save_to(&path);
    }

    /// Save configuration to `path`, logging failures
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent()
            && let Err(err) = std::fs::create_dir_all(parent)
        {
            log::error!("Could not create config directory: {:?}", err);
            return;
        }
        match serde_json::to_vec_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::error!("Failed to save config: {:?}", err);
                }
            }
            Err(err) => log::error!("Failed to serialize config: {:?}", err),
        }
    }

    /// Resolved library file location
    pub fn library_file(&self) -> Option<PathBuf> {
        self.library_path.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join(Self::ID).join("sharey-library.json"))
        })
    }
}

impl Default for ShareyConfig {
    fn default() -> Self {
        Self {
            shape_color: ShapeColor::default(),
            stroke_width: 3.0,
            max_canvas_width: 1200,
            max_canvas_height: 800,
            crop_highlight: default_crop_highlight(),
            library_path: None,
            library_quota_bytes: default_library_quota(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}
