//! Typed scan options decoded from the host configuration message.

use crate::wire::{self, AndroidConfiguration};
use crate::Symbology;
use log::warn;
use prost::Message;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Host configuration that cannot be used to start a session.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Malformed(#[from] prost::DecodeError),
    #[error("unsupported camera selection {0} (expected -1, 0 or 1)")]
    UnsupportedCamera(i32),
    #[error("aspect tolerance must be finite and >= 0, got {0}")]
    InvalidAspectTolerance(f64),
}

/// Which camera the session should open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraSelection {
    /// Let the engine pick, which is the back camera on most devices.
    #[default]
    Default,
    Back,
    Front,
}

impl CameraSelection {
    /// Interpret the `useCamera` wire value (`-1`, `0`, `1`).
    pub fn from_wire(value: i32) -> Option<Self> {
        match value {
            -1 => Some(CameraSelection::Default),
            0 => Some(CameraSelection::Back),
            1 => Some(CameraSelection::Front),
            _ => None,
        }
    }

    pub fn to_wire(self) -> i32 {
        match self {
            CameraSelection::Default => -1,
            CameraSelection::Back => 0,
            CameraSelection::Front => 1,
        }
    }
}

pub const STRING_CANCEL: &str = "cancel";
pub const STRING_FLASH_ON: &str = "flash_on";
pub const STRING_FLASH_OFF: &str = "flash_off";

/// Localized labels shown by the scanner screen.
///
/// `cancel`, `flash_on` and `flash_off` always resolve; missing entries fall
/// back to English defaults. Extra keys are preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiStrings {
    entries: BTreeMap<String, String>,
}

impl UiStrings {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up any label by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .or_else(|| default_label(key))
    }

    pub fn cancel(&self) -> &str {
        self.get(STRING_CANCEL).unwrap_or("Cancel")
    }

    pub fn flash_on(&self) -> &str {
        self.get(STRING_FLASH_ON).unwrap_or("Flash on")
    }

    pub fn flash_off(&self) -> &str {
        self.get(STRING_FLASH_OFF).unwrap_or("Flash off")
    }

    /// Keys explicitly provided by the host.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn default_label(key: &str) -> Option<&'static str> {
    match key {
        STRING_CANCEL => Some("Cancel"),
        STRING_FLASH_ON => Some("Flash on"),
        STRING_FLASH_OFF => Some("Flash off"),
        _ => None,
    }
}

/// Parameters handed to an engine when the camera is opened.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    pub camera: CameraSelection,
    pub auto_focus: bool,
    /// Preview aspect-ratio tolerance; `0.0` leaves the engine default.
    pub aspect_tolerance: f64,
}

/// Decoded, validated scan options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanOptions {
    pub camera: CameraSelection,
    pub auto_focus: bool,
    pub aspect_tolerance: f64,
    /// Requested symbologies in configuration order, without repeats.
    /// Empty means unrestricted.
    pub restrict_formats: Vec<Symbology>,
    /// Raw `restrictFormat` values that named no known symbology.
    #[serde(default)]
    pub unrecognized_formats: Vec<i32>,
    pub auto_enable_flash: bool,
    pub strings: UiStrings,
}

impl ScanOptions {
    /// Decode and validate a binary configuration message.
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let cfg = wire::Configuration::decode(bytes)?;
        Self::from_wire(cfg)
    }

    /// Validate an already decoded configuration message.
    pub fn from_wire(cfg: wire::Configuration) -> Result<Self, ConfigError> {
        let camera = CameraSelection::from_wire(cfg.use_camera)
            .ok_or(ConfigError::UnsupportedCamera(cfg.use_camera))?;

        let android = cfg.android.unwrap_or_default();
        if !android.aspect_tolerance.is_finite() || android.aspect_tolerance < 0.0 {
            return Err(ConfigError::InvalidAspectTolerance(android.aspect_tolerance));
        }

        let mut restrict_formats = Vec::with_capacity(cfg.restrict_format.len());
        let mut unrecognized_formats = Vec::new();
        for raw in cfg.restrict_format {
            match Symbology::from_wire(raw) {
                Some(Symbology::Unknown) | None => {
                    warn!("restricted format value {raw} is not a known symbology, skipping");
                    unrecognized_formats.push(raw);
                }
                Some(s) if !restrict_formats.contains(&s) => restrict_formats.push(s),
                Some(_) => {}
            }
        }

        Ok(Self {
            camera,
            auto_focus: android.use_auto_focus,
            aspect_tolerance: android.aspect_tolerance,
            restrict_formats,
            unrecognized_formats,
            auto_enable_flash: cfg.auto_enable_flash,
            strings: UiStrings::new(cfg.strings),
        })
    }

    /// Project back into the wire message.
    pub fn to_wire(&self) -> wire::Configuration {
        wire::Configuration {
            strings: self
                .strings
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            restrict_format: self
                .restrict_formats
                .iter()
                .map(|s| *s as i32)
                .chain(self.unrecognized_formats.iter().copied())
                .collect(),
            use_camera: self.camera.to_wire(),
            android: Some(AndroidConfiguration {
                aspect_tolerance: self.aspect_tolerance,
                use_auto_focus: self.auto_focus,
            }),
            auto_enable_flash: self.auto_enable_flash,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        self.to_wire().encode_to_vec()
    }

    /// Parameters for opening the camera.
    pub fn camera_options(&self) -> CameraOptions {
        CameraOptions {
            camera: self.camera,
            auto_focus: self.auto_focus,
            aspect_tolerance: self.aspect_tolerance,
        }
    }
}
