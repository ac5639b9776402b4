// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline settings, persisted as RON.

use crate::error::{Result, TimelineError};
use crate::playback::LoopRange;
use crate::track::TrackType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// A layer created when a timeline is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerTemplate {
    /// Layer name
    pub name: String,
    /// Paint order
    pub z_index: i32,
    /// Type of the layer's tracks
    #[serde(default)]
    pub track_type: TrackType,
    /// Track names
    pub tracks: Vec<String>,
}

impl LayerTemplate {
    /// Create a layer template
    pub fn new(name: &str, z_index: i32, track_type: TrackType, tracks: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            z_index,
            track_type,
            tracks: tracks.iter().map(ToString::to_string).collect(),
        }
    }

    /// The six layers every timeline starts with
    pub fn defaults() -> Vec<LayerTemplate> {
        vec![
            Self::new("Background", 0, TrackType::Animation, &["main"]),
            Self::new("Main", 10, TrackType::Animation, &["main"]),
            Self::new("Effects", 20, TrackType::Effect, &["main"]),
            Self::new("Foreground", 30, TrackType::Animation, &["main"]),
            Self::new("Audio", 40, TrackType::Audio, &["main"]),
            Self::new("Camera", 50, TrackType::Camera, &["movement"]),
        ]
    }
}

/// Settings a timeline is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Format version
    pub version: u32,
    /// Total length in seconds
    pub duration: f64,
    /// Frames per second
    pub fps: f64,
    /// Playback speed multiplier
    pub playback_speed: f64,
    /// Loop range
    pub loop_range: LoopRange,
    /// Layers created at construction
    pub default_layers: Vec<LayerTemplate>,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            duration: 10.0,
            fps: 60.0,
            playback_speed: 1.0,
            loop_range: LoopRange::default(),
            default_layers: LayerTemplate::defaults(),
        }
    }
}

impl TimelineSettings {
    /// Settings for a given length and frame rate
    pub fn new(duration: f64, fps: f64) -> Self {
        Self {
            duration,
            fps,
            ..Self::default()
        }
    }

    /// Parse from RON
    pub fn from_ron(content: &str) -> Result<Self> {
        let settings: TimelineSettings = ron::from_str(content)?;
        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(TimelineError::UnsupportedSettingsVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }
        Ok(settings)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_ron(&content)?;
        tracing::debug!("Loaded timeline settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layers() {
        let layers = LayerTemplate::defaults();
        let names: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Background", "Main", "Effects", "Foreground", "Audio", "Camera"]
        );
        let z: Vec<i32> = layers.iter().map(|l| l.z_index).collect();
        assert_eq!(z, vec![0, 10, 20, 30, 40, 50]);
        assert_eq!(layers[5].tracks, vec!["movement".to_string()]);
        assert_eq!(layers[4].track_type, TrackType::Audio);
    }

    #[test]
    fn test_ron_round_trip() {
        let mut settings = TimelineSettings::new(12.5, 30.0);
        settings.loop_range = LoopRange::new(1.0, 4.0);
        settings.default_layers.truncate(2);
        let ron_str = settings.to_ron().unwrap();
        let loaded = TimelineSettings::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let settings = TimelineSettings::from_ron("(duration: 3.0)").unwrap();
        assert_eq!(settings.duration, 3.0);
        assert_eq!(settings.fps, 60.0);
        assert_eq!(settings.default_layers.len(), 6);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = TimelineSettings::from_ron("(version: 99)").unwrap_err();
        assert!(matches!(
            err,
            TimelineError::UnsupportedSettingsVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(
            TimelineSettings::from_ron("(duration: "),
            Err(TimelineError::SettingsParse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "composer_settings_{}.ron",
            uuid::Uuid::new_v4().simple()
        ));
        let settings = TimelineSettings::new(8.0, 24.0);
        settings.save(&path).unwrap();
        let loaded = TimelineSettings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
