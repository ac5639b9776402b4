// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layers: z-indexed containers of tracks.

use crate::track::{Track, TrackType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub Uuid);

impl LayerId {
    /// Create a new random layer ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// How a layer composites onto the layers below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source over
    #[default]
    Normal,
    /// Multiply
    Multiply,
    /// Screen
    Screen,
    /// Additive
    Add,
    /// Overlay
    Overlay,
}

/// 2D placement of a layer relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerTransform {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset
    pub y: f64,
    /// Uniform scale
    pub scale: f64,
    /// Rotation in radians
    pub rotation: f64,
}

impl LayerTransform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotation: 0.0,
    };

    /// Apply `child` on top of this transform: offsets add, scales
    /// multiply, rotations add.
    pub fn then(&self, child: &LayerTransform) -> LayerTransform {
        LayerTransform {
            x: self.x + child.x,
            y: self.y + child.y,
            scale: self.scale * child.scale,
            rotation: self.rotation + child.rotation,
        }
    }
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A named, z-indexed group of tracks
#[derive(Debug, Clone)]
pub struct Layer {
    /// Unique layer ID
    pub id: LayerId,
    /// Layer name, unique within a timeline
    pub name: String,
    /// Whether the layer is shown
    pub visible: bool,
    /// Whether the layer is locked
    pub locked: bool,
    /// Solo flag; when any layer is soloed only soloed layers play
    pub solo: bool,
    /// Paint order, lower first
    pub z_index: i32,
    /// Blend mode
    pub blend_mode: BlendMode,
    /// Layer opacity
    pub opacity: f64,
    /// Name of the parent layer
    pub parent_layer: Option<String>,
    /// Local transform
    pub transform: LayerTransform,
    /// Tracks in insertion order
    tracks: Vec<Track>,
    /// Insertion ordinal, breaks z-index ties
    pub(crate) ordinal: u64,
}

impl Layer {
    /// Create an empty layer
    pub fn new(name: impl Into<String>, z_index: i32) -> Self {
        Self {
            id: LayerId::new(),
            name: name.into(),
            visible: true,
            locked: false,
            solo: false,
            z_index,
            blend_mode: BlendMode::Normal,
            opacity: 1.0,
            parent_layer: None,
            transform: LayerTransform::IDENTITY,
            tracks: Vec::new(),
            ordinal: 0,
        }
    }

    /// Set the parent layer
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_layer = Some(parent.into());
        self
    }

    /// Add a track. An existing track with the same name is returned
    /// unchanged.
    pub fn add_track(&mut self, name: impl Into<String>, track_type: TrackType) -> &mut Track {
        let name = name.into();
        let index = match self.tracks.iter().position(|t| t.name == name) {
            Some(index) => {
                tracing::debug!("Track '{}' already exists on layer '{}'", name, self.name);
                index
            }
            None => {
                self.tracks.push(Track::new(name, track_type));
                self.tracks.len() - 1
            }
        };
        &mut self.tracks[index]
    }

    /// Remove a track by name
    pub fn remove_track(&mut self, name: &str) -> Option<Track> {
        let index = self.tracks.iter().position(|t| t.name == name)?;
        Some(self.tracks.remove(index))
    }

    /// Get a track by name
    pub fn track(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name == name)
    }

    /// Get a mutable track by name
    pub fn track_mut(&mut self, name: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.name == name)
    }

    /// All tracks
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Get track count
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Latest keyframe time over all tracks
    pub fn duration(&self) -> f64 {
        self.tracks.iter().map(Track::duration).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::Keyframe;

    #[test]
    fn test_add_track_keeps_existing() {
        let mut layer = Layer::new("Main", 10);
        layer.add_track("main", TrackType::Animation);
        layer.add_track("fx", TrackType::Effect);
        if let Some(track) = layer.track_mut("main") {
            track.add_keyframe("x", Keyframe::new(1.0, 5.0));
        }

        let again = layer.add_track("main", TrackType::Audio);
        assert_eq!(again.track_type, TrackType::Animation);
        assert_eq!(again.keyframes("x").len(), 1);
        assert_eq!(layer.track_count(), 2);
        assert_eq!(layer.tracks()[0].name, "main");
    }

    #[test]
    fn test_remove_track() {
        let mut layer = Layer::new("Main", 10);
        layer.add_track("main", TrackType::Animation);
        assert!(layer.remove_track("main").is_some());
        assert!(layer.remove_track("main").is_none());
        assert!(layer.track("main").is_none());
    }

    #[test]
    fn test_transform_composition() {
        let parent = LayerTransform {
            x: 10.0,
            y: -2.0,
            scale: 2.0,
            rotation: 0.5,
        };
        let child = LayerTransform {
            x: 1.0,
            y: 1.0,
            scale: 0.25,
            rotation: 0.25,
        };
        let world = parent.then(&child);
        assert_eq!(world.x, 11.0);
        assert_eq!(world.y, -1.0);
        assert_eq!(world.scale, 0.5);
        assert_eq!(world.rotation, 0.75);
        assert_eq!(LayerTransform::IDENTITY.then(&child), child);
    }
}
