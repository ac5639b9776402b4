// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track definitions for the timeline.

use crate::error::Result;
use crate::event::EventId;
use crate::keyframe::{Keyframe, KeyframeId};
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackType {
    /// Property animation
    #[default]
    Animation,
    /// Audio playback
    Audio,
    /// Visual effect parameters
    Effect,
    /// Camera movement
    Camera,
    /// Subtitles and captions
    Subtitle,
    /// Marker lane
    Marker,
}

impl TrackType {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Animation => "Animation",
            Self::Audio => "Audio",
            Self::Effect => "Effect",
            Self::Camera => "Camera",
            Self::Subtitle => "Subtitle",
            Self::Marker => "Marker",
        }
    }

    /// Get the track color
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Animation => [100, 150, 255],
            Self::Audio => [200, 100, 255],
            Self::Effect => [150, 255, 100],
            Self::Camera => [255, 100, 150],
            Self::Subtitle => [255, 200, 100],
            Self::Marker => [150, 150, 150],
        }
    }
}

/// A track: per-property keyframe lists plus the events filed under it
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track name
    pub name: String,
    /// Track type
    pub track_type: TrackType,
    /// Whether the track takes part in playback
    pub enabled: bool,
    /// Whether the track is locked
    pub locked: bool,
    /// Track color
    pub color: [u8; 3],
    /// Track opacity
    pub opacity: f64,
    /// Keyframes per property, each list sorted by time
    keyframes: IndexMap<String, Vec<Keyframe>>,
    /// Events filed under this track
    events: Vec<EventId>,
}

impl Track {
    /// Create a new track
    pub fn new(name: impl Into<String>, track_type: TrackType) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            track_type,
            enabled: true,
            locked: false,
            color: track_type.color(),
            opacity: 1.0,
            keyframes: IndexMap::new(),
            events: Vec::new(),
        }
    }

    /// Add a keyframe to a property. The list is re-sorted by time on every
    /// insert; keyframes sharing a time keep their insertion order.
    pub fn add_keyframe(&mut self, property: impl Into<String>, keyframe: Keyframe) -> KeyframeId {
        let id = keyframe.id;
        let list = self.keyframes.entry(property.into()).or_default();
        list.push(keyframe);
        sort_keyframes(list);
        id
    }

    /// Remove a keyframe
    pub fn remove_keyframe(&mut self, property: &str, keyframe_id: KeyframeId) -> Option<Keyframe> {
        let list = self.keyframes.get_mut(property)?;
        let index = list.iter().position(|k| k.id == keyframe_id)?;
        Some(list.remove(index))
    }

    /// Drop every keyframe of a property
    pub fn clear_keyframes(&mut self, property: &str) {
        if let Some(list) = self.keyframes.get_mut(property) {
            list.clear();
        }
    }

    /// Move keyframe to a new time
    pub fn move_keyframe(&mut self, property: &str, keyframe_id: KeyframeId, new_time: f64) -> bool {
        let Some(list) = self.keyframes.get_mut(property) else {
            return false;
        };
        let Some(kf) = list.iter_mut().find(|k| k.id == keyframe_id) else {
            return false;
        };
        kf.time = new_time;
        sort_keyframes(list);
        true
    }

    /// Get keyframe by ID
    pub fn keyframe(&self, property: &str, keyframe_id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes(property).iter().find(|k| k.id == keyframe_id)
    }

    /// Get mutable keyframe by ID. Changing its time requires
    /// [`Track::move_keyframe`] to keep the list ordered.
    pub fn keyframe_mut(&mut self, property: &str, keyframe_id: KeyframeId) -> Option<&mut Keyframe> {
        self.keyframes
            .get_mut(property)?
            .iter_mut()
            .find(|k| k.id == keyframe_id)
    }

    /// Keyframes of a property, sorted by time
    pub fn keyframes(&self, property: &str) -> &[Keyframe] {
        self.keyframes.get(property).map_or(&[], Vec::as_slice)
    }

    /// Animated properties, in the order they were first keyed
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.keyframes.keys().map(String::as_str)
    }

    /// All keyframe lists
    pub fn keyframes_by_property(&self) -> &IndexMap<String, Vec<Keyframe>> {
        &self.keyframes
    }

    /// Keyframes of a property in `[start, end]`
    pub fn keyframes_in_range(&self, property: &str, start: f64, end: f64) -> Vec<&Keyframe> {
        self.keyframes(property)
            .iter()
            .filter(|k| k.time >= start && k.time <= end)
            .collect()
    }

    /// Value of a property at `time`.
    ///
    /// `None` when the property has no keyframes. Before the first keyframe
    /// the first value is held, from the last keyframe on the last value is
    /// held, and in between the surrounding pair is interpolated.
    pub fn value_at(&self, property: &str, time: f64) -> Result<Option<Value>> {
        let keyframes = self.keyframes(property);
        let Some(first) = keyframes.first() else {
            return Ok(None);
        };

        let next_idx = keyframes.iter().position(|k| k.time > time);
        match next_idx {
            Some(0) => Ok(Some(first.value.clone())),
            Some(idx) => keyframes[idx - 1]
                .interpolate_to(&keyframes[idx], time)
                .map(Some),
            None => Ok(keyframes.last().map(|k| k.value.clone())),
        }
    }

    /// Time of the latest keyframe across all properties
    pub fn duration(&self) -> f64 {
        self.keyframes
            .values()
            .filter_map(|list| list.last())
            .map(|k| k.time)
            .fold(0.0, f64::max)
    }

    /// Get keyframe count across all properties
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.values().map(Vec::len).sum()
    }

    /// Offset all keyframes by a time delta, never below zero
    pub fn offset_time(&mut self, delta: f64) {
        for list in self.keyframes.values_mut() {
            for kf in list.iter_mut() {
                kf.time = (kf.time + delta).max(0.0);
            }
            sort_keyframes(list);
        }
    }

    /// Scale all keyframe times by a factor
    pub fn scale_time(&mut self, factor: f64) {
        for list in self.keyframes.values_mut() {
            for kf in list.iter_mut() {
                kf.time *= factor;
            }
            sort_keyframes(list);
        }
    }

    /// Whether the track is part of playback on its own terms
    pub fn is_playable(&self) -> bool {
        self.enabled && !self.locked
    }

    /// Events filed under this track
    pub fn events(&self) -> &[EventId] {
        &self.events
    }

    pub(crate) fn attach_event(&mut self, event_id: EventId) {
        self.events.push(event_id);
    }

    pub(crate) fn detach_event(&mut self, event_id: EventId) {
        self.events.retain(|id| *id != event_id);
    }
}

/// Stable sort by time
fn sort_keyframes(keyframes: &mut [Keyframe]) {
    keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
}
