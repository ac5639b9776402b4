// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera authoring helpers on the `Camera/movement` track.

use crate::error::Result;
use crate::event::{EventId, EventOptions};
use crate::interpolation::InterpolationKind;
use crate::keyframe::{Keyframe, KeyframeId};
use crate::timeline::ComposerTimeline;
use crate::track::Track;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Layer holding the camera track
pub const CAMERA_LAYER: &str = "Camera";

/// Camera track name
pub const CAMERA_TRACK: &str = "movement";

/// Camera properties at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraState {
    properties: IndexMap<String, Value>,
}

impl CameraState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property
    pub fn with(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property
    pub fn set(&mut self, property: &str, value: impl Into<Value>) {
        self.properties.insert(property.to_string(), value.into());
    }

    /// Get a property
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    /// Camera position
    pub fn position(&self) -> Option<[f64; 3]> {
        self.get("position")?.as_array()
    }

    /// Zoom factor
    pub fn zoom(&self) -> Option<f64> {
        self.get("zoom")?.as_number()
    }

    /// All properties
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether no property is set
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Axis an orbit turns around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrbitAxis {
    /// Circle in the YZ plane
    X,
    /// Circle in the XZ plane
    #[default]
    Y,
    /// Circle in the XY plane
    Z,
}

impl OrbitAxis {
    /// Point on a circle of `radius` around `center` at `angle`
    pub fn point(&self, center: [f64; 3], radius: f64, angle: f64) -> [f64; 3] {
        let (c, s) = (radius * angle.cos(), radius * angle.sin());
        let [x, y, z] = center;
        match self {
            Self::X => [x, y + c, z + s],
            Self::Y => [x + c, y, z + s],
            Self::Z => [x + c, y + s, z],
        }
    }
}

impl ComposerTimeline {
    fn camera_track_mut(&mut self) -> Option<&mut Track> {
        let track = self.track_mut(CAMERA_LAYER, CAMERA_TRACK);
        if track.is_none() {
            tracing::warn!("No {}/{} track, camera keyframe skipped", CAMERA_LAYER, CAMERA_TRACK);
        }
        track
    }

    /// Key every property of `state` at `time`
    pub fn add_camera_keyframe(
        &mut self,
        time: f64,
        state: &CameraState,
        interpolation: impl Into<InterpolationKind>,
    ) -> Vec<KeyframeId> {
        let interpolation = interpolation.into();
        let Some(track) = self.camera_track_mut() else {
            return Vec::new();
        };
        state
            .iter()
            .map(|(property, value)| {
                track.add_keyframe(
                    property,
                    Keyframe::new(time, value.clone()).with_interpolation(interpolation.clone()),
                )
            })
            .collect()
    }

    /// Orbit the camera `revolutions` times around `center`.
    ///
    /// Writes `max(4, floor(duration * fps / 10))` evenly spaced `position`
    /// keyframes from `start` to `start + duration`.
    pub fn add_camera_orbit(
        &mut self,
        start: f64,
        duration: f64,
        center: [f64; 3],
        radius: f64,
        revolutions: f64,
        axis: OrbitAxis,
        interpolation: impl Into<InterpolationKind>,
    ) -> Vec<KeyframeId> {
        let interpolation = interpolation.into();
        let count = ((duration * self.fps / 10.0).floor().max(0.0) as usize).max(4);
        let Some(track) = self.camera_track_mut() else {
            return Vec::new();
        };

        let last = (count - 1) as f64;
        (0..count)
            .map(|i| {
                let progress = i as f64 / last;
                let position = axis.point(center, radius, TAU * revolutions * progress);
                track.add_keyframe(
                    "position",
                    Keyframe::new(start + duration * progress, position)
                        .with_interpolation(interpolation.clone()),
                )
            })
            .collect()
    }

    /// Zoom from `start_zoom` to `end_zoom`
    pub fn add_camera_zoom(
        &mut self,
        start: f64,
        duration: f64,
        start_zoom: f64,
        end_zoom: f64,
        interpolation: impl Into<InterpolationKind>,
    ) -> Vec<KeyframeId> {
        let interpolation = interpolation.into();
        let Some(track) = self.camera_track_mut() else {
            return Vec::new();
        };
        vec![
            track.add_keyframe(
                "zoom",
                Keyframe::new(start, start_zoom).with_interpolation(interpolation),
            ),
            track.add_keyframe("zoom", Keyframe::new(start + duration, end_zoom)),
        ]
    }

    /// Schedule a camera shake on the scene
    pub fn add_camera_shake(
        &mut self,
        start: f64,
        duration: f64,
        intensity: f64,
        frequency: f64,
    ) -> EventId {
        self.add_event(
            start,
            move |scene, _| {
                scene.camera_shake(intensity, frequency, duration);
                Ok(())
            },
            EventOptions::named("camera_shake")
                .with_duration(duration)
                .on_track(CAMERA_LAYER, CAMERA_TRACK)
                .with_tag("camera"),
        )
    }

    /// Every camera property evaluated at `time`
    pub fn get_camera_at_time(&self, time: f64) -> Result<CameraState> {
        let mut state = CameraState::new();
        let Some(track) = self.track(CAMERA_LAYER, CAMERA_TRACK) else {
            return Ok(state);
        };
        for property in track.properties() {
            if let Some(value) = track.value_at(property, time)? {
                state.set(property, value);
            }
        }
        Ok(state)
    }
}
