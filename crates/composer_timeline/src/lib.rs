// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layered timeline for Composer.
//!
//! This crate provides:
//! - Named, z-ordered layers of keyframed tracks
//! - Per-property keyframe evaluation with any easing or rate function
//! - Timed events with a seek/play/pause/stop cursor
//! - Markers, regions and camera authoring helpers
//! - JSON documents and RON settings
//!
//! ## Architecture
//!
//! The timeline is built on:
//! - [`Keyframe`] segments blended by [`interpolate_values`]
//! - [`Track`] keyframe lists grouped into [`Layer`]s
//! - An [`EventQueue`] drained by the playback cursor
//! - A [`Scene`] the host implements to receive callbacks

pub mod camera;
pub mod document;
pub mod error;
pub mod event;
pub mod interpolation;
pub mod keyframe;
pub mod layer;
pub mod marker;
pub mod playback;
pub mod scene;
pub mod settings;
pub mod timeline;
pub mod track;
pub mod value;

pub use camera::{CameraState, OrbitAxis, CAMERA_LAYER, CAMERA_TRACK};
pub use error::{CallbackError, Result, TimelineError};
pub use event::{Event, EventCallback, EventContext, EventId, EventOptions, EventQueue};
pub use interpolation::InterpolationKind;
pub use keyframe::{Keyframe, KeyframeId};
pub use layer::{BlendMode, Layer, LayerId, LayerTransform};
pub use marker::{Marker, MarkerOptions, Region};
pub use playback::{LoopRange, PlaybackState};
pub use scene::Scene;
pub use settings::{LayerTemplate, TimelineSettings};
pub use timeline::{ComposerTimeline, KeyframeOptions, PlaybackCallback, TimeCallback};
pub use track::{Track, TrackId, TrackType};
pub use value::{interpolate_values, Lerp, Value};

pub use composer_easing;
