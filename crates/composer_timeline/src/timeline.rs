// SPDX-License-Identifier: MIT OR Apache-2.0
//! The composer timeline: layers, events, markers and authoring.

use crate::error::{CallbackError, Result};
use crate::event::{Event, EventContext, EventId, EventOptions, EventQueue};
use crate::interpolation::InterpolationKind;
use crate::keyframe::{Keyframe, KeyframeId};
use crate::layer::{Layer, LayerTransform};
use crate::marker::{self, Marker, MarkerOptions, Region, DEFAULT_REGION_COLOR};
use crate::playback::{LoopRange, PlaybackState};
use crate::scene::Scene;
use crate::settings::TimelineSettings;
use crate::track::{Track, TrackType};
use crate::value::Value;
use composer_easing::{EasingParams, RateFunctionBridge, RateFunctionRef, SpringParams};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Callback fired when a seek lands near its time
pub type TimeCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Callback fired on every playback step with the cursor time
pub type PlaybackCallback = Arc<dyn Fn(&mut dyn Scene, f64) + Send + Sync>;

/// Optional keyframe fields for [`ComposerTimeline::add_keyframe`]
#[derive(Debug, Clone, Default)]
pub struct KeyframeOptions {
    /// Preset name; replaces the interpolation and its parameters
    pub preset: Option<String>,
    /// Rate function overriding the interpolation
    pub rate_function: Option<RateFunctionRef>,
    /// Bezier control points
    pub bezier_points: Option<[f64; 4]>,
    /// Spring constants
    pub spring_params: Option<SpringParams>,
    /// Extra easing parameters, applied over the preset's
    pub easing_params: Option<EasingParams>,
}

impl KeyframeOptions {
    /// Use a preset
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            preset: Some(name.into()),
            ..Self::default()
        }
    }

    /// Override the interpolation with a rate function
    pub fn rate_function(reference: impl Into<RateFunctionRef>) -> Self {
        Self {
            rate_function: Some(reference.into()),
            ..Self::default()
        }
    }

    /// Set Bezier control points
    pub fn with_bezier_points(mut self, points: [f64; 4]) -> Self {
        self.bezier_points = Some(points);
        self
    }

    /// Set spring constants
    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.spring_params = Some(spring);
        self
    }

    /// Set easing parameters
    pub fn with_easing_params(mut self, params: EasingParams) -> Self {
        self.easing_params = Some(params);
        self
    }
}

/// Layered timeline with keyframed tracks, timed events and a playback
/// cursor.
pub struct ComposerTimeline {
    pub(crate) duration: f64,
    pub(crate) fps: f64,
    pub(crate) current_time: f64,
    pub(crate) playback_speed: f64,
    pub(crate) state: PlaybackState,
    pub(crate) loop_range: LoopRange,
    layers: IndexMap<String, Layer>,
    next_ordinal: u64,
    pub(crate) events: EventQueue,
    markers: Vec<Marker>,
    regions: Vec<Region>,
    pub(crate) time_callbacks: Vec<(f64, TimeCallback)>,
    pub(crate) playback_callbacks: Vec<PlaybackCallback>,
}

impl ComposerTimeline {
    /// Create a timeline with the default layers
    pub fn new(duration: f64, fps: f64) -> Self {
        Self::with_settings(&TimelineSettings::new(duration, fps))
    }

    /// Create a timeline from settings
    pub fn with_settings(settings: &TimelineSettings) -> Self {
        let mut timeline = Self::empty(settings.duration, settings.fps);
        timeline.set_playback_speed(settings.playback_speed);
        if settings.loop_range.enabled {
            timeline.set_loop(settings.loop_range.start, settings.loop_range.end);
        }
        for template in &settings.default_layers {
            let layer = timeline.add_layer(&template.name, &[], template.z_index, None);
            for track in &template.tracks {
                layer.add_track(track.as_str(), template.track_type);
            }
        }
        timeline
    }

    /// Create a timeline without any layers
    pub fn empty(duration: f64, fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            tracing::warn!("Invalid frame rate {}, using 60", fps);
            60.0
        };
        Self {
            duration: duration.max(0.0),
            fps,
            current_time: 0.0,
            playback_speed: 1.0,
            state: PlaybackState::Idle,
            loop_range: LoopRange::default(),
            layers: IndexMap::new(),
            next_ordinal: 0,
            events: EventQueue::new(),
            markers: Vec::new(),
            regions: Vec::new(),
            time_callbacks: Vec::new(),
            playback_callbacks: Vec::new(),
        }
    }

    /// Total length in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Frames per second
    pub fn fps(&self) -> f64 {
        self.fps
    }

    // ---- Layers ----

    /// Add a layer with animation tracks.
    ///
    /// When a layer with the same name exists it is kept as is, with its
    /// z-index, parent and keyframes. Only the missing tracks of
    /// `track_names` are added to it.
    pub fn add_layer(
        &mut self,
        name: &str,
        track_names: &[&str],
        z_index: i32,
        parent_layer: Option<&str>,
    ) -> &mut Layer {
        if let Some(index) = self.layers.get_index_of(name) {
            tracing::debug!("Layer '{}' already exists, keeping it", name);
            let layer = &mut self.layers[index];
            for track in track_names {
                layer.add_track(*track, TrackType::Animation);
            }
            return layer;
        }

        let mut layer = Layer::new(name, z_index);
        layer.parent_layer = parent_layer.map(ToString::to_string);
        layer.ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        for track in track_names {
            layer.add_track(*track, TrackType::Animation);
        }

        tracing::debug!("Added layer '{}' at z-index {}", name, z_index);
        let (index, _) = self.layers.insert_full(name.to_string(), layer);
        &mut self.layers[index]
    }

    /// Remove a layer and the events filed under its tracks
    pub fn remove_layer(&mut self, name: &str) -> Option<Layer> {
        let layer = self.layers.shift_remove(name)?;
        for track in layer.tracks() {
            for id in track.events() {
                self.events.remove(*id);
            }
        }
        Some(layer)
    }

    /// Get a layer
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// Get a mutable layer
    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.get_mut(name)
    }

    /// Layers in paint order: ascending z-index, ties by insertion order
    pub fn layers(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.values().collect();
        layers.sort_by_key(|layer| (layer.z_index, layer.ordinal));
        layers
    }

    /// Layer names in paint order
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers().into_iter().map(|l| l.name.as_str()).collect()
    }

    /// Get layer count
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    // ---- Tracks ----

    /// Add a track to a layer. An existing track with the same name is
    /// returned unchanged.
    pub fn add_track(&mut self, layer: &str, track: &str, track_type: TrackType) -> Option<&mut Track> {
        let Some(target) = self.layers.get_mut(layer) else {
            tracing::debug!("Cannot add track '{}': no layer '{}'", track, layer);
            return None;
        };
        Some(target.add_track(track, track_type))
    }

    /// Get a track
    pub fn track(&self, layer: &str, track: &str) -> Option<&Track> {
        self.layers.get(layer)?.track(track)
    }

    /// Get a mutable track
    pub fn track_mut(&mut self, layer: &str, track: &str) -> Option<&mut Track> {
        self.layers.get_mut(layer)?.track_mut(track)
    }

    /// Tracks taking part in playback, in paint order.
    ///
    /// A track is active when its layer is visible, its layer is soloed or
    /// nothing is soloed, and the track itself is enabled and unlocked.
    pub fn get_active_tracks(&self) -> Vec<&Track> {
        let any_solo = self.layers.values().any(|l| l.solo);
        self.layers()
            .into_iter()
            .filter(|layer| layer.visible && (!any_solo || layer.solo))
            .flat_map(|layer| layer.tracks().iter())
            .filter(|track| track.is_playable())
            .collect()
    }

    // ---- Keyframes ----

    /// Add a keyframe. `None` when the layer or track does not exist.
    pub fn add_keyframe(
        &mut self,
        layer: &str,
        track: &str,
        property: &str,
        time: f64,
        value: impl Into<Value>,
        interpolation: impl Into<InterpolationKind>,
        options: KeyframeOptions,
    ) -> Option<KeyframeId> {
        let Some(target) = self.track_mut(layer, track) else {
            tracing::debug!("Cannot add keyframe: no track '{}/{}'", layer, track);
            return None;
        };

        let mut keyframe = Keyframe::new(time, value).with_interpolation(interpolation);
        if let Some(name) = &options.preset {
            match RateFunctionBridge::preset(name) {
                Some(preset) => {
                    keyframe.interpolation = InterpolationKind::from(preset.kind);
                    keyframe.easing_params = preset.params;
                }
                None => tracing::warn!("Unknown easing preset '{}', keeping interpolation", name),
            }
        }
        if let Some(mut params) = options.easing_params {
            params.bezier = params.bezier.or(keyframe.easing_params.bezier);
            params.spring = params.spring.or(keyframe.easing_params.spring);
            keyframe.easing_params = params;
        }
        keyframe.bezier_points = options.bezier_points;
        keyframe.spring_params = options.spring_params;
        keyframe.rate_function_override = options.rate_function;

        Some(target.add_keyframe(property, keyframe))
    }

    /// Value of a property at `time`. `None` when the layer, track or
    /// property has nothing to evaluate.
    pub fn value_at(&self, layer: &str, track: &str, property: &str, time: f64) -> Result<Option<Value>> {
        match self.track(layer, track) {
            Some(track) => track.value_at(property, time),
            None => Ok(None),
        }
    }

    // ---- Events ----

    /// Schedule a callback at `time`
    pub fn add_event(
        &mut self,
        time: f64,
        callback: impl Fn(&mut dyn Scene, &EventContext) -> std::result::Result<(), CallbackError>
            + Send
            + Sync
            + 'static,
        options: EventOptions,
    ) -> EventId {
        let event = Event::new(time, Arc::new(callback), options);
        let id = event.id;

        if let (Some(layer), Some(track)) = (&event.layer_name, &event.track_name) {
            match self.layers.get_mut(layer).and_then(|l| l.track_mut(track)) {
                Some(track) => track.attach_event(id),
                None => tracing::warn!(
                    "Event '{}' names missing track '{}/{}'",
                    event.name,
                    layer,
                    track
                ),
            }
        }

        tracing::debug!("Scheduled event '{}' at {:.3}s", event.name, time);
        self.events.push(event)
    }

    /// Get an event
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id)
    }

    /// All events in insertion order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Enable or disable an event
    pub fn set_event_enabled(&mut self, id: EventId, enabled: bool) -> bool {
        match self.events.get_mut(id) {
            Some(event) => {
                event.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Remove an event
    pub fn remove_event(&mut self, id: EventId) -> Option<Event> {
        let event = self.events.remove(id)?;
        if let (Some(layer), Some(track)) = (&event.layer_name, &event.track_name) {
            if let Some(track) = self.track_mut(layer, track) {
                track.detach_event(id);
            }
        }
        Some(event)
    }

    /// Events with `start <= time <= end`, sorted by time. With `tags`,
    /// only events carrying at least one of them.
    pub fn get_events_in_range(&self, start: f64, end: f64, tags: Option<&[&str]>) -> Vec<&Event> {
        self.events.in_range(start, end, tags)
    }

    // ---- Markers and regions ----

    /// Add a marker
    pub fn add_marker(&mut self, time: f64, label: &str, options: MarkerOptions) {
        marker::insert_marker(
            &mut self.markers,
            Marker {
                time,
                label: label.to_string(),
                color: options.color,
                duration: options.duration,
            },
        );
    }

    /// Add a region
    pub fn add_region(
        &mut self,
        start: f64,
        end: f64,
        name: &str,
        color: Option<&str>,
        metadata: IndexMap<String, Value>,
    ) {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        marker::insert_region(
            &mut self.regions,
            Region {
                start,
                end,
                name: name.to_string(),
                color: color.unwrap_or(DEFAULT_REGION_COLOR).to_string(),
                metadata,
            },
        );
    }

    /// Markers sorted by time
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Regions sorted by start
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions containing `time`
    pub fn regions_at(&self, time: f64) -> Vec<&Region> {
        self.regions.iter().filter(|r| r.contains(time)).collect()
    }

    pub(crate) fn push_marker(&mut self, marker: Marker) {
        marker::insert_marker(&mut self.markers, marker);
    }

    pub(crate) fn push_region(&mut self, region: Region) {
        marker::insert_region(&mut self.regions, region);
    }

    // ---- Callbacks ----

    /// Register a callback fired by [`ComposerTimeline::seek`] when the
    /// target lies within one frame of `time`
    pub fn add_time_callback(&mut self, time: f64, callback: impl Fn(f64) + Send + Sync + 'static) {
        self.time_callbacks.push((time, Arc::new(callback)));
    }

    /// Register a callback fired after every playback step
    pub fn on_playback(&mut self, callback: impl Fn(&mut dyn Scene, f64) + Send + Sync + 'static) {
        self.playback_callbacks.push(Arc::new(callback));
    }

    // ---- Z-order ----

    /// Set a layer's z-index
    pub fn set_layer_z_index(&mut self, name: &str, z_index: i32) -> bool {
        let Some(layer) = self.layers.get_mut(name) else {
            return false;
        };
        layer.z_index = z_index;
        tracing::debug!("Layer '{}' moved to z-index {}", name, z_index);
        true
    }

    /// Swap places with the next layer up in paint order
    pub fn move_layer_forward(&mut self, name: &str) -> bool {
        self.swap_with_neighbour(name, 1)
    }

    /// Swap places with the next layer down in paint order
    pub fn move_layer_backward(&mut self, name: &str) -> bool {
        self.swap_with_neighbour(name, -1)
    }

    /// Move a layer above every other layer
    pub fn move_layer_to_top(&mut self, name: &str) -> bool {
        let Some(max) = self.layers.values().map(|l| l.z_index).max() else {
            return false;
        };
        self.set_layer_z_index(name, max.saturating_add(10))
    }

    /// Move a layer below every other layer
    pub fn move_layer_to_bottom(&mut self, name: &str) -> bool {
        let Some(min) = self.layers.values().map(|l| l.z_index).min() else {
            return false;
        };
        self.set_layer_z_index(name, min.saturating_sub(10))
    }

    fn swap_with_neighbour(&mut self, name: &str, step: isize) -> bool {
        let order: Vec<String> = self.layer_names().into_iter().map(ToString::to_string).collect();
        let Some(position) = order.iter().position(|n| n == name) else {
            return false;
        };
        let Some(neighbour) = position
            .checked_add_signed(step)
            .and_then(|i| order.get(i))
        else {
            return false;
        };

        let (Some(a), Some(b)) = (self.layers.get_index_of(name), self.layers.get_index_of(neighbour.as_str()))
        else {
            return false;
        };
        let (z_a, ord_a) = (self.layers[a].z_index, self.layers[a].ordinal);
        let (z_b, ord_b) = (self.layers[b].z_index, self.layers[b].ordinal);
        self.layers[a].z_index = z_b;
        self.layers[a].ordinal = ord_b;
        self.layers[b].z_index = z_a;
        self.layers[b].ordinal = ord_a;
        tracing::debug!("Swapped layers '{}' and '{}'", name, neighbour);
        true
    }

    /// Transform of a layer composed through its parent chain. Cycles are
    /// cut at the first repeated layer.
    pub fn layer_world_transform(&self, name: &str) -> Option<LayerTransform> {
        let mut layer = self.layers.get(name)?;
        let mut chain = vec![layer.transform];
        let mut visited = HashSet::from([layer.name.as_str()]);

        while let Some(parent) = layer.parent_layer.as_deref() {
            if !visited.insert(parent) {
                tracing::warn!("Layer parent cycle through '{}', cutting chain", parent);
                break;
            }
            let Some(next) = self.layers.get(parent) else {
                tracing::debug!("Layer '{}' has missing parent '{}'", layer.name, parent);
                break;
            };
            chain.push(next.transform);
            layer = next;
        }

        Some(
            chain
                .iter()
                .rev()
                .fold(LayerTransform::IDENTITY, |world, local| world.then(local)),
        )
    }

    /// Latest keyframe time over all layers
    pub fn content_duration(&self) -> f64 {
        self.layers.values().map(Layer::duration).fold(0.0, f64::max)
    }
}

impl fmt::Debug for ComposerTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposerTimeline")
            .field("duration", &self.duration)
            .field("fps", &self.fps)
            .field("current_time", &self.current_time)
            .field("state", &self.state)
            .field("layers", &self.layer_names())
            .field("events", &self.events.len())
            .field("markers", &self.markers.len())
            .field("regions", &self.regions.len())
            .finish_non_exhaustive()
    }
}

impl Default for ComposerTimeline {
    fn default() -> Self {
        Self::with_settings(&TimelineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use composer_easing::{EasingKind, EasingLibrary};

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn number(timeline: &ComposerTimeline, layer: &str, property: &str, time: f64) -> f64 {
        timeline
            .value_at(layer, "main", property, time)
            .unwrap()
            .and_then(|v| v.as_number())
            .unwrap()
    }

    #[test]
    fn test_default_layers() {
        let timeline = ComposerTimeline::new(10.0, 30.0);
        assert_eq!(
            timeline.layer_names(),
            vec!["Background", "Main", "Effects", "Foreground", "Audio", "Camera"]
        );
        assert!(timeline.track("Camera", "movement").is_some());
        assert_eq!(
            timeline.track("Audio", "main").map(|t| t.track_type),
            Some(TrackType::Audio)
        );
    }

    #[test]
    fn test_linear_keyframes() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_keyframe("Main", "main", "x", 0.0, 0.0, "linear", KeyframeOptions::default());
        timeline.add_keyframe("Main", "main", "x", 2.0, 10.0, "linear", KeyframeOptions::default());
        assert!(approx_eq(number(&timeline, "Main", "x", 1.0), 5.0));
        assert!(approx_eq(number(&timeline, "Main", "x", -1.0), 0.0));
        assert!(approx_eq(number(&timeline, "Main", "x", 3.0), 10.0));
    }

    #[test]
    fn test_bounce_keyframes() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_keyframe(
            "Main",
            "main",
            "y",
            0.0,
            0.0,
            EasingKind::EaseOutBounce,
            KeyframeOptions::default(),
        );
        timeline.add_keyframe("Main", "main", "y", 1.0, 1.0, "linear", KeyframeOptions::default());
        for t in [0.1, 0.2, 0.3] {
            assert!(approx_eq(number(&timeline, "Main", "y", t), 7.5625 * t * t));
        }
        assert!(approx_eq(number(&timeline, "Main", "y", 1.0), 1.0));
    }

    #[test]
    fn test_missing_targets_are_soft() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        assert!(timeline
            .add_keyframe("Nope", "main", "x", 0.0, 1.0, "linear", KeyframeOptions::default())
            .is_none());
        assert!(timeline.value_at("Main", "nope", "x", 0.0).unwrap().is_none());
        assert!(timeline.value_at("Main", "main", "x", 0.0).unwrap().is_none());
        assert!(timeline.add_track("Nope", "t", TrackType::Animation).is_none());
        assert!(!timeline.move_layer_forward("Nope"));
    }

    #[test]
    fn test_preset_keyframe() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        let id = timeline
            .add_keyframe(
                "Main",
                "main",
                "x",
                0.0,
                0.0,
                "linear",
                KeyframeOptions::preset("material_standard"),
            )
            .unwrap();
        let kf = timeline.track("Main", "main").and_then(|t| t.keyframe("x", id)).unwrap();
        assert_eq!(kf.interpolation, InterpolationKind::Bezier);
        assert_eq!(kf.effective_params().bezier, Some([0.4, 0.0, 0.2, 1.0]));
    }

    #[test]
    fn test_preset_keeps_curve_with_extra_params() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        let options = KeyframeOptions::preset("material_standard")
            .with_easing_params(EasingParams::default().with_overshoot(2.0));
        let id = timeline
            .add_keyframe("Main", "main", "x", 0.0, 0.0, "linear", options)
            .unwrap();
        timeline.add_keyframe("Main", "main", "x", 1.0, 1.0, "linear", KeyframeOptions::default());

        let kf = timeline.track("Main", "main").and_then(|t| t.keyframe("x", id)).unwrap();
        assert_eq!(kf.effective_params().bezier, Some([0.4, 0.0, 0.2, 1.0]));
        assert_eq!(kf.effective_params().overshoot, 2.0);

        let expected = EasingLibrary::evaluate(
            EasingKind::CubicBezier,
            0.3,
            &EasingParams::default().with_bezier([0.4, 0.0, 0.2, 1.0]),
        );
        assert!(approx_eq(number(&timeline, "Main", "x", 0.3), expected));
    }

    #[test]
    fn test_re_adding_layer_and_track_keeps_content() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_keyframe("Main", "main", "x", 0.0, 0.0, "linear", KeyframeOptions::default());
        timeline.add_keyframe("Main", "main", "x", 2.0, 8.0, "linear", KeyframeOptions::default());
        let event = timeline.add_event(1.0, |_, _| Ok(()), EventOptions::named("hit").on_track("Main", "main"));
        let z_index = timeline.layer("Main").map(|l| l.z_index);

        let track = timeline.add_track("Main", "main", TrackType::Audio).unwrap();
        assert_eq!(track.track_type, TrackType::Animation);
        assert_eq!(number(&timeline, "Main", "x", 1.0), 4.0);

        let layer = timeline.add_layer("Main", &["main", "extra"], 99, Some("Background"));
        assert_eq!(layer.track_count(), 2);
        assert_eq!(Some(layer.z_index), z_index);
        assert_eq!(layer.parent_layer, None);
        assert_eq!(number(&timeline, "Main", "x", 1.0), 4.0);
        assert_eq!(timeline.track("Main", "main").map(|t| t.events().to_vec()), Some(vec![event]));
        assert_eq!(timeline.layer_count(), 6);
    }

    #[test]
    fn test_z_order_ties_by_insertion() {
        let mut timeline = ComposerTimeline::empty(10.0, 30.0);
        timeline.add_layer("a", &[], 5, None);
        timeline.add_layer("b", &[], 5, None);
        timeline.add_layer("c", &[], 0, None);
        assert_eq!(timeline.layer_names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_move_forward_then_backward_restores_order() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        let before: Vec<String> = timeline.layer_names().into_iter().map(String::from).collect();
        assert!(timeline.move_layer_forward("Main"));
        assert_eq!(timeline.layer_names()[2], "Main");
        assert!(timeline.move_layer_backward("Main"));
        let after: Vec<String> = timeline.layer_names().into_iter().map(String::from).collect();
        assert_eq!(before, after);
        assert!(!timeline.move_layer_forward("Camera"));
        assert!(!timeline.move_layer_backward("Background"));
    }

    #[test]
    fn test_move_to_top_and_bottom() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.move_layer_to_top("Background");
        assert_eq!(timeline.layer("Background").map(|l| l.z_index), Some(60));
        assert_eq!(timeline.layer_names().last(), Some(&"Background"));
        timeline.move_layer_to_bottom("Camera");
        assert_eq!(timeline.layer("Camera").map(|l| l.z_index), Some(-10));
        assert_eq!(timeline.layer_names().first(), Some(&"Camera"));
    }

    #[test]
    fn test_active_tracks_respect_visibility_and_solo() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        assert_eq!(timeline.get_active_tracks().len(), 6);

        if let Some(layer) = timeline.layer_mut("Effects") {
            layer.visible = false;
        }
        if let Some(track) = timeline.track_mut("Main", "main") {
            track.locked = true;
        }
        assert_eq!(timeline.get_active_tracks().len(), 4);

        if let Some(layer) = timeline.layer_mut("Camera") {
            layer.solo = true;
        }
        let active = timeline.get_active_tracks();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "movement");
    }

    #[test]
    fn test_world_transform_through_parents() {
        let mut timeline = ComposerTimeline::empty(10.0, 30.0);
        timeline.add_layer("root", &[], 0, None).transform = LayerTransform {
            x: 10.0,
            y: 0.0,
            scale: 2.0,
            rotation: 0.1,
        };
        timeline.add_layer("child", &[], 1, Some("root")).transform = LayerTransform {
            x: 1.0,
            y: 2.0,
            scale: 0.5,
            rotation: 0.2,
        };
        let world = timeline.layer_world_transform("child").unwrap();
        assert!(approx_eq(world.x, 11.0));
        assert!(approx_eq(world.y, 2.0));
        assert!(approx_eq(world.scale, 1.0));
        assert!(approx_eq(world.rotation, 0.3));
    }

    #[test]
    fn test_world_transform_cuts_cycles() {
        let mut timeline = ComposerTimeline::empty(10.0, 30.0);
        timeline.add_layer("a", &[], 0, Some("b")).transform.x = 1.0;
        timeline.add_layer("b", &[], 1, Some("a")).transform.x = 2.0;
        let world = timeline.layer_world_transform("a").unwrap();
        assert!(approx_eq(world.x, 3.0));
    }

    #[test]
    fn test_events_filed_under_tracks() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        let id = timeline.add_event(
            1.0,
            |_, _| Ok(()),
            EventOptions::named("hit").on_track("Audio", "main").with_tag("sfx"),
        );
        assert_eq!(timeline.track("Audio", "main").map(|t| t.events().to_vec()), Some(vec![id]));
        assert_eq!(timeline.get_events_in_range(0.0, 2.0, Some(&["sfx"])).len(), 1);
        assert!(timeline.get_events_in_range(0.0, 2.0, Some(&["vfx"])).is_empty());

        assert!(timeline.remove_event(id).is_some());
        assert!(timeline.track("Audio", "main").is_some_and(|t| t.events().is_empty()));
    }

    #[test]
    fn test_markers_and_regions_sorted() {
        let mut timeline = ComposerTimeline::new(10.0, 30.0);
        timeline.add_marker(5.0, "drop", MarkerOptions::default());
        timeline.add_marker(1.0, "intro", MarkerOptions::default());
        timeline.add_region(6.0, 4.0, "bridge", None, IndexMap::new());
        timeline.add_region(0.0, 2.0, "intro", Some("#FF0000"), IndexMap::new());

        let labels: Vec<&str> = timeline.markers().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["intro", "drop"]);
        assert_eq!(timeline.regions()[1].start, 4.0);
        assert_eq!(timeline.regions_at(5.0).len(), 1);
    }
}
