// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON document export and import.
//!
//! Only `time`, `value` and `interpolation` of each keyframe are written.
//! Bezier points, spring constants, easing parameters, rate-function
//! overrides and every callback are left out of the document.

use crate::error::Result;
use crate::interpolation::InterpolationKind;
use crate::keyframe::Keyframe;
use crate::layer::LayerTransform;
use crate::marker::{Marker, Region};
use crate::timeline::ComposerTimeline;
use crate::track::TrackType;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
struct TimelineDocument {
    duration: f64,
    fps: f64,
    #[serde(default)]
    layers: Vec<LayerDocument>,
    #[serde(default)]
    markers: Vec<Marker>,
    #[serde(default)]
    regions: Vec<Region>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayerDocument {
    name: String,
    #[serde(default = "enabled")]
    visible: bool,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    solo: bool,
    #[serde(default)]
    z_index: i32,
    #[serde(default)]
    parent_layer: Option<String>,
    #[serde(default)]
    transform: LayerTransform,
    #[serde(default)]
    tracks: Vec<TrackDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TrackDocument {
    name: String,
    #[serde(rename = "type", default)]
    track_type: TrackType,
    #[serde(default = "enabled")]
    enabled: bool,
    #[serde(default)]
    keyframes: IndexMap<String, Vec<KeyframeDocument>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeyframeDocument {
    time: f64,
    value: Value,
    #[serde(default)]
    interpolation: InterpolationKind,
}

impl ComposerTimeline {
    fn to_document(&self) -> TimelineDocument {
        let layers = self
            .layers()
            .into_iter()
            .map(|layer| LayerDocument {
                name: layer.name.clone(),
                visible: layer.visible,
                locked: layer.locked,
                solo: layer.solo,
                z_index: layer.z_index,
                parent_layer: layer.parent_layer.clone(),
                transform: layer.transform,
                tracks: layer
                    .tracks()
                    .iter()
                    .map(|track| TrackDocument {
                        name: track.name.clone(),
                        track_type: track.track_type,
                        enabled: track.enabled,
                        keyframes: track
                            .keyframes_by_property()
                            .iter()
                            .map(|(property, keyframes)| {
                                let keyframes = keyframes
                                    .iter()
                                    .map(|kf| KeyframeDocument {
                                        time: kf.time,
                                        value: kf.value.to_plain(),
                                        interpolation: kf.interpolation.clone(),
                                    })
                                    .collect();
                                (property.clone(), keyframes)
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        TimelineDocument {
            duration: self.duration,
            fps: self.fps,
            layers,
            markers: self.markers().to_vec(),
            regions: self.regions().to_vec(),
        }
    }

    fn from_document(document: TimelineDocument) -> Self {
        let mut timeline = ComposerTimeline::empty(document.duration, document.fps);

        for layer_doc in document.layers {
            let layer = timeline.add_layer(
                &layer_doc.name,
                &[],
                layer_doc.z_index,
                layer_doc.parent_layer.as_deref(),
            );
            layer.visible = layer_doc.visible;
            layer.locked = layer_doc.locked;
            layer.solo = layer_doc.solo;
            layer.transform = layer_doc.transform;

            for track_doc in layer_doc.tracks {
                let track = layer.add_track(track_doc.name, track_doc.track_type);
                track.enabled = track_doc.enabled;
                for (property, keyframes) in track_doc.keyframes {
                    for kf in keyframes {
                        track.add_keyframe(
                            property.as_str(),
                            Keyframe::new(kf.time, kf.value).with_interpolation(kf.interpolation),
                        );
                    }
                }
            }
        }

        for marker in document.markers {
            timeline.push_marker(marker);
        }
        for region in document.regions {
            timeline.push_region(region);
        }
        timeline
    }

    /// Serialize layers, tracks, keyframes, markers and regions to JSON
    pub fn export_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Build a timeline from a JSON document. Only the document's layers
    /// are created.
    pub fn import_from_json(json: &str) -> Result<Self> {
        let document: TimelineDocument = serde_json::from_str(json)?;
        tracing::debug!(
            "Imported timeline with {} layers, {} markers, {} regions",
            document.layers.len(),
            document.markers.len(),
            document.regions.len()
        );
        Ok(Self::from_document(document))
    }

    /// Write the JSON document to a file
    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.export_to_json()?)?;
        Ok(())
    }

    /// Read a timeline from a JSON file
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::import_from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimelineError;
    use crate::marker::MarkerOptions;
    use crate::timeline::KeyframeOptions;
    use crate::value::Lerp;
    use composer_easing::EasingKind;
    use std::any::Any;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Color([f64; 3]);

    impl Lerp for Color {
        fn lerp(&self, _other: &dyn Lerp, _t: f64) -> Option<Arc<dyn Lerp>> {
            None
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn to_value(&self) -> Value {
            Value::from(self.0)
        }
    }

    fn triples(timeline: &ComposerTimeline) -> Vec<(String, String, String, f64, Value, String)> {
        let mut out = Vec::new();
        for layer in timeline.layers() {
            for track in layer.tracks() {
                for (property, keyframes) in track.keyframes_by_property() {
                    for kf in keyframes {
                        out.push((
                            layer.name.clone(),
                            track.name.clone(),
                            property.clone(),
                            kf.time,
                            kf.value.to_plain(),
                            kf.interpolation.name().to_string(),
                        ));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_round_trip() {
        let mut timeline = ComposerTimeline::new(12.25, 24.0);
        let third = 1.0 / 3.0;
        let opts = KeyframeOptions::default;
        timeline.add_keyframe("Main", "main", "x", 0.1 + 0.2, third, "linear", opts());
        timeline.add_keyframe("Main", "main", "x", 2.0, 1e-17, EasingKind::EaseOutBounce, opts());
        timeline.add_keyframe("Main", "main", "label", 0.0, "hello", "step", opts());
        timeline.add_keyframe("Effects", "main", "tint", 1.0, [0.5, 0.25, 0.125], "material_standard", opts());
        timeline.add_keyframe("Camera", "movement", "zoom", 0.5, 2.0, "rush_in", opts());
        timeline.move_layer_to_top("Background");
        timeline.add_marker(3.0, "beat", MarkerOptions::default());
        timeline.add_region(1.0, 2.0, "intro", None, IndexMap::new());

        let json = timeline.export_to_json().unwrap();
        let restored = ComposerTimeline::import_from_json(&json).unwrap();

        assert_eq!(restored.duration(), 12.25);
        assert_eq!(restored.fps(), 24.0);
        assert_eq!(restored.layer_names(), timeline.layer_names());
        let z = |t: &ComposerTimeline| t.layers().iter().map(|l| l.z_index).collect::<Vec<_>>();
        assert_eq!(z(&restored), z(&timeline));
        assert_eq!(triples(&restored), triples(&timeline));
        assert_eq!(restored.markers(), timeline.markers());
        assert_eq!(restored.regions(), timeline.regions());
    }

    #[test]
    fn test_document_keys() {
        let mut timeline = ComposerTimeline::empty(5.0, 30.0);
        timeline.add_layer("child", &["main"], 3, Some("root"));
        let json: serde_json::Value = serde_json::from_str(&timeline.export_to_json().unwrap()).unwrap();
        let layer = &json["layers"][0];
        assert_eq!(layer["zIndex"], 3);
        assert_eq!(layer["parentLayer"], "root");
        assert_eq!(layer["tracks"][0]["type"], "animation");
        assert_eq!(layer["transform"]["scale"], 1.0);
    }

    #[test]
    fn test_import_builds_only_document_layers() {
        let json = serde_json::json!({
            "duration": 4.0,
            "fps": 30.0,
            "layers": [{
                "name": "Solo",
                "zIndex": 7,
                "futureField": true,
                "tracks": [{
                    "name": "main",
                    "type": "effect",
                    "keyframes": {
                        "x": [
                            {"time": 0.0, "value": 0.0, "interpolation": "some_future_curve"},
                            {"time": 1.0, "value": 4.0, "interpolation": "linear"}
                        ]
                    }
                }]
            }]
        });
        let timeline = ComposerTimeline::import_from_json(&json.to_string()).unwrap();
        assert_eq!(timeline.layer_names(), vec!["Solo"]);
        let track = timeline.track("Solo", "main").unwrap();
        assert_eq!(track.track_type, TrackType::Effect);
        assert_eq!(
            track.keyframes("x")[0].interpolation,
            InterpolationKind::Named("some_future_curve".to_string())
        );
        let v = timeline.value_at("Solo", "main", "x", 0.5).unwrap().unwrap();
        assert_eq!(v.as_number(), Some(2.0));
    }

    #[test]
    fn test_objects_export_as_snapshot() {
        let mut timeline = ComposerTimeline::new(5.0, 30.0);
        timeline.add_keyframe(
            "Main",
            "main",
            "color",
            0.0,
            Value::object(Color([1.0, 0.0, 0.5])),
            "linear",
            KeyframeOptions::default(),
        );
        let restored = ComposerTimeline::import_from_json(&timeline.export_to_json().unwrap()).unwrap();
        let value = restored.value_at("Main", "main", "color", 0.0).unwrap();
        assert_eq!(value, Some(Value::from([1.0, 0.0, 0.5])));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            ComposerTimeline::import_from_json("{"),
            Err(TimelineError::Json(_))
        ));
        let null_value = r#"{"duration": 1, "fps": 30, "layers": [{"name": "L", "tracks": [
            {"name": "t", "keyframes": {"x": [{"time": 0, "value": null}]}}]}]}"#;
        assert!(ComposerTimeline::import_from_json(null_value).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "composer_timeline_{}.json",
            uuid::Uuid::new_v4().simple()
        ));
        let mut timeline = ComposerTimeline::new(3.0, 30.0);
        timeline.add_keyframe("Main", "main", "x", 1.0, 2.0, "linear", KeyframeOptions::default());
        timeline.save_json(&path).unwrap();
        let loaded = ComposerTimeline::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(triples(&loaded), triples(&timeline));
    }
}
