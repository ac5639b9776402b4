// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe values and recursive interpolation.

use crate::error::{Result, TimelineError};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A host value that knows how to blend with another of its kind.
pub trait Lerp: fmt::Debug + Send + Sync {
    /// Blend towards `other` at `t`. `None` when `other` is not compatible,
    /// in which case the left value is held.
    fn lerp(&self, other: &dyn Lerp, t: f64) -> Option<Arc<dyn Lerp>>;

    /// Downcasting hook for `lerp` implementations
    fn as_any(&self) -> &dyn Any;

    /// Structural snapshot used for export and equality. Must not return
    /// [`Value::Object`].
    fn to_value(&self) -> Value;
}

/// Value stored in a keyframe
#[derive(Debug, Clone)]
pub enum Value {
    /// Scalar
    Number(f64),
    /// Ordered values, blended element-wise
    Sequence(Vec<Value>),
    /// Named values, blended over the left operand's keys
    Map(IndexMap<String, Value>),
    /// Text (held, never blended)
    Text(String),
    /// Flag (held, never blended)
    Bool(bool),
    /// Host object with its own blending
    Object(Arc<dyn Lerp>),
}

impl Value {
    /// Wrap a host object
    pub fn object(value: impl Lerp + 'static) -> Self {
        Self::Object(Arc::new(value))
    }

    /// Get as number if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as sequence if possible
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Get as map if possible
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Get as text if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Get a numeric sequence as a fixed-size array
    pub fn as_array<const N: usize>(&self) -> Option<[f64; N]> {
        let items = self.as_sequence()?;
        if items.len() != N {
            return None;
        }
        let mut out = [0.0; N];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item.as_number()?;
        }
        Some(out)
    }

    /// Map entry lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    /// Plain structural form: objects are replaced by their snapshot.
    pub fn to_plain(&self) -> Value {
        match self {
            Value::Object(obj) => obj.to_value(),
            Value::Sequence(items) => Value::Sequence(items.iter().map(Value::to_plain).collect()),
            Value::Map(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_plain()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                Arc::ptr_eq(a, b) || a.to_value() == b.to_value()
            }
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(v: [f64; N]) -> Self {
        Value::Sequence(v.iter().copied().map(Value::Number).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Sequence(v)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = TimelineError;

    fn try_from(raw: serde_json::Value) -> Result<Self> {
        match raw {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| TimelineError::UnsupportedValue(n.to_string())),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| Value::try_from(v).map(|v| (k, v)))
                .collect::<Result<IndexMap<_, _>>>()
                .map(Value::Map),
            serde_json::Value::Null => Err(TimelineError::UnsupportedValue("null".to_string())),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Number(v) => serializer.serialize_f64(*v),
            Value::Sequence(items) => serializer.collect_seq(items),
            Value::Map(map) => serializer.collect_map(map),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Object(obj) => obj.to_value().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(raw).map_err(D::Error::custom)
    }
}

/// Blend `a` towards `b` at `t`.
///
/// Numbers blend linearly, sequences element-wise, maps over the keys of
/// `a` (keys missing from `b` keep their value), objects through
/// [`Lerp::lerp`]. Anything else returns `a` unchanged.
pub fn interpolate_values(a: &Value, b: &Value, t: f64) -> Result<Value> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + (b - a) * t)),
        (Value::Sequence(left), Value::Sequence(right)) => {
            if left.len() != right.len() {
                return Err(TimelineError::SequenceLengthMismatch {
                    left: left.len(),
                    right: right.len(),
                });
            }
            left.iter()
                .zip(right)
                .map(|(l, r)| interpolate_values(l, r, t))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence)
        }
        (Value::Map(left), Value::Map(right)) => {
            let mut out = IndexMap::with_capacity(left.len());
            for (key, l) in left {
                let blended = match right.get(key) {
                    Some(r) => interpolate_values(l, r, t)?,
                    None => l.clone(),
                };
                out.insert(key.clone(), blended);
            }
            Ok(Value::Map(out))
        }
        (Value::Object(left), Value::Object(right)) => Ok(left
            .lerp(right.as_ref(), t)
            .map_or_else(|| a.clone(), Value::Object)),
        _ => Ok(a.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Rgb([f64; 3]);

    impl Lerp for Rgb {
        fn lerp(&self, other: &dyn Lerp, t: f64) -> Option<Arc<dyn Lerp>> {
            let other = other.as_any().downcast_ref::<Rgb>()?;
            let mut out = [0.0; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = self.0[i] + (other.0[i] - self.0[i]) * t;
            }
            Some(Arc::new(Rgb(out)))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn to_value(&self) -> Value {
            Value::from(self.0)
        }
    }

    #[derive(Debug)]
    struct Opaque;

    impl Lerp for Opaque {
        fn lerp(&self, _other: &dyn Lerp, _t: f64) -> Option<Arc<dyn Lerp>> {
            None
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn to_value(&self) -> Value {
            Value::from("opaque")
        }
    }

    #[test]
    fn test_numbers() {
        let v = interpolate_values(&Value::from(0.0), &Value::from(10.0), 0.25).unwrap();
        assert_eq!(v, Value::Number(2.5));
    }

    #[test]
    fn test_nested_sequences_and_maps() {
        let mut a = IndexMap::new();
        a.insert("position".to_string(), Value::from([0.0, 0.0, 0.0]));
        a.insert("label".to_string(), Value::from("start"));
        a.insert("only_left".to_string(), Value::from(7.0));
        let mut b = IndexMap::new();
        b.insert("position".to_string(), Value::from([2.0, 4.0, 6.0]));
        b.insert("label".to_string(), Value::from("end"));
        b.insert("only_right".to_string(), Value::from(1.0));

        let out = interpolate_values(&Value::Map(a), &Value::Map(b), 0.5).unwrap();
        assert_eq!(out.get("position"), Some(&Value::from([1.0, 2.0, 3.0])));
        assert_eq!(out.get("label"), Some(&Value::from("start")));
        assert_eq!(out.get("only_left"), Some(&Value::from(7.0)));
        assert!(out.get("only_right").is_none());
    }

    #[test]
    fn test_sequence_length_mismatch_is_an_error() {
        let err = interpolate_values(&Value::from([1.0, 2.0]), &Value::from([1.0]), 0.5)
            .unwrap_err();
        assert!(matches!(
            err,
            TimelineError::SequenceLengthMismatch { left: 2, right: 1 }
        ));
    }

    #[test]
    fn test_objects_delegate_to_lerp() {
        let a = Value::object(Rgb([0.0, 0.0, 0.0]));
        let b = Value::object(Rgb([1.0, 0.5, 0.0]));
        let out = interpolate_values(&a, &b, 0.5).unwrap();
        assert_eq!(out.to_plain(), Value::from([0.5, 0.25, 0.0]));

        let opaque = Value::object(Opaque);
        let held = interpolate_values(&opaque, &Value::object(Opaque), 0.5).unwrap();
        assert_eq!(held, opaque);
    }

    #[test]
    fn test_mismatched_kinds_hold_left() {
        let out = interpolate_values(&Value::from(3.0), &Value::from("x"), 0.9).unwrap();
        assert_eq!(out, Value::from(3.0));
        let out = interpolate_values(&Value::from(true), &Value::from(false), 0.9).unwrap();
        assert_eq!(out, Value::from(true));
    }

    #[test]
    fn test_json_conversion() {
        let raw = serde_json::json!({"a": [1, 2.5], "b": "text", "c": false});
        let value = Value::try_from(raw).unwrap();
        assert_eq!(value.get("a").and_then(Value::as_array::<2>), Some([1.0, 2.5]));
        assert_eq!(serde_json::to_value(&value).unwrap(), serde_json::json!({"a": [1.0, 2.5], "b": "text", "c": false}));
        assert!(Value::try_from(serde_json::Value::Null).is_err());
    }
}
