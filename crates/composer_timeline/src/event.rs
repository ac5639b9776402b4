// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed events and the queue that releases them.

use crate::error::CallbackError;
use crate::scene::Scene;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Create a new random event ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a callback sees about the event being fired
#[derive(Debug, Clone)]
pub struct EventContext {
    /// Event ID
    pub id: EventId,
    /// Event name
    pub name: String,
    /// Scheduled time
    pub time: f64,
    /// Playback cursor when fired
    pub current_time: f64,
    /// Event duration
    pub duration: f64,
}

/// Event callback
pub type EventCallback =
    Arc<dyn Fn(&mut dyn Scene, &EventContext) -> Result<(), CallbackError> + Send + Sync>;

/// Optional event metadata
#[derive(Debug, Clone, Default)]
pub struct EventOptions {
    /// Event name
    pub name: Option<String>,
    /// Duration in seconds
    pub duration: f64,
    /// Track the event is filed under
    pub track_name: Option<String>,
    /// Layer of that track
    pub layer_name: Option<String>,
    /// Tags for range queries
    pub tags: Vec<String>,
}

impl EventOptions {
    /// Name the event
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// File the event under a track
    pub fn on_track(mut self, layer: impl Into<String>, track: impl Into<String>) -> Self {
        self.layer_name = Some(layer.into());
        self.track_name = Some(track.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A callback scheduled at a time
#[derive(Clone)]
pub struct Event {
    /// Unique event ID
    pub id: EventId,
    /// Scheduled time
    pub time: f64,
    /// Callback
    pub callback: EventCallback,
    /// Event name
    pub name: String,
    /// Duration in seconds
    pub duration: f64,
    /// Track the event is filed under
    pub track_name: Option<String>,
    /// Layer of that track
    pub layer_name: Option<String>,
    /// Tags
    pub tags: Vec<String>,
    /// Disabled events are skipped but stay queued
    pub enabled: bool,
    /// Set once the event has fired
    pub consumed: bool,
}

impl Event {
    /// Create an event
    pub fn new(time: f64, callback: EventCallback, options: EventOptions) -> Self {
        let id = EventId::new();
        Self {
            id,
            time,
            callback,
            name: options.name.unwrap_or_else(|| format!("event_{}", id.0.simple())),
            duration: options.duration,
            track_name: options.track_name,
            layer_name: options.layer_name,
            tags: options.tags,
            enabled: true,
            consumed: false,
        }
    }

    /// Whether any of `tags` is on this event
    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.tags.iter().any(|t| t == tag))
    }

    /// Context handed to the callback
    pub fn context(&self, current_time: f64) -> EventContext {
        EventContext {
            id: self.id,
            name: self.name.clone(),
            time: self.time,
            current_time,
            duration: self.duration,
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id)
            .field("time", &self.time)
            .field("name", &self.name)
            .field("duration", &self.duration)
            .field("track_name", &self.track_name)
            .field("layer_name", &self.layer_name)
            .field("tags", &self.tags)
            .field("enabled", &self.enabled)
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}

/// Heap entry, ordered so the earliest time pops first and equal times pop
/// in insertion order.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    time: f64,
    sequence: u64,
    id: EventId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-priority queue of events plus the event storage.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    heap: BinaryHeap<QueueEntry>,
    events: IndexMap<EventId, Event>,
    sequences: IndexMap<EventId, u64>,
    next_sequence: u64,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Store and enqueue an event
    pub fn push(&mut self, event: Event) -> EventId {
        let id = event.id;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(QueueEntry {
            time: event.time,
            sequence,
            id,
        });
        self.sequences.insert(id, sequence);
        self.events.insert(id, event);
        id
    }

    /// Get an event
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Get a mutable event
    pub fn get_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.get_mut(&id)
    }

    /// Remove an event together with its queue entry.
    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let event = self.events.shift_remove(&id)?;
        self.sequences.shift_remove(&id);
        self.heap.retain(|entry| entry.id != id);
        Some(event)
    }

    /// All events in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are stored
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events still waiting to fire
    pub fn pending(&self) -> usize {
        self.events.values().filter(|e| !e.consumed).count()
    }

    /// Pop every enabled event due at `now`, mark it consumed and return the
    /// ids in firing order. Disabled due events go back on the queue.
    pub fn take_due(&mut self, now: f64) -> Vec<EventId> {
        let mut due = Vec::new();
        let mut deferred = Vec::new();

        while let Some(entry) = self.heap.peek().copied() {
            if entry.time > now {
                break;
            }
            self.heap.pop();

            let Some(event) = self.events.get_mut(&entry.id) else {
                continue;
            };
            if event.consumed {
                continue;
            }
            if !event.enabled {
                deferred.push(entry);
                continue;
            }
            event.consumed = true;
            due.push(entry.id);
        }

        self.heap.extend(deferred);
        due
    }

    /// Put every consumed event back on the queue. Returns how many were
    /// re-armed.
    pub fn rearm(&mut self) -> usize {
        let mut count = 0;
        for event in self.events.values_mut().filter(|e| e.consumed) {
            event.consumed = false;
            let sequence = self.sequences.get(&event.id).copied().unwrap_or(0);
            self.heap.push(QueueEntry {
                time: event.time,
                sequence,
                id: event.id,
            });
            count += 1;
        }
        count
    }

    /// Events with `start <= time <= end`, sorted by time. With `tags`, only
    /// events carrying at least one of them.
    pub fn in_range(&self, start: f64, end: f64, tags: Option<&[&str]>) -> Vec<&Event> {
        let mut found: Vec<&Event> = self
            .events
            .values()
            .filter(|e| e.time >= start && e.time <= end)
            .filter(|e| match tags {
                Some(tags) => e.has_any_tag(tags),
                None => true,
            })
            .collect();
        found.sort_by(|a, b| a.time.total_cmp(&b.time));
        found
    }
}
