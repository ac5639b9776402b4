// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback cursor, event firing and looping.

use crate::event::EventId;
use crate::scene::Scene;
use crate::timeline::ComposerTimeline;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Stopped at the start or finished
    #[default]
    Idle,
    /// Playing forward
    Playing,
    /// Paused
    Paused,
}

/// A range the cursor wraps inside while playing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopRange {
    /// Whether looping is on
    pub enabled: bool,
    /// Loop start
    pub start: f64,
    /// Loop end
    pub end: f64,
}

impl LoopRange {
    /// An enabled loop over `[start, end]`
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            enabled: true,
            start,
            end,
        }
    }

    /// Whether the cursor should wrap
    pub fn is_active(&self) -> bool {
        self.enabled && self.end > self.start
    }

    /// Length of the range
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Wrap a time that ran past the end back into the range
    pub fn wrap(&self, time: f64) -> f64 {
        if !self.is_active() || time < self.end {
            return time;
        }
        self.start + (time - self.end) % self.length()
    }
}

impl ComposerTimeline {
    /// Current cursor time
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the timeline is playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Playback speed multiplier
    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }

    /// Set the playback speed multiplier, never below zero
    pub fn set_playback_speed(&mut self, speed: f64) {
        self.playback_speed = if speed.is_finite() { speed.max(0.0) } else { 1.0 };
    }

    /// Loop range
    pub fn loop_range(&self) -> LoopRange {
        self.loop_range
    }

    /// Loop between `start` and `end`, clamped to the timeline
    pub fn set_loop(&mut self, start: f64, end: f64) {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        self.loop_range = LoopRange::new(start.clamp(0.0, self.duration), end.clamp(0.0, self.duration));
    }

    /// Turn looping off
    pub fn clear_loop(&mut self) {
        self.loop_range.enabled = false;
    }

    /// Frame number containing `time`
    pub fn time_to_frame(&self, time: f64) -> u64 {
        (time.max(0.0) * self.fps).floor() as u64
    }

    /// Start time of a frame
    pub fn frame_to_time(&self, frame: u64) -> f64 {
        frame as f64 / self.fps
    }

    /// Move the cursor to `time`, clamped to the timeline.
    ///
    /// Time callbacks registered within one frame of the target fire. Events
    /// are untouched: seeking backward does not re-arm consumed events.
    pub fn seek(&mut self, time: f64) {
        let time = time.clamp(0.0, self.duration);
        self.current_time = time;
        tracing::debug!("Seek to {:.3}s", time);

        let tolerance = 1.0 / self.fps;
        let callbacks: Vec<_> = self
            .time_callbacks
            .iter()
            .filter(|(at, _)| (at - time).abs() < tolerance)
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(time))) {
                tracing::error!("Time callback panicked: {}", panic_message(&*payload));
            }
        }
    }

    /// Start playing from the cursor and fire every event that is due.
    ///
    /// A cursor at or past the end restarts from zero. Returns the number of
    /// events executed.
    pub fn play(&mut self, scene: &mut dyn Scene) -> usize {
        if self.current_time >= self.duration {
            self.current_time = 0.0;
        }
        self.state = PlaybackState::Playing;
        let fired = self.fire_due_events(scene);
        self.run_playback_callbacks(scene);
        fired
    }

    /// Pause, keeping the cursor
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop and rewind to zero. Consumed events stay consumed.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
        self.current_time = 0.0;
    }

    /// Advance a playing timeline by `delta_time` seconds of host time.
    ///
    /// The cursor moves by `delta_time * playback_speed`, wrapping inside an
    /// active loop range. Without a loop the cursor stops at the end and the
    /// timeline goes idle. Returns the number of events executed.
    pub fn update(&mut self, delta_time: f64, scene: &mut dyn Scene) -> usize {
        if self.state != PlaybackState::Playing {
            return 0;
        }

        let mut time = self.current_time + delta_time.max(0.0) * self.playback_speed;
        let mut finished = false;
        if self.loop_range.is_active() && self.current_time < self.loop_range.end {
            time = self.loop_range.wrap(time);
        } else if time >= self.duration {
            time = self.duration;
            finished = true;
        }
        self.current_time = time;

        let fired = self.fire_due_events(scene);
        self.run_playback_callbacks(scene);
        if finished {
            self.state = PlaybackState::Idle;
            tracing::debug!("Playback finished at {:.3}s", time);
        }
        fired
    }

    /// Put every consumed event back on the queue so it can fire again.
    pub fn rearm_events(&mut self) -> usize {
        let count = self.events.rearm();
        tracing::debug!("Re-armed {} events", count);
        count
    }

    /// Number of events still waiting to fire
    pub fn pending_events(&self) -> usize {
        self.events.pending()
    }

    fn fire_due_events(&mut self, scene: &mut dyn Scene) -> usize {
        let due: Vec<EventId> = self.events.take_due(self.current_time);
        let mut executed = 0;
        for id in due {
            let Some(event) = self.events.get(id) else {
                continue;
            };
            let callback = event.callback.clone();
            let context = event.context(self.current_time);
            executed += 1;

            match panic::catch_unwind(AssertUnwindSafe(|| callback(&mut *scene, &context))) {
                Ok(Ok(())) => {
                    tracing::debug!("Fired event '{}' at {:.3}s", context.name, context.time);
                }
                Ok(Err(err)) => {
                    tracing::error!("Event '{}' failed: {}", context.name, err);
                }
                Err(payload) => {
                    tracing::error!(
                        "Event '{}' panicked: {}",
                        context.name,
                        panic_message(&*payload)
                    );
                }
            }
        }
        executed
    }

    fn run_playback_callbacks(&mut self, scene: &mut dyn Scene) {
        let time = self.current_time;
        for callback in self.playback_callbacks.clone() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(&mut *scene, time))) {
                tracing::error!("Playback callback panicked: {}", panic_message(&*payload));
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
