// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host scene boundary.

/// The host scene the timeline drives.
///
/// Events and playback callbacks receive the scene as `&mut dyn Scene`. Every
/// hook has a no-op default so hosts only implement what they render.
pub trait Scene {
    /// Shake the active camera
    fn camera_shake(&mut self, intensity: f64, frequency: f64, duration: f64) {
        let _ = (intensity, frequency, duration);
    }
}

/// Headless playback
impl Scene for () {}
