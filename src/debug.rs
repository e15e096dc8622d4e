/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * to be displayed in the UI and the debug overlay.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Simulation steps run during the last frame and the time they took
 * - Particle count and total steps
 */

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub steps_per_frame: usize,
    pub step_time: Duration,
    pub particle_count: usize,
    pub total_steps: u64,
}

impl DebugInfo {
    // Lines shown by the on-screen overlay
    pub fn overlay_lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Steps this frame: {}", self.steps_per_frame),
            format!("Step time: {:.2} ms", self.step_time.as_secs_f64() * 1000.0),
            format!("Particles: {}", self.particle_count),
            format!("Total steps: {}", self.total_steps),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_formats_metrics() {
        let info = DebugInfo {
            fps: 119.96,
            frame_time: Duration::from_micros(8_333),
            steps_per_frame: 1,
            step_time: Duration::from_micros(1_500),
            particle_count: 1500,
            total_steps: 42,
        };
        let lines = info.overlay_lines();
        assert_eq!(lines[0], "FPS: 120.0");
        assert_eq!(lines[1], "Frame time: 8.33 ms");
        assert_eq!(lines[3], "Step time: 1.50 ms");
        assert_eq!(lines[4], "Particles: 1500");
        assert_eq!(lines[5], "Total steps: 42");
    }
}
