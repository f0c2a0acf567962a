//! Step-over-step kink detection for charged pions.
//!
//! The angle is measured between the direction stored after the previous
//! step and the current post-step direction, so it is incremental rather
//! than cumulative along the track.

use crate::classifier::is_inelastic;
use crate::config::DeflectionConfig;
use photonsim_data::{StepCompleted, TrackRecord, TrackStatus, Vec3};

/// Slack on the angle comparison so that a kink of exactly the threshold,
/// reconstructed through `acos`, does not trigger.
pub const ANGLE_TOLERANCE_DEG: f64 = 1e-9;

/// Pre-step point of a detected deflection.
#[derive(Debug, Clone, PartialEq)]
pub struct Kink {
    pub angle_deg: f64,
    pub position: Vec3,
    pub time: f64,
    pub incoming_direction: Vec3,
}

#[derive(Debug, Clone)]
pub struct DeflectionMonitor {
    config: DeflectionConfig,
}

impl DeflectionMonitor {
    pub fn new(config: DeflectionConfig) -> Self {
        Self { config }
    }

    /// Whether the engine can leave a track alive after this process.
    pub fn is_kink_process(&self, process: &str) -> bool {
        !is_inelastic(process) && self.config.kink_processes.iter().any(|p| p == process)
    }

    pub fn exceeds_threshold(&self, angle_deg: f64) -> bool {
        angle_deg - self.config.angle_threshold_deg > ANGLE_TOLERANCE_DEG
    }

    /// Checks one step and refreshes the stored triplet to the post-step
    /// values, whatever the outcome.
    pub fn observe(&self, record: &mut TrackRecord, step: &StepCompleted) -> Option<Kink> {
        let pre_direction = record.last_direction;
        let pre_position = record.last_position;
        let pre_time = record.last_time;

        record.last_direction = step.post_step_direction;
        record.last_position = step.post_step_position;
        record.last_time = step.post_step_time;

        if !self.config.enabled
            || step.status == TrackStatus::Killed
            || !record.kind().is_charged_pion()
            || !self.is_kink_process(&step.step_process)
        {
            return None;
        }

        let angle_deg = pre_direction.angle_between_deg(&step.post_step_direction);
        self.exceeds_threshold(angle_deg).then_some(Kink {
            angle_deg,
            position: pre_position,
            time: pre_time,
            incoming_direction: pre_direction,
        })
    }
}
