//! Notifications delivered by the transport engine, in causal order.

use super::track::{TrackId, TrackSeed, TrackStatus};
use super::vector::Vec3;
use serde::{Deserialize, Serialize};

/// A track's first step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackCreated {
    pub track_id: TrackId,
    pub particle_name: String,
    pub pdg_code: i32,
    pub parent_track_id: TrackId,
    pub position: Vec3,
    pub direction: Vec3,
    pub kinetic_energy: f64,
    pub time: f64,
    pub creation_process: String,
}

impl TrackCreated {
    pub fn to_seed(&self) -> TrackSeed {
        TrackSeed {
            track_id: self.track_id,
            particle_name: self.particle_name.clone(),
            pdg_code: self.pdg_code,
            parent_track_id: self.parent_track_id,
            position: self.position,
            direction: self.direction,
            kinetic_energy: self.kinetic_energy,
            time: self.time,
            creation_process: self.creation_process.clone(),
        }
    }
}

impl From<TrackSeed> for TrackCreated {
    fn from(seed: TrackSeed) -> Self {
        Self {
            track_id: seed.track_id,
            particle_name: seed.particle_name,
            pdg_code: seed.pdg_code,
            parent_track_id: seed.parent_track_id,
            position: seed.position,
            direction: seed.direction,
            kinetic_energy: seed.kinetic_energy,
            time: seed.time,
            creation_process: seed.creation_process,
        }
    }
}

/// Any step after the creation point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCompleted {
    pub track_id: TrackId,
    pub post_step_direction: Vec3,
    pub post_step_position: Vec3,
    pub post_step_time: f64,
    /// Absent when the engine does not report it; the continuation of a
    /// split then keeps the track's creation energy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_step_kinetic_energy: Option<f64>,
    pub step_process: String,
    pub status: TrackStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalPhotonCreated {
    pub position: Vec3,
    pub direction: Vec3,
    pub time: f64,
    pub wavelength: f64,
    pub creation_process: String,
    pub parent_track_id: TrackId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    EventBegin { event_id: i32, primary_energy: f64 },
    TrackCreated(TrackCreated),
    StepCompleted(StepCompleted),
    OpticalPhotonCreated(OpticalPhotonCreated),
    EventBoundary,
}
