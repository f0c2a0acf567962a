use crate::classifier::DEFLECTION_PREFIX;
use crate::deflection::Kink;
use photonsim_data::{
    StepCompleted, TrackCreated, TrackId, TrackRecord, TrackSeed, TrackStatus, Vec3,
};

/// Raw materials for the track that continues a split trajectory.
///
/// The splitter never registers the continuation itself: whoever owns track
/// id allocation (the engine, or the replay driver) turns the seed into a
/// `TrackCreated` notification, and the continuation is then classified like
/// any other new track.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuationSeed {
    pub parent_track_id: TrackId,
    pub particle_name: String,
    pub pdg_code: i32,
    pub position: Vec3,
    pub direction: Vec3,
    pub kinetic_energy: f64,
    pub time: f64,
    pub creation_process: String,
    /// Status the old track had before it was killed by the split.
    pub status: TrackStatus,
}

impl ContinuationSeed {
    pub fn into_track_created(self, track_id: TrackId) -> TrackCreated {
        TrackCreated::from(TrackSeed {
            track_id,
            particle_name: self.particle_name,
            pdg_code: self.pdg_code,
            parent_track_id: self.parent_track_id,
            position: self.position,
            direction: self.direction,
            kinetic_energy: self.kinetic_energy,
            time: self.time,
            creation_process: self.creation_process,
        })
    }
}

/// Terminates `record` at the kink and seeds its continuation.
///
/// The old record is marked killed and flagged for relabeling with the kink
/// time as cutoff. The continuation starts at the pre-step point with the
/// post-step (deflected) direction and the post-step energy, falling back to
/// the old track's creation energy when the step carries none.
pub fn split(record: &mut TrackRecord, kink: &Kink, step: &StepCompleted) -> ContinuationSeed {
    let pre_split_status = match step.status {
        TrackStatus::Suspended => TrackStatus::Suspended,
        _ => TrackStatus::Alive,
    };

    record.status = TrackStatus::Killed;
    record.pending_relabel = true;
    record.relabel_cutoff_time = Some(kink.time);

    ContinuationSeed {
        parent_track_id: record.track_id,
        particle_name: record.particle_name.clone(),
        pdg_code: record.pdg_code,
        position: kink.position,
        direction: step.post_step_direction,
        kinetic_energy: step.post_step_kinetic_energy.unwrap_or(record.kinetic_energy),
        time: kink.time,
        creation_process: format!("{}{}", DEFLECTION_PREFIX, step.step_process),
        status: pre_split_status,
    }
}
