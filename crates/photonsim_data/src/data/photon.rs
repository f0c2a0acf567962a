use super::track::{Category, TrackId};
use super::vector::Vec3;
use serde::{Deserialize, Serialize};

/// One optical photon recorded at creation, with its resolved lineage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonRecord {
    pub position: Vec3,
    pub direction: Vec3,
    pub time: f64,
    pub wavelength: f64,
    pub creation_process: String,
    pub parent_track_id: TrackId,
    pub parent_particle: String,
    /// Categorized track the photon is attributed to, 0 when none was found.
    pub resolved_track_id: TrackId,
    pub category: Category,
    pub sub_id: i32,
    /// Categorized ancestors, root first.
    pub genealogy: Vec<TrackId>,
}

impl PhotonRecord {
    pub fn is_attributed(&self) -> bool {
        !self.genealogy.is_empty()
    }
}

/// Photons sharing one genealogy signature, in recording order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelGroup {
    pub genealogy: Vec<TrackId>,
    pub photon_indices: Vec<usize>,
}

impl LabelGroup {
    /// Track the label is named after: the last (innermost) genealogy entry.
    pub fn track_id(&self) -> TrackId {
        self.genealogy.last().copied().unwrap_or(0)
    }
}
