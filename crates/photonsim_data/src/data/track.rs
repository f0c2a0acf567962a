use super::particle::ParticleKind;
use super::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Engine-assigned track identifier, unique within one event.
pub type TrackId = i32;

/// Parent id of tracks injected by the primary generator.
pub const ROOT_TRACK_ID: TrackId = 0;

/// Physical role of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Uncategorized,
    Primary,
    DecayElectron,
    SecondaryPion,
    GammaShower,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Primary,
        Category::DecayElectron,
        Category::SecondaryPion,
        Category::GammaShower,
    ];

    /// Numeric code used by the label readers.
    pub fn code(self) -> i32 {
        match self {
            Category::Uncategorized => -1,
            Category::Primary => 0,
            Category::DecayElectron => 1,
            Category::SecondaryPion => 2,
            Category::GammaShower => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Category::Uncategorized),
            0 => Some(Category::Primary),
            1 => Some(Category::DecayElectron),
            2 => Some(Category::SecondaryPion),
            3 => Some(Category::GammaShower),
            _ => None,
        }
    }

    pub fn is_categorized(self) -> bool {
        self != Category::Uncategorized
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Uncategorized => "Uncategorized",
            Category::Primary => "Primary",
            Category::DecayElectron => "DecayElectron",
            Category::SecondaryPion => "SecondaryPion",
            Category::GammaShower => "GammaShower",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrackStatus {
    #[default]
    Alive,
    Suspended,
    Killed,
}

/// Creation-time attributes handed to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSeed {
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

/// Per-track bookkeeping kept for the whole event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track_id: TrackId,
    pub particle_name: String,
    pub pdg_code: i32,
    pub parent_track_id: TrackId,
    pub category: Category,
    /// Sequential within the category for this event; -1 iff uncategorized.
    pub sub_id: i32,
    pub creation_process: String,
    pub position: Vec3,
    pub direction: Vec3,
    pub kinetic_energy: f64,
    pub time: f64,
    /// Nearest categorized ancestor, or the raw parent while uncategorized.
    pub category_parent_track_id: TrackId,
    pub last_direction: Vec3,
    pub last_position: Vec3,
    pub last_time: f64,
    pub status: TrackStatus,
    pub pending_relabel: bool,
    pub relabel_cutoff_time: Option<f64>,
}

impl TrackRecord {
    pub fn from_seed(seed: TrackSeed) -> Self {
        Self {
            track_id: seed.track_id,
            category: Category::Uncategorized,
            sub_id: -1,
            category_parent_track_id: seed.parent_track_id,
            last_direction: seed.direction,
            last_position: seed.position,
            last_time: seed.time,
            status: TrackStatus::Alive,
            pending_relabel: false,
            relabel_cutoff_time: None,
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

    pub fn kind(&self) -> ParticleKind {
        ParticleKind::from_pdg(self.pdg_code, &self.particle_name)
    }

    pub fn is_categorized(&self) -> bool {
        self.category.is_categorized()
    }

    pub fn is_root(&self) -> bool {
        self.parent_track_id == ROOT_TRACK_ID
    }

    pub fn momentum(&self) -> f64 {
        self.kind().momentum_from_kinetic(self.kinetic_energy)
    }

    pub fn is_terminated(&self) -> bool {
        self.status == TrackStatus::Killed
    }
}
