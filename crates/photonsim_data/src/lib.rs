//! Plain data shared by the PhotonSim bookkeeping crates.
//!
//! Nothing in here mutates state on its own: the registry, classifier and
//! aggregator in `photonsim_core` own all behavior.

pub mod data;

pub use data::event::{EngineEvent, OpticalPhotonCreated, StepCompleted, TrackCreated};
pub use data::particle::ParticleKind;
pub use data::photon::{LabelGroup, PhotonRecord};
pub use data::track::{Category, TrackId, TrackRecord, TrackSeed, TrackStatus, ROOT_TRACK_ID};
pub use data::vector::Vec3;
