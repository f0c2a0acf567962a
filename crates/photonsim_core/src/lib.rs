//! # PhotonSim Core
//!
//! Track genealogy and photon provenance bookkeeping for optical photons
//! produced inside a transport engine.
//!
//! The engine reports track creations, steps and optical photons in causal
//! order. This crate:
//! - keeps an event-scoped registry of every track
//! - assigns each track a physical category once, at its first step
//! - splits charged pion tracks at large in-flight deflections
//! - attaches an ordered genealogy of categorized ancestors to every photon
//!
//! ## Example
//!
//! ```
//! use photonsim_core::{AppConfig, EventProcessor};
//! use photonsim_data::{Category, OpticalPhotonCreated, TrackCreated, Vec3};
//!
//! let mut processor = EventProcessor::new(AppConfig::default());
//! processor.begin_event(0, 1000.0);
//! processor.on_track_created(&TrackCreated {
//!     track_id: 1,
//!     particle_name: "mu-".to_string(),
//!     pdg_code: 13,
//!     parent_track_id: 0,
//!     position: Vec3::ZERO,
//!     direction: Vec3::new(0.0, 0.0, 1.0),
//!     kinetic_energy: 1000.0,
//!     time: 0.0,
//!     creation_process: "Primary".to_string(),
//! });
//! let index = processor.on_photon(&OpticalPhotonCreated {
//!     position: Vec3::ZERO,
//!     direction: Vec3::new(1.0, 0.0, 0.0),
//!     time: 0.1,
//!     wavelength: 400.0,
//!     creation_process: "Cerenkov".to_string(),
//!     parent_track_id: 1,
//! });
//! let photon = &processor.labeler().photons()[index];
//! assert_eq!(photon.genealogy, vec![1]);
//! assert_eq!(photon.category, Category::Primary);
//! ```

/// Category rules applied at a track's first step
pub mod classifier;
/// Configuration loaded from `photonsim.toml`
pub mod config;
/// Step-over-step kink detection for charged pions
pub mod deflection;
/// Ancestry walks and genealogy construction
pub mod genealogy;
/// Photon attribution, genealogy grouping and relabeling
pub mod labels;
/// Event-scoped dispatch of engine notifications
pub mod lifecycle;
/// Run-wide counters and logging setup
pub mod metrics;
/// Append-only store of per-track records
pub mod registry;
/// Termination of deflected tracks and continuation seeding
pub mod splitter;

pub use config::{AppConfig, RelabelPolicy};
pub use lifecycle::{EventProcessor, StepOutcome};
pub use metrics::{init_logging, EventCounts, ProcessingMetrics};
pub use registry::TrackRegistry;
