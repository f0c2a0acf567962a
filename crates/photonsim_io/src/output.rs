//! Labelled per-event output.
//!
//! Field names and category codes follow what the label readers expect:
//! one entry per photon, one per exported track, and the genealogy grouping
//! that lets photons be stored compactly by label.

use photonsim_core::EventProcessor;
use photonsim_data::{Category, TrackId, TrackRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One optical photon as written to the output file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhotonOutput {
    pub position: [f64; 3],
    pub direction: [f64; 3],
    pub time: f64,
    pub wavelength: f64,
    pub process: String,
    pub parent_track_id: TrackId,
    pub parent_particle: String,
    pub category: i32,
    pub sub_id: i32,
    pub genealogy: Vec<TrackId>,
}

/// Track table row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackOutput {
    pub track_id: TrackId,
    pub category: i32,
    pub sub_id: i32,
    pub parent_track_id: TrackId,
    pub category_parent_track_id: TrackId,
    pub pdg: i32,
    pub particle_name: String,
    pub creation_process: String,
    /// Kinetic energy at creation, MeV.
    pub energy: f64,
    pub position: [f64; 3],
    pub direction: [f64; 3],
    pub time: f64,
}

impl From<&TrackRecord> for TrackOutput {
    fn from(r: &TrackRecord) -> Self {
        Self {
            track_id: r.track_id,
            category: r.category.code(),
            sub_id: r.sub_id,
            parent_track_id: r.parent_track_id,
            category_parent_track_id: r.category_parent_track_id,
            pdg: r.pdg_code,
            particle_name: r.particle_name.clone(),
            creation_process: r.creation_process.clone(),
            energy: r.kinetic_energy,
            position: r.position.as_array(),
            direction: r.direction.as_array(),
            time: r.time,
        }
    }
}

/// Photons sharing one genealogy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabelOutput {
    pub genealogy: Vec<TrackId>,
    pub category: i32,
    pub sub_id: i32,
    /// Innermost genealogy entry, 0 for unattributed photons.
    pub track_id: TrackId,
    pub photon_indices: Vec<usize>,
}

/// Per-event counts keyed by category code.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct EventSummary {
    pub photons_by_category: BTreeMap<i32, usize>,
    pub tracks_by_category: BTreeMap<i32, usize>,
    pub splits: u64,
    pub relabeled_photons: u64,
}

/// Labelled output of one event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub event_id: i32,
    /// MeV.
    pub primary_energy: f64,
    pub config_fingerprint: String,
    pub photons: Vec<PhotonOutput>,
    pub tracks: Vec<TrackOutput>,
    pub labels: Vec<LabelOutput>,
    pub summary: EventSummary,
}

impl EventRecord {
    /// Snapshots the current event of `processor`.
    pub fn from_processor(processor: &EventProcessor) -> Self {
        let registry = processor.registry();
        let labeler = processor.labeler();

        let photons: Vec<PhotonOutput> = labeler
            .photons()
            .iter()
            .map(|p| PhotonOutput {
                position: p.position.as_array(),
                direction: p.direction.as_array(),
                time: p.time,
                wavelength: p.wavelength,
                process: p.creation_process.clone(),
                parent_track_id: p.parent_track_id,
                parent_particle: p.parent_particle.clone(),
                category: p.category.code(),
                sub_id: p.sub_id,
                genealogy: p.genealogy.clone(),
            })
            .collect();

        // Categorized tracks plus the raw parents needed to rebuild chains.
        let mut exported: HashSet<TrackId> = HashSet::new();
        for record in registry.categorized() {
            exported.insert(record.track_id);
            exported.insert(record.parent_track_id);
        }
        let tracks: Vec<TrackOutput> = registry
            .iter()
            .filter(|r| exported.contains(&r.track_id))
            .map(TrackOutput::from)
            .collect();

        let labels: Vec<LabelOutput> = labeler
            .label_groups()
            .into_iter()
            .map(|group| {
                let track_id = group.track_id();
                let (category, sub_id) = registry
                    .get(track_id)
                    .filter(|r| r.is_categorized())
                    .map(|r| (r.category.code(), r.sub_id))
                    .unwrap_or((Category::Uncategorized.code(), -1));
                LabelOutput {
                    genealogy: group.genealogy,
                    category,
                    sub_id,
                    track_id,
                    photon_indices: group.photon_indices,
                }
            })
            .collect();

        let mut summary = EventSummary {
            splits: processor.counts().splits,
            relabeled_photons: processor.counts().relabeled_photons,
            ..Default::default()
        };
        for p in &photons {
            *summary.photons_by_category.entry(p.category).or_insert(0) += 1;
        }
        for category in Category::ALL {
            let count = registry.category_count(category);
            if count > 0 {
                summary.tracks_by_category.insert(category.code(), count);
            }
        }

        Self {
            event_id: processor.event_id(),
            primary_energy: processor.primary_energy(),
            config_fingerprint: processor.config().fingerprint(),
            photons,
            tracks,
            labels,
            summary,
        }
    }

    /// Photons attributed to no categorized track.
    pub fn unattributed_photons(&self) -> usize {
        self.photons.iter().filter(|p| p.genealogy.is_empty()).count()
    }
}

/// Everything written for one replay run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub generated_at: String,
    pub config_fingerprint: String,
    pub events: Vec<EventRecord>,
}

impl RunOutput {
    /// Stamps `events` with the current time and the config fingerprint.
    pub fn new(config_fingerprint: String, events: Vec<EventRecord>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            config_fingerprint,
            events,
        }
    }

    pub fn total_photons(&self) -> usize {
        self.events.iter().map(|e| e.photons.len()).sum()
    }
}
