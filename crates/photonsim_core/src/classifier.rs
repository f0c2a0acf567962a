//! Category rules, evaluated once per track at its first step.
//!
//! `classify` only decides; `apply` writes the decision into the registry
//! and draws the sub-ID. Rules are checked in order and the first match wins:
//!
//! | # | Category | Condition |
//! |---|---|---|
//! | 1 | Primary | no parent |
//! | 2 | DecayElectron | e± from `Decay`/`BoundDecayCapture` of mu± or pi±, above the energy cut |
//! | 3 | GammaShower | gamma from `Decay` of a pi0 |
//! | 4 | SecondaryPion | pi± from an inelastic interaction, a deflection split, or a categorized pi±, above the momentum cut |

use crate::config::ClassifierConfig;
use crate::genealogy::nearest_categorized_ancestor;
use crate::registry::TrackRegistry;
use photonsim_data::{Category, ParticleKind, TrackId, TrackRecord};

/// Prefix of the process tag carried by continuation tracks.
pub const DEFLECTION_PREFIX: &str = "Deflection_";

const DECAY_PROCESSES: [&str; 2] = ["Decay", "BoundDecayCapture"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub category_parent_track_id: TrackId,
}

impl Classification {
    fn uncategorized(record: &TrackRecord) -> Self {
        Self {
            category: Category::Uncategorized,
            category_parent_track_id: record.parent_track_id,
        }
    }
}

pub fn is_inelastic(process: &str) -> bool {
    process.to_ascii_lowercase().contains("inelastic")
}

pub fn is_deflection_continuation(process: &str) -> bool {
    process.contains("Deflection")
}

/// Decides the category of a freshly registered track.
pub fn classify(
    record: &TrackRecord,
    registry: &TrackRegistry,
    config: &ClassifierConfig,
    max_depth: usize,
) -> Classification {
    if record.is_root() {
        return Classification {
            category: Category::Primary,
            category_parent_track_id: record.parent_track_id,
        };
    }

    let kind = record.kind();
    let parent = registry.get(record.parent_track_id);
    let parent_kind = parent.map(TrackRecord::kind);
    let process = record.creation_process.as_str();

    if kind.is_electron_like()
        && DECAY_PROCESSES.contains(&process)
        && parent_kind.is_some_and(|k| k.is_muon() || k.is_charged_pion())
        && record.kinetic_energy > config.decay_electron_min_energy
    {
        return Classification {
            category: Category::DecayElectron,
            category_parent_track_id: record.parent_track_id,
        };
    }

    if kind == ParticleKind::Gamma
        && process == "Decay"
        && parent_kind == Some(ParticleKind::PionZero)
    {
        return Classification {
            category: Category::GammaShower,
            category_parent_track_id: record.parent_track_id,
        };
    }

    if kind.is_charged_pion() {
        let parent_is_categorized_pion =
            parent.is_some_and(|p| p.is_categorized() && p.kind().is_charged_pion());
        let eligible = is_inelastic(process)
            || is_deflection_continuation(process)
            || parent_is_categorized_pion;
        if eligible && record.momentum() >= config.secondary_pion_min_momentum {
            return Classification {
                category: Category::SecondaryPion,
                category_parent_track_id: nearest_categorized_ancestor(
                    registry,
                    record.parent_track_id,
                    max_depth,
                ),
            };
        }
    }

    Classification::uncategorized(record)
}

/// Writes `classification` into the record for `id`, drawing a sub-ID for
/// categorized tracks. Returns the sub-ID, or `None` for uncategorized or
/// unknown tracks.
pub fn apply(
    registry: &mut TrackRegistry,
    id: TrackId,
    classification: Classification,
) -> Option<i32> {
    if !registry.contains(id) {
        return None;
    }
    let sub_id = if classification.category.is_categorized() {
        registry.next_sub_id(classification.category)
    } else {
        -1
    };
    let record = registry.get_mut(id)?;
    record.category = classification.category;
    record.sub_id = sub_id;
    record.category_parent_track_id = classification.category_parent_track_id;
    (sub_id >= 0).then_some(sub_id)
}
