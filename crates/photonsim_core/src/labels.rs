//! Photon attribution and genealogy grouping.

use crate::genealogy::{genealogy, is_raw_ancestor_or_self, nearest_categorized_ancestor};
use crate::registry::TrackRegistry;
use photonsim_data::{
    Category, LabelGroup, OpticalPhotonCreated, PhotonRecord, TrackId, ROOT_TRACK_ID,
};
use std::collections::{BTreeMap, HashMap};

/// Lineage resolved for one immediate parent.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedLineage {
    track_id: TrackId,
    genealogy: Vec<TrackId>,
}

/// Records optical photons with their genealogy and groups them by it.
#[derive(Debug, Clone)]
pub struct PhotonLabeler {
    photons: Vec<PhotonRecord>,
    groups: BTreeMap<Vec<TrackId>, Vec<usize>>,
    // Parents are fully classified before they emit, so a parent's lineage
    // never changes once resolved.
    cache: HashMap<TrackId, ResolvedLineage>,
    max_depth: usize,
}

impl PhotonLabeler {
    pub fn new(max_depth: usize) -> Self {
        Self {
            photons: Vec::new(),
            groups: BTreeMap::new(),
            cache: HashMap::new(),
            max_depth,
        }
    }

    fn resolve_uncached(&self, registry: &TrackRegistry, parent: TrackId) -> ResolvedLineage {
        let track_id = nearest_categorized_ancestor(registry, parent, self.max_depth);
        ResolvedLineage {
            track_id,
            genealogy: genealogy(registry, track_id, self.max_depth),
        }
    }

    fn resolve(&mut self, registry: &TrackRegistry, parent: TrackId) -> ResolvedLineage {
        if let Some(hit) = self.cache.get(&parent) {
            return hit.clone();
        }
        let resolved = self.resolve_uncached(registry, parent);
        if registry.contains(parent) {
            self.cache.insert(parent, resolved.clone());
        }
        resolved
    }

    /// Stores a newly created photon and returns its index in the event.
    pub fn record(&mut self, registry: &TrackRegistry, photon: &OpticalPhotonCreated) -> usize {
        let parent = photon.parent_track_id;
        let lineage = self.resolve(registry, parent);
        let (category, sub_id) = category_of(registry, lineage.track_id);

        let parent_particle = if parent == ROOT_TRACK_ID {
            "Primary".to_string()
        } else {
            registry
                .get(parent)
                .map(|r| r.particle_name.clone())
                .unwrap_or_else(|| format!("Secondary_ID_{parent}"))
        };

        let index = self.photons.len();
        self.groups
            .entry(lineage.genealogy.clone())
            .or_default()
            .push(index);
        self.photons.push(PhotonRecord {
            position: photon.position,
            direction: photon.direction,
            time: photon.time,
            wavelength: photon.wavelength,
            creation_process: photon.creation_process.clone(),
            parent_track_id: parent,
            parent_particle,
            resolved_track_id: lineage.track_id,
            category,
            sub_id,
            genealogy: lineage.genealogy,
        });
        index
    }

    /// Moves photons emitted at or after `cutoff` and attributed to the split
    /// track `old` onto its continuation `new`.
    ///
    /// Only photons whose nearest categorized ancestor is `old` move; photons
    /// of categorized descendants keep their lineage, whose category parent
    /// is still `old`. Returns the number of reassigned photons.
    pub fn relabel(
        &mut self,
        registry: &TrackRegistry,
        old: TrackId,
        new: TrackId,
        cutoff: f64,
    ) -> usize {
        let replacement = self.resolve_uncached(registry, new);
        if replacement.track_id == old {
            return 0;
        }
        let (category, sub_id) = category_of(registry, replacement.track_id);
        let mut moved = 0;

        for photon in &mut self.photons {
            if photon.time < cutoff
                || photon.resolved_track_id != old
                || !is_raw_ancestor_or_self(registry, photon.parent_track_id, old, self.max_depth)
            {
                continue;
            }
            photon.genealogy = replacement.genealogy.clone();
            photon.resolved_track_id = replacement.track_id;
            photon.category = category;
            photon.sub_id = sub_id;
            moved += 1;
        }

        if moved > 0 {
            self.rebuild_groups();
        }
        moved
    }

    fn rebuild_groups(&mut self) {
        self.groups.clear();
        for (index, photon) in self.photons.iter().enumerate() {
            self.groups
                .entry(photon.genealogy.clone())
                .or_default()
                .push(index);
        }
    }

    pub fn photons(&self) -> &[PhotonRecord] {
        &self.photons
    }

    pub fn len(&self) -> usize {
        self.photons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photons.is_empty()
    }

    /// Photon indices sharing `genealogy`, in recording order.
    pub fn group(&self, genealogy: &[TrackId]) -> Option<&[usize]> {
        self.groups.get(genealogy).map(Vec::as_slice)
    }

    /// All groups, ordered by their first photon.
    pub fn label_groups(&self) -> Vec<LabelGroup> {
        let mut groups: Vec<LabelGroup> = self
            .groups
            .iter()
            .map(|(genealogy, indices)| LabelGroup {
                genealogy: genealogy.clone(),
                photon_indices: indices.clone(),
            })
            .collect();
        groups.sort_by_key(|g| g.photon_indices.first().copied().unwrap_or(usize::MAX));
        groups
    }

    pub fn clear(&mut self) {
        self.photons.clear();
        self.groups.clear();
        self.cache.clear();
    }
}

fn category_of(registry: &TrackRegistry, id: TrackId) -> (Category, i32) {
    registry
        .get(id)
        .filter(|r| r.is_categorized())
        .map(|r| (r.category, r.sub_id))
        .unwrap_or((Category::Uncategorized, -1))
}
