//! Event-scoped processing of engine notifications.
//!
//! One `EventProcessor` owns the registry and the photon labeler for the
//! event being transported. It is created by the caller and passed by
//! `&mut`; parallel replays create one per worker.

use crate::classifier::{self, Classification, DEFLECTION_PREFIX};
use crate::config::{AppConfig, RelabelPolicy};
use crate::deflection::DeflectionMonitor;
use crate::labels::PhotonLabeler;
use crate::metrics::EventCounts;
use crate::registry::TrackRegistry;
use crate::splitter::{self, ContinuationSeed};
use photonsim_data::{
    Category, EngineEvent, OpticalPhotonCreated, StepCompleted, TrackCreated, TrackId,
    TrackStatus,
};
use std::collections::HashMap;

/// Result of feeding one step to the processor.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Step recorded, track continues.
    Continued,
    /// Unknown or already terminated track.
    Ignored,
    /// The track was split; the caller must create the continuation.
    Split(ContinuationSeed),
    /// The track was split and the continuation was created locally.
    ContinuedAs(TrackId),
}

pub struct EventProcessor {
    config: AppConfig,
    registry: TrackRegistry,
    labeler: PhotonLabeler,
    monitor: DeflectionMonitor,
    event_id: i32,
    primary_energy: f64,
    counts: EventCounts,
    /// Split track -> (continuation, kink time).
    redirects: HashMap<TrackId, (TrackId, f64)>,
    next_synthetic_id: TrackId,
}

impl EventProcessor {
    pub fn new(config: AppConfig) -> Self {
        Self {
            registry: TrackRegistry::new(),
            labeler: PhotonLabeler::new(config.lineage.max_walk_depth),
            monitor: DeflectionMonitor::new(config.deflection.clone()),
            event_id: 0,
            primary_energy: 0.0,
            counts: EventCounts::default(),
            redirects: HashMap::new(),
            next_synthetic_id: config.replay.synthetic_track_id_base,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn labeler(&self) -> &PhotonLabeler {
        &self.labeler
    }

    pub fn event_id(&self) -> i32 {
        self.event_id
    }

    pub fn primary_energy(&self) -> f64 {
        self.primary_energy
    }

    pub fn counts(&self) -> EventCounts {
        self.counts
    }

    /// Starts a new event, dropping whatever the previous one left behind.
    pub fn begin_event(&mut self, event_id: i32, primary_energy: f64) {
        self.clear();
        self.event_id = event_id;
        self.primary_energy = primary_energy;
    }

    /// Empties all event-scoped state.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.labeler.clear();
        self.redirects.clear();
        self.counts = EventCounts::default();
        self.next_synthetic_id = self.config.replay.synthetic_track_id_base;
    }

    /// Follows redirects for a notification stamped at `time`. A hop is taken
    /// only when `time` is at or after that split's kink, so photons and
    /// children the old track produced earlier stay with it even when they
    /// are delivered late.
    fn redirected(&self, id: TrackId, time: f64) -> TrackId {
        let mut current = id;
        let mut hops = 0;
        while let Some(&(next, cutoff)) = self.redirects.get(&current) {
            if time < cutoff {
                break;
            }
            current = next;
            hops += 1;
            if hops >= self.config.lineage.max_walk_depth {
                break;
            }
        }
        current
    }

    /// Registers and classifies a track at its first step. Returns `None`
    /// when the id was already registered.
    pub fn on_track_created(&mut self, created: &TrackCreated) -> Option<Category> {
        if !self.registry.register(created.to_seed()) {
            tracing::trace!(track_id = created.track_id, "Duplicate track creation ignored");
            return None;
        }
        self.counts.tracks += 1;

        let classification = match self.registry.get(created.track_id) {
            Some(record) => classifier::classify(
                record,
                &self.registry,
                &self.config.classifier,
                self.config.lineage.max_walk_depth,
            ),
            None => return None,
        };
        if classifier::apply(&mut self.registry, created.track_id, classification).is_some() {
            self.counts.categorized_tracks += 1;
        }

        if created.creation_process.starts_with(DEFLECTION_PREFIX) {
            self.settle_relabel(created.parent_track_id, created.track_id);
        }

        Some(classification.category)
    }

    fn settle_relabel(&mut self, old: TrackId, new: TrackId) {
        let Some(parent) = self.registry.get_mut(old) else {
            return;
        };
        if !parent.pending_relabel {
            return;
        }
        let cutoff = parent.relabel_cutoff_time.unwrap_or(f64::NEG_INFINITY);
        parent.pending_relabel = false;

        if self.config.lineage.relabel_policy == RelabelPolicy::Retroactive {
            let moved = self.labeler.relabel(&self.registry, old, new, cutoff);
            self.counts.relabeled_photons += moved as u64;
            tracing::debug!(
                old_track = old,
                new_track = new,
                cutoff = cutoff,
                moved = moved,
                "Photons relabeled onto continuation"
            );
        }
    }

    /// Runs the deflection monitor on one step.
    pub fn on_step(&mut self, step: &StepCompleted) -> StepOutcome {
        let Some(record) = self.registry.get_mut(step.track_id) else {
            tracing::trace!(track_id = step.track_id, "Step for unregistered track");
            return StepOutcome::Ignored;
        };
        if record.is_terminated() {
            tracing::trace!(track_id = step.track_id, "Step for terminated track");
            return StepOutcome::Ignored;
        }
        self.counts.steps += 1;

        match self.monitor.observe(record, step) {
            Some(kink) => {
                let seed = splitter::split(record, &kink, step);
                self.counts.splits += 1;
                tracing::debug!(
                    track_id = step.track_id,
                    angle_deg = kink.angle_deg,
                    process = %step.step_process,
                    "Track split at kink"
                );
                StepOutcome::Split(seed)
            }
            None => {
                record.status = step.status;
                StepOutcome::Continued
            }
        }
    }

    /// Records an optical photon and returns its index in the event.
    pub fn on_photon(&mut self, photon: &OpticalPhotonCreated) -> usize {
        self.counts.photons += 1;
        self.labeler.record(&self.registry, photon)
    }

    /// Registers a continuation under a locally allocated id and routes later
    /// notifications for the split track to it.
    pub fn spawn_continuation(&mut self, seed: ContinuationSeed) -> TrackId {
        while self.registry.contains(self.next_synthetic_id) {
            self.next_synthetic_id += 1;
        }
        let id = self.next_synthetic_id;
        self.next_synthetic_id += 1;

        let old = seed.parent_track_id;
        let status = seed.status;
        let cutoff = seed.time;
        self.on_track_created(&seed.into_track_created(id));
        if let Some(record) = self.registry.get_mut(id) {
            record.status = status;
        }
        self.redirects.insert(old, (id, cutoff));
        id
    }

    /// Dispatches one engine notification.
    ///
    /// With `replay.auto_continue` set, splits are resolved locally. Later
    /// steps naming the split track go to the continuation; photons and
    /// children go there only when stamped at or after the kink.
    pub fn handle(&mut self, event: &EngineEvent) -> Option<StepOutcome> {
        let auto_continue = self.config.replay.auto_continue;
        match event {
            EngineEvent::EventBegin {
                event_id,
                primary_energy,
            } => {
                self.begin_event(*event_id, *primary_energy);
                None
            }
            EngineEvent::TrackCreated(created) => {
                if auto_continue && self.redirects.contains_key(&created.parent_track_id) {
                    let mut created = created.clone();
                    created.parent_track_id =
                        self.redirected(created.parent_track_id, created.time);
                    self.on_track_created(&created);
                } else {
                    self.on_track_created(created);
                }
                None
            }
            EngineEvent::StepCompleted(step) => {
                let outcome = if auto_continue && self.redirects.contains_key(&step.track_id) {
                    let mut step = step.clone();
                    step.track_id = self.redirected(step.track_id, f64::INFINITY);
                    self.on_step(&step)
                } else {
                    self.on_step(step)
                };
                match outcome {
                    StepOutcome::Split(seed) if auto_continue => {
                        Some(StepOutcome::ContinuedAs(self.spawn_continuation(seed)))
                    }
                    other => Some(other),
                }
            }
            EngineEvent::OpticalPhotonCreated(photon) => {
                if auto_continue && self.redirects.contains_key(&photon.parent_track_id) {
                    let mut photon = photon.clone();
                    photon.parent_track_id =
                        self.redirected(photon.parent_track_id, photon.time);
                    self.on_photon(&photon);
                } else {
                    self.on_photon(photon);
                }
                None
            }
            EngineEvent::EventBoundary => {
                self.clear();
                None
            }
        }
    }

    /// Classification the registry holds for `id`.
    pub fn classification(&self, id: TrackId) -> Option<Classification> {
        self.registry.get(id).map(|r| Classification {
            category: r.category,
            category_parent_track_id: r.category_parent_track_id,
        })
    }

    /// Current status of `id`, `None` for unknown tracks.
    pub fn status(&self, id: TrackId) -> Option<TrackStatus> {
        self.registry.get(id).map(|r| r.status)
    }
}
