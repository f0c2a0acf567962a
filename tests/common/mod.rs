pub mod macros;

use photonsim_core::{AppConfig, EventProcessor};
use photonsim_data::{
    EngineEvent, OpticalPhotonCreated, ParticleKind, StepCompleted, TrackCreated, TrackId,
    TrackStatus, Vec3,
};
use photonsim_io::EventRecord;

/// PDG code for the particle names used in the scripts.
#[allow(dead_code)]
pub fn pdg_of(name: &str) -> i32 {
    match name {
        "e-" => 11,
        "e+" => -11,
        "mu-" => 13,
        "mu+" => -13,
        "pi+" => 211,
        "pi-" => -211,
        "pi0" => 111,
        "gamma" => 22,
        "proton" => 2212,
        "neutron" => 2112,
        _ => 0,
    }
}

/// Kinetic energy (MeV) giving `momentum` (MeV/c) for a named particle.
#[allow(dead_code)]
pub fn kinetic_for(name: &str, momentum: f64) -> f64 {
    ParticleKind::from_pdg(pdg_of(name), name).kinetic_from_momentum(momentum)
}

/// Unit vector in the x-z plane, `deg` degrees off the z axis.
#[allow(dead_code)]
pub fn tilted(deg: f64) -> Vec3 {
    let rad = deg.to_radians();
    Vec3::new(rad.sin(), 0.0, rad.cos())
}

/// Builds an engine notification stream in causal order.
#[allow(dead_code)]
pub struct EventScript {
    config: AppConfig,
    events: Vec<EngineEvent>,
    clock: f64,
}

#[allow(dead_code)]
impl EventScript {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            events: Vec::new(),
            clock: 0.0,
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn begin(mut self, event_id: i32, primary_energy: f64) -> Self {
        self.events.push(EngineEvent::EventBegin {
            event_id,
            primary_energy,
        });
        self
    }

    pub fn primary(self, id: TrackId, name: &str, kinetic_energy: f64) -> Self {
        self.track(id, 0, name, kinetic_energy, "Primary")
    }

    pub fn track(
        mut self,
        id: TrackId,
        parent: TrackId,
        name: &str,
        kinetic_energy: f64,
        process: &str,
    ) -> Self {
        self.events.push(EngineEvent::TrackCreated(TrackCreated {
            track_id: id,
            particle_name: name.to_string(),
            pdg_code: pdg_of(name),
            parent_track_id: parent,
            position: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, 1.0),
            kinetic_energy,
            time: self.clock,
            creation_process: process.to_string(),
        }));
        self
    }

    /// Advances the clock by 0.01 ns and steps `id` into `direction`.
    pub fn step(mut self, id: TrackId, direction: Vec3, process: &str) -> Self {
        self.clock += 0.01;
        self.events.push(EngineEvent::StepCompleted(StepCompleted {
            track_id: id,
            post_step_direction: direction,
            post_step_position: Vec3::new(0.0, 0.0, self.clock * 100.0),
            post_step_time: self.clock,
            post_step_kinetic_energy: Some(300.0),
            step_process: process.to_string(),
            status: TrackStatus::Alive,
        }));
        self
    }

    pub fn step_with_status(
        mut self,
        id: TrackId,
        direction: Vec3,
        process: &str,
        status: TrackStatus,
    ) -> Self {
        self = self.step(id, direction, process);
        if let Some(EngineEvent::StepCompleted(step)) = self.events.last_mut() {
            step.status = status;
        }
        self
    }

    /// Emits one Cherenkov photon from `parent` at the current clock.
    pub fn photon(mut self, parent: TrackId) -> Self {
        self.events
            .push(EngineEvent::OpticalPhotonCreated(OpticalPhotonCreated {
                position: Vec3::new(0.0, 0.0, self.clock * 100.0),
                direction: Vec3::new(1.0, 0.0, 0.0),
                time: self.clock,
                wavelength: 400.0,
                creation_process: "Cerenkov".to_string(),
                parent_track_id: parent,
            }));
        self
    }

    /// Emits a photon stamped at `time`, leaving the clock alone.
    pub fn photon_at(mut self, parent: TrackId, time: f64) -> Self {
        self = self.photon(parent);
        if let Some(EngineEvent::OpticalPhotonCreated(photon)) = self.events.last_mut() {
            photon.time = time;
        }
        self
    }

    pub fn photons(mut self, parent: TrackId, count: usize) -> Self {
        for _ in 0..count {
            self = self.photon(parent);
        }
        self
    }

    pub fn boundary(mut self) -> Self {
        self.events.push(EngineEvent::EventBoundary);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<EngineEvent> {
        self.events
    }

    /// Feeds every notification to a fresh processor.
    pub fn run(self) -> EventProcessor {
        let mut processor = EventProcessor::new(self.config);
        for event in &self.events {
            processor.handle(event);
        }
        processor
    }

    pub fn record(self) -> EventRecord {
        EventRecord::from_processor(&self.run())
    }
}
