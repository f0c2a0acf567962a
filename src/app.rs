//! Offline replay of recorded engine streams.

use anyhow::{Context, Result};
use photonsim_core::{AppConfig, EventProcessor, ProcessingMetrics};
use photonsim_data::EngineEvent;
use photonsim_io::{EventRecord, EventStream, RunOutput};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "photonsim.toml";

/// Loads `path`, or writes and returns the defaults when it does not exist.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        return AppConfig::from_toml(&content)
            .with_context(|| format!("parsing config {}", path.display()));
    }

    let default = AppConfig::default();
    match toml::to_string(&default) {
        Ok(text) => {
            if let Err(e) = fs::write(path, text) {
                tracing::warn!(path = %path.display(), error = %e, "Could not write default config");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Could not serialize default config"),
    }
    Ok(default)
}

pub struct ReplayApp {
    config: AppConfig,
    metrics: Arc<ProcessingMetrics>,
}

impl ReplayApp {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let metrics = Arc::new(ProcessingMetrics::new(config.replay.log_interval));
        Ok(Self { config, metrics })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<ProcessingMetrics> {
        &self.metrics
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.config.replay.parallel = parallel;
    }

    /// Replays one event on a fresh processor.
    pub fn replay_event(&self, stream: &[EngineEvent]) -> EventRecord {
        let start = Instant::now();
        let mut processor = EventProcessor::new(self.config.clone());
        for event in stream {
            processor.handle(event);
        }
        let record = EventRecord::from_processor(&processor);
        self.metrics
            .record_event(record.event_id, processor.counts(), start.elapsed());
        tracing::debug!(
            event_id = record.event_id,
            photons = record.photons.len(),
            labels = record.labels.len(),
            "Event replayed"
        );
        record
    }

    /// Replays every event, keeping input order in the result.
    pub fn process_events(&self, streams: &[EventStream]) -> Vec<EventRecord> {
        if self.config.replay.parallel {
            streams.par_iter().map(|s| self.replay_event(s)).collect()
        } else {
            streams.iter().map(|s| self.replay_event(s)).collect()
        }
    }

    pub fn run(&self, streams: &[EventStream]) -> RunOutput {
        tracing::info!(
            events = streams.len(),
            parallel = self.config.replay.parallel,
            "Starting replay"
        );
        let events = self.process_events(streams);
        self.metrics.log_summary();
        RunOutput::new(self.config.fingerprint(), events)
    }
}
