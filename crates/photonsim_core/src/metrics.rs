//! Processing counters and logging setup.
//!
//! The counters are atomics so that one `ProcessingMetrics` can be shared by
//! every worker of a parallel replay, while each worker keeps its own
//! event-scoped processor.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Run-wide counters for the genealogy layer.
pub struct ProcessingMetrics {
    events: AtomicU64,
    tracks: AtomicU64,
    categorized_tracks: AtomicU64,
    steps: AtomicU64,
    splits: AtomicU64,
    photons: AtomicU64,
    relabeled_photons: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for ProcessingMetrics {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Per-event tallies folded into the run-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub tracks: u64,
    pub categorized_tracks: u64,
    pub steps: u64,
    pub splits: u64,
    pub photons: u64,
    pub relabeled_photons: u64,
}

impl ProcessingMetrics {
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            events: AtomicU64::new(0),
            tracks: AtomicU64::new(0),
            categorized_tracks: AtomicU64::new(0),
            steps: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            photons: AtomicU64::new(0),
            relabeled_photons: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a finished event.
    pub fn record_event(&self, event_id: i32, counts: EventCounts, duration: Duration) {
        self.tracks.fetch_add(counts.tracks, Ordering::Relaxed);
        self.categorized_tracks
            .fetch_add(counts.categorized_tracks, Ordering::Relaxed);
        self.steps.fetch_add(counts.steps, Ordering::Relaxed);
        self.splits.fetch_add(counts.splits, Ordering::Relaxed);
        self.photons.fetch_add(counts.photons, Ordering::Relaxed);
        self.relabeled_photons
            .fetch_add(counts.relabeled_photons, Ordering::Relaxed);
        let events = self.events.fetch_add(1, Ordering::Relaxed) + 1;

        if events % self.log_interval == 0 {
            tracing::info!(
                events = events,
                event_id = event_id,
                photons = self.photons(),
                splits = self.splits(),
                duration_ms = duration.as_millis() as u64,
                "Replay progress"
            );
        }
    }

    #[must_use]
    pub fn events(&self) -> u64 {
        self.events.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn tracks(&self) -> u64 {
        self.tracks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn categorized_tracks(&self) -> u64 {
        self.categorized_tracks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn splits(&self) -> u64 {
        self.splits.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn photons(&self) -> u64 {
        self.photons.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn relabeled_photons(&self) -> u64 {
        self.relabeled_photons.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the run totals.
    pub fn log_summary(&self) {
        tracing::info!(
            events = self.events(),
            tracks = self.tracks(),
            categorized = self.categorized_tracks(),
            steps = self.steps(),
            splits = self.splits(),
            photons = self.photons(),
            relabeled = self.relabeled_photons(),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Replay finished"
        );
    }
}

/// Initialize the tracing subscriber, honouring `RUST_LOG` when set.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
