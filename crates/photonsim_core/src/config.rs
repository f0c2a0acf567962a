//! Configuration for the genealogy layer.
//!
//! Strongly-typed structures mapping to `photonsim.toml`. Every field has a
//! default, so a partial file only overrides what it names.
//!
//! ## Example `photonsim.toml`
//!
//! ```toml
//! [classifier]
//! decay_electron_min_energy = 1.0
//! secondary_pion_min_momentum = 160.0
//!
//! [deflection]
//! enabled = true
//! angle_threshold_deg = 5.0
//!
//! [lineage]
//! relabel_policy = "retroactive"
//! ```

use serde::{Deserialize, Serialize};

/// Thresholds for the category rules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Decay electrons at or below this kinetic energy (MeV) are treated as
    /// atomic de-excitation products and stay uncategorized.
    pub decay_electron_min_energy: f64,
    /// Secondary pions below this momentum (MeV/c) cannot radiate Cherenkov
    /// light in water.
    pub secondary_pion_min_momentum: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            decay_electron_min_energy: 1.0,
            secondary_pion_min_momentum: 160.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DeflectionConfig {
    pub enabled: bool,
    pub angle_threshold_deg: f64,
    /// Step processes after which the engine keeps the track alive.
    pub kink_processes: Vec<String>,
}

impl Default for DeflectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            angle_threshold_deg: 5.0,
            kink_processes: [
                "hadElastic",
                "hIoni",
                "ionIoni",
                "msc",
                "CoulombScat",
                "hBrems",
                "hPairProd",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// What happens to already-recorded photons when a track is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RelabelPolicy {
    /// Photons keep the attribution they were recorded with.
    #[default]
    Disabled,
    /// Photons emitted at or after the kink move to the continuation track.
    Retroactive,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LineageConfig {
    pub max_walk_depth: usize,
    pub relabel_policy: RelabelPolicy,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            max_walk_depth: 10_000,
            relabel_policy: RelabelPolicy::Disabled,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    /// Create continuation tracks locally when no engine is attached.
    pub auto_continue: bool,
    /// First id handed to locally created continuation tracks.
    pub synthetic_track_id_base: i32,
    pub parallel: bool,
    /// Events between progress log lines.
    pub log_interval: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            auto_continue: true,
            synthetic_track_id_base: 10_000_000,
            parallel: true,
            log_interval: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub deflection: DeflectionConfig,
    pub lineage: LineageConfig,
    pub replay: ReplayConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Err` describing the first invalid value.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.classifier.decay_electron_min_energy >= 0.0,
            "Decay electron energy cut must be non-negative"
        );
        anyhow::ensure!(
            self.classifier.secondary_pion_min_momentum >= 0.0,
            "Secondary pion momentum cut must be non-negative"
        );
        anyhow::ensure!(
            self.deflection.angle_threshold_deg > 0.0
                && self.deflection.angle_threshold_deg < 180.0,
            "Deflection angle threshold must be in (0, 180) degrees"
        );
        anyhow::ensure!(
            !self.deflection.enabled || !self.deflection.kink_processes.is_empty(),
            "Deflection monitoring needs at least one kink process"
        );
        anyhow::ensure!(
            self.deflection
                .kink_processes
                .iter()
                .all(|p| !p.to_ascii_lowercase().contains("inelastic")),
            "Inelastic processes terminate the track and cannot be kink processes"
        );
        anyhow::ensure!(
            self.lineage.max_walk_depth > 0,
            "Lineage walk depth must be positive"
        );
        anyhow::ensure!(
            self.replay.synthetic_track_id_base > 0,
            "Synthetic track id base must be positive"
        );
        anyhow::ensure!(
            self.replay.log_interval > 0,
            "Log interval must be positive"
        );
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of every setting that changes labels, stored with the output.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.classifier).as_bytes());
        hasher.update(format!("{:?}", self.deflection).as_bytes());
        hasher.update(format!("{:?}", self.lineage).as_bytes());
        hex::encode(hasher.finalize())
    }
}
