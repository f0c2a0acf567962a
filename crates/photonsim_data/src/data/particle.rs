use serde::{Deserialize, Serialize};

/// Rest masses in MeV.
pub const ELECTRON_MASS: f64 = 0.510_998_95;
pub const MUON_MASS: f64 = 105.658_375_5;
pub const CHARGED_PION_MASS: f64 = 139.570_39;
pub const NEUTRAL_PION_MASS: f64 = 134.976_8;

/// Particle species the classifier cares about, keyed on the PDG code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Electron,
    Positron,
    MuonMinus,
    MuonPlus,
    PionPlus,
    PionMinus,
    PionZero,
    Gamma,
    OpticalPhoton,
    Other,
}

impl ParticleKind {
    /// Resolves the kind from the PDG code, using the engine's particle name
    /// only for optical photons, which have no PDG code of their own.
    pub fn from_pdg(pdg_code: i32, particle_name: &str) -> Self {
        if particle_name == "opticalphoton" {
            return ParticleKind::OpticalPhoton;
        }
        match pdg_code {
            11 => ParticleKind::Electron,
            -11 => ParticleKind::Positron,
            13 => ParticleKind::MuonMinus,
            -13 => ParticleKind::MuonPlus,
            211 => ParticleKind::PionPlus,
            -211 => ParticleKind::PionMinus,
            111 => ParticleKind::PionZero,
            22 => ParticleKind::Gamma,
            -22 => ParticleKind::OpticalPhoton,
            _ => ParticleKind::Other,
        }
    }

    pub fn is_electron_like(self) -> bool {
        matches!(self, ParticleKind::Electron | ParticleKind::Positron)
    }

    pub fn is_muon(self) -> bool {
        matches!(self, ParticleKind::MuonMinus | ParticleKind::MuonPlus)
    }

    pub fn is_charged_pion(self) -> bool {
        matches!(self, ParticleKind::PionPlus | ParticleKind::PionMinus)
    }

    pub fn mass(self) -> Option<f64> {
        match self {
            ParticleKind::Electron | ParticleKind::Positron => Some(ELECTRON_MASS),
            ParticleKind::MuonMinus | ParticleKind::MuonPlus => Some(MUON_MASS),
            ParticleKind::PionPlus | ParticleKind::PionMinus => Some(CHARGED_PION_MASS),
            ParticleKind::PionZero => Some(NEUTRAL_PION_MASS),
            ParticleKind::Gamma | ParticleKind::OpticalPhoton => Some(0.0),
            ParticleKind::Other => None,
        }
    }

    /// Momentum (MeV/c) for a given kinetic energy (MeV).
    /// Species without a tabulated mass are treated as massless.
    pub fn momentum_from_kinetic(self, kinetic_energy: f64) -> f64 {
        let m = self.mass().unwrap_or(0.0);
        let t = kinetic_energy.max(0.0);
        (t * (t + 2.0 * m)).sqrt()
    }

    /// Kinetic energy (MeV) for a given momentum (MeV/c).
    pub fn kinetic_from_momentum(self, momentum: f64) -> f64 {
        let m = self.mass().unwrap_or(0.0);
        (momentum * momentum + m * m).sqrt() - m
    }
}
