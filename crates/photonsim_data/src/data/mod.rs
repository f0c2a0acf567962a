//! Core data structures for the PhotonSim genealogy layer.

pub mod event;
pub mod particle;
pub mod photon;
pub mod track;
pub mod vector;
