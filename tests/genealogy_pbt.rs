use photonsim_core::genealogy::{genealogy, is_category_ancestor, nearest_categorized_ancestor};
use photonsim_core::{AppConfig, EventProcessor, RelabelPolicy};
use photonsim_data::{
    Category, EngineEvent, OpticalPhotonCreated, StepCompleted, TrackCreated, TrackId,
    TrackStatus, Vec3,
};
use proptest::prelude::*;

const DEPTH: usize = 10_000;

/// (name, pdg, process) choices for generated secondaries.
const SECONDARIES: [(&str, i32, &str); 8] = [
    ("e-", 11, "Decay"),
    ("e-", 11, "eIoni"),
    ("e+", -11, "Decay"),
    ("gamma", 22, "Decay"),
    ("gamma", 22, "eBrem"),
    ("pi+", 211, "protonInelastic"),
    ("pi-", -211, "hadElastic"),
    ("pi0", 111, "pi+Inelastic"),
];

#[derive(Debug, Clone)]
struct Secondary {
    parent_pick: usize,
    kind: usize,
    kinetic_energy: f64,
}

prop_compose! {
    fn arb_secondary()(
        parent_pick in 0usize..1000,
        kind in 0usize..SECONDARIES.len(),
        kinetic_energy in 0.1f64..800.0
    ) -> Secondary {
        Secondary { parent_pick, kind, kinetic_energy }
    }
}

prop_compose! {
    fn arb_cascade()(
        primaries in prop::collection::vec(prop::sample::select(vec!["mu-", "mu+", "pi+", "pi-"]), 1..4),
        secondaries in prop::collection::vec(arb_secondary(), 0..60),
        photon_parents in prop::collection::vec(0i32..120, 1..80)
    ) -> (Vec<&'static str>, Vec<Secondary>, Vec<TrackId>) {
        (primaries, secondaries, photon_parents)
    }
}

fn pdg(name: &str) -> i32 {
    match name {
        "mu-" => 13,
        "mu+" => -13,
        "pi+" => 211,
        _ => -211,
    }
}

fn replay(primaries: &[&str], secondaries: &[Secondary], photon_parents: &[TrackId]) -> EventProcessor {
    let mut processor = EventProcessor::new(AppConfig::default());
    processor.begin_event(0, 1000.0);

    let mut next_id = 1;
    for name in primaries {
        processor.on_track_created(&TrackCreated {
            track_id: next_id,
            particle_name: name.to_string(),
            pdg_code: pdg(name),
            parent_track_id: 0,
            position: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, 1.0),
            kinetic_energy: 1000.0,
            time: 0.0,
            creation_process: "Primary".to_string(),
        });
        next_id += 1;
    }
    for s in secondaries {
        let (name, pdg_code, process) = SECONDARIES[s.kind];
        let parent = 1 + (s.parent_pick as i32 % (next_id - 1));
        processor.on_track_created(&TrackCreated {
            track_id: next_id,
            particle_name: name.to_string(),
            pdg_code,
            parent_track_id: parent,
            position: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, 1.0),
            kinetic_energy: s.kinetic_energy,
            time: 0.0,
            creation_process: process.to_string(),
        });
        next_id += 1;
    }
    for &parent in photon_parents {
        processor.on_photon(&OpticalPhotonCreated {
            position: Vec3::ZERO,
            direction: Vec3::new(1.0, 0.0, 0.0),
            time: 1.0,
            wavelength: 400.0,
            creation_process: "Cerenkov".to_string(),
            parent_track_id: parent,
        });
    }
    processor
}

fn photon_at(parent: TrackId, time: f64) -> EngineEvent {
    EngineEvent::OpticalPhotonCreated(OpticalPhotonCreated {
        position: Vec3::ZERO,
        direction: Vec3::new(1.0, 0.0, 0.0),
        time,
        wavelength: 400.0,
        creation_process: "Cerenkov".to_string(),
        parent_track_id: parent,
    })
}

fn step_at(track_id: TrackId, direction: Vec3, time: f64, process: &str) -> EngineEvent {
    EngineEvent::StepCompleted(StepCompleted {
        track_id,
        post_step_direction: direction,
        post_step_position: Vec3::new(0.0, 0.0, time * 100.0),
        post_step_time: time,
        post_step_kinetic_energy: None,
        step_process: process.to_string(),
        status: TrackStatus::Alive,
    })
}

/// Replays the cascade under retroactive relabeling, kinking the picked
/// tracks by 20 degrees halfway through the photons. Photon times are
/// arbitrary so late-delivered ones land on both sides of each kink.
fn replay_with_kinks(
    primaries: &[&str],
    secondaries: &[Secondary],
    photons: &[(TrackId, f64)],
    kinks: &[TrackId],
) -> EventProcessor {
    let mut config = AppConfig::default();
    config.lineage.relabel_policy = RelabelPolicy::Retroactive;
    let seeded = replay(primaries, secondaries, &[]);
    let track_count = seeded.registry().len() as TrackId;

    let mut processor = EventProcessor::new(config);
    processor.begin_event(0, 1000.0);
    for record in seeded.registry().iter() {
        processor.on_track_created(&TrackCreated {
            track_id: record.track_id,
            particle_name: record.particle_name.clone(),
            pdg_code: record.pdg_code,
            parent_track_id: record.parent_track_id,
            position: record.position,
            direction: record.direction,
            kinetic_energy: record.kinetic_energy,
            time: record.time,
            creation_process: record.creation_process.clone(),
        });
    }

    let (early, late) = photons.split_at(photons.len() / 2);
    for &(parent, time) in early {
        processor.handle(&photon_at(parent, time));
    }
    for (k, &pick) in kinks.iter().enumerate() {
        let track = 1 + pick % track_count;
        let t = 0.1 * (k as f64 + 1.0);
        processor.handle(&step_at(track, Vec3::new(0.0, 0.0, 1.0), t, "msc"));
        let rad = 20f64.to_radians();
        let kinked = Vec3::new(rad.sin(), 0.0, rad.cos());
        processor.handle(&step_at(track, kinked, t + 0.01, "hadElastic"));
    }
    for &(parent, time) in late {
        processor.handle(&photon_at(parent, time));
    }
    processor
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_retroactive_relabel_keeps_genealogies_root_first(
        (primaries, secondaries, _) in arb_cascade(),
        photons in prop::collection::vec((0i32..120, 0.0f64..1.0), 1..80),
        kinks in prop::collection::vec(0i32..1000, 0..4)
    ) {
        let processor = replay_with_kinks(&primaries, &secondaries, &photons, &kinks);
        let registry = processor.registry();

        for photon in processor.labeler().photons() {
            for id in &photon.genealogy {
                prop_assert!(registry.get(*id).is_some_and(|r| r.is_categorized()));
            }
            if let Some(first) = photon.genealogy.first() {
                prop_assert_eq!(registry.get(*first).map(|r| r.category), Some(Category::Primary));
            }
            for pair in photon.genealogy.windows(2) {
                prop_assert!(is_category_ancestor(registry, pair[1], pair[0], DEPTH),
                    "{} is not above {} in {:?}", pair[0], pair[1], photon.genealogy);
            }
            prop_assert_eq!(photon.genealogy.last().copied().unwrap_or(0), photon.resolved_track_id);
        }
    }

    #[test]
    fn test_genealogy_entries_categorized_and_root_first(
        (primaries, secondaries, photons) in arb_cascade()
    ) {
        let processor = replay(&primaries, &secondaries, &photons);
        let registry = processor.registry();

        for photon in processor.labeler().photons() {
            for id in &photon.genealogy {
                let record = registry.get(*id);
                prop_assert!(record.is_some_and(|r| r.is_categorized()),
                    "Genealogy {:?} contains uncategorized id {}", photon.genealogy, id);
            }
            if let Some(first) = photon.genealogy.first() {
                prop_assert_eq!(registry.get(*first).map(|r| r.category), Some(Category::Primary));
            }
            for pair in photon.genealogy.windows(2) {
                prop_assert!(is_category_ancestor(registry, pair[1], pair[0], DEPTH),
                    "{} is not above {} in {:?}", pair[0], pair[1], photon.genealogy);
            }
        }
    }

    #[test]
    fn test_genealogy_matches_fresh_walk(
        (primaries, secondaries, photons) in arb_cascade()
    ) {
        let processor = replay(&primaries, &secondaries, &photons);
        let registry = processor.registry();

        for photon in processor.labeler().photons() {
            let nearest = nearest_categorized_ancestor(registry, photon.parent_track_id, DEPTH);
            prop_assert_eq!(photon.resolved_track_id, nearest);
            prop_assert_eq!(&photon.genealogy, &genealogy(registry, nearest, DEPTH));
            prop_assert_eq!(photon.genealogy.is_empty(), nearest == 0);
            prop_assert_eq!(photon.genealogy.last().copied().unwrap_or(0), nearest);
        }
    }

    #[test]
    fn test_replay_is_deterministic(
        (primaries, secondaries, photons) in arb_cascade()
    ) {
        let a = replay(&primaries, &secondaries, &photons);
        let b = replay(&primaries, &secondaries, &photons);
        prop_assert_eq!(a.labeler().label_groups(), b.labeler().label_groups());
    }

    #[test]
    fn test_primary_sub_ids_are_dense(
        (primaries, secondaries, photons) in arb_cascade()
    ) {
        let processor = replay(&primaries, &secondaries, &photons);
        let mut sub_ids: Vec<i32> = processor
            .registry()
            .iter()
            .filter(|r| r.category == Category::Primary)
            .map(|r| r.sub_id)
            .collect();
        sub_ids.sort_unstable();
        prop_assert_eq!(sub_ids, (0..primaries.len() as i32).collect::<Vec<_>>());
    }
}
