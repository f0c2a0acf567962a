mod common;

use common::{kinetic_for, tilted, EventScript};
use photonsim_core::{AppConfig, EventProcessor, StepOutcome};
use photonsim_data::{Category, EngineEvent, TrackStatus, Vec3};

const CONTINUATION: i32 = 10_000_000;

fn pion_event() -> EventScript {
    EventScript::new()
        .begin(0, 1500.0)
        .primary(1, "mu-", 1500.0)
        .track(3, 1, "pi+", kinetic_for("pi+", 450.0), "muonInelastic")
}

#[test]
fn test_large_kink_splits_secondary_pion() {
    let processor = pion_event()
        .step(3, Vec3::new(0.0, 0.0, 1.0), "hIoni")
        .photon(3)
        .step(3, tilted(11.5), "hadElastic")
        .photon(3)
        .run();

    assert_eq!(processor.counts().splits, 1);
    assert_eq!(processor.status(3), Some(TrackStatus::Killed));
    assert_category!(processor, CONTINUATION, Category::SecondaryPion, 1);

    let continuation = processor.registry().get(CONTINUATION).unwrap();
    assert_eq!(continuation.parent_track_id, 3);
    assert_eq!(continuation.category_parent_track_id, 3);
    assert_eq!(continuation.creation_process, "Deflection_hadElastic");
    assert!((continuation.time - 0.01).abs() < 1e-12);

    assert_genealogy!(processor, 0, vec![1, 3]);
    assert_genealogy!(processor, 1, vec![1, 3, CONTINUATION]);
}

#[test]
fn test_small_incremental_angles_do_not_split() {
    let processor = pion_event()
        .step(3, tilted(4.9), "hadElastic")
        .step(3, tilted(9.9), "hIoni")
        .step(3, tilted(14.9), "msc")
        .run();

    assert_eq!(processor.counts().splits, 0);
    assert_eq!(processor.counts().steps, 3);
    assert_eq!(processor.status(3), Some(TrackStatus::Alive));
}

#[test]
fn test_angle_is_incremental_not_cumulative() {
    let mut script = pion_event();
    for i in 1..=10 {
        script = script.step(3, tilted(3.0 * i as f64), "msc");
    }
    let processor = script.run();
    assert_eq!(processor.counts().splits, 0);
}

#[test]
fn test_just_above_threshold_splits() {
    let processor = pion_event().step(3, tilted(5.0001), "hadElastic").run();
    assert_eq!(processor.counts().splits, 1);
}

#[test]
fn test_non_kink_processes_and_particles_ignored() {
    let processor = pion_event()
        .step(3, tilted(40.0), "pi+Inelastic")
        .track(4, 1, "pi-", kinetic_for("pi-", 450.0), "muonInelastic")
        .step(4, tilted(40.0), "Transportation")
        .step(1, tilted(40.0), "hadElastic")
        .track(5, 1, "pi+", kinetic_for("pi+", 450.0), "muonInelastic")
        .step_with_status(5, tilted(40.0), "hadElastic", TrackStatus::Killed)
        .run();

    assert_eq!(processor.counts().splits, 0);
}

#[test]
fn test_disabled_monitor_never_splits() {
    let processor = pion_event()
        .with_config(|c| c.deflection.enabled = false)
        .step(3, tilted(60.0), "hadElastic")
        .run();
    assert_eq!(processor.counts().splits, 0);
    assert_eq!(processor.registry().len(), 2);
}

#[test]
fn test_suspended_status_carried_to_continuation() {
    let processor = pion_event()
        .step_with_status(3, tilted(20.0), "hadElastic", TrackStatus::Suspended)
        .run();
    assert_eq!(processor.status(CONTINUATION), Some(TrackStatus::Suspended));
}

#[test]
fn test_later_notifications_follow_the_continuation() {
    let processor = pion_event()
        .step(3, tilted(20.0), "hadElastic")
        .step(3, tilted(40.0), "hadElastic")
        .photon(3)
        .track(9, 3, "e-", 40.0, "Decay")
        .photon(9)
        .run();

    let second = CONTINUATION + 1;
    assert_eq!(processor.counts().splits, 2);
    assert_eq!(processor.registry().get(second).unwrap().parent_track_id, CONTINUATION);
    assert_genealogy!(processor, 0, vec![1, 3, CONTINUATION, second]);
    assert_eq!(processor.registry().get(9).unwrap().parent_track_id, second);
    assert_genealogy!(processor, 1, vec![1, 3, CONTINUATION, second, 9]);
}

#[test]
fn test_attached_engine_receives_seed() {
    let mut processor = pion_event()
        .with_config(|c| c.replay.auto_continue = false)
        .run();
    let mut step = match pion_event().step(3, tilted(30.0), "hadElastic").into_events().pop() {
        Some(EngineEvent::StepCompleted(step)) => step,
        other => panic!("expected a step, got {other:?}"),
    };
    step.post_step_kinetic_energy = Some(250.0);

    let seed = match processor.on_step(&step) {
        StepOutcome::Split(seed) => seed,
        other => panic!("expected split, got {other:?}"),
    };
    assert_eq!(seed.parent_track_id, 3);
    assert_eq!(seed.kinetic_energy, 250.0);
    assert_eq!(seed.direction, tilted(30.0));

    processor.on_track_created(&seed.into_track_created(57));
    assert_category!(processor, 57, Category::SecondaryPion, 1);
    assert_eq!(processor.on_step(&step), StepOutcome::Ignored);
}

#[test]
fn test_step_without_energy_keeps_pion_momentum() {
    let kinetic = kinetic_for("pi+", 450.0);
    let lines = format!(
        concat!(
            r#"{{"type":"EventBegin","event_id":0,"primary_energy":1500.0}}"#, "\n",
            r#"{{"type":"TrackCreated","track_id":1,"particle_name":"mu-","pdg_code":13,"parent_track_id":0,"position":{{"x":0.0,"y":0.0,"z":0.0}},"direction":{{"x":0.0,"y":0.0,"z":1.0}},"kinetic_energy":1500.0,"time":0.0,"creation_process":"Primary"}}"#, "\n",
            r#"{{"type":"TrackCreated","track_id":3,"particle_name":"pi+","pdg_code":211,"parent_track_id":1,"position":{{"x":0.0,"y":0.0,"z":0.0}},"direction":{{"x":0.0,"y":0.0,"z":1.0}},"kinetic_energy":{},"time":0.0,"creation_process":"muonInelastic"}}"#, "\n",
            r#"{{"type":"StepCompleted","track_id":3,"post_step_direction":{{"x":0.2,"y":0.0,"z":0.9798}},"post_step_position":{{"x":0.0,"y":0.0,"z":1.0}},"post_step_time":0.01,"step_process":"hadElastic","status":"Alive"}}"#, "\n",
        ),
        kinetic
    );
    let events = photonsim_io::parse_events(std::io::Cursor::new(lines)).unwrap();
    assert!(matches!(
        events[0][3],
        EngineEvent::StepCompleted(ref s) if s.post_step_kinetic_energy.is_none()
    ));

    let mut processor = EventProcessor::new(AppConfig::default());
    for event in &events[0] {
        processor.handle(event);
    }
    let continuation = processor.registry().get(CONTINUATION).unwrap();
    assert!((continuation.kinetic_energy - kinetic).abs() < 1e-9);
    assert_category!(processor, CONTINUATION, Category::SecondaryPion, 1);
}

#[test]
fn test_exact_threshold_from_initial_direction_does_not_split() {
    let processor = pion_event().step(3, tilted(5.0), "hadElastic").run();
    assert_eq!(processor.counts().splits, 0);
    assert_eq!(processor.status(3), Some(TrackStatus::Alive));
}
