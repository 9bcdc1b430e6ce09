//! End-to-end pipeline test: classify, trace, evaluate on a synthetic event
//! shaped like a b-bbar hard process with decay chains down to stable hadrons.

use event_analyzer::{
    AnalysisConfig, Event, FourMomentum, ObservableKind, Particle, ParticleId, SelectorConfig,
    Vertex,
};

fn stable(event: &mut Event, px: f64, py: f64, pz: f64, pid: i32) -> ParticleId {
    let e = (px * px + py * py + pz * pz).sqrt() + 0.1;
    event.add_particle(Particle::new(FourMomentum::new(px, py, pz, e), pid, 1))
}

fn unstable(event: &mut Event, pz: f64, pid: i32, status: i32) -> ParticleId {
    event.add_particle(Particle::new(
        FourMomentum::new(0.0, 0.0, pz, pz.abs() + 5.0),
        pid,
        status,
    ))
}

/// Two incoming protons, a b-bbar pair from the hard process, each b hadronizing
/// through an intermediate into charged and neutral stable particles.
fn build_event(event: &mut Event) {
    unstable(event, 3500.0, 2212, 21);
    unstable(event, -3500.0, 2212, 21);

    let b = unstable(event, 40.0, 5, 23);
    let bbar = unstable(event, -35.0, -5, 23);

    // b -> B0 -> (pi+, K-, pi0)
    let b_meson = unstable(event, 38.0, 511, 2);
    let pi_plus = stable(event, 6.0, 1.0, 20.0, 211);
    let k_minus = stable(event, -3.0, 2.0, 10.0, -321);
    let pi_zero = stable(event, 1.0, -1.0, 5.0, 111);

    let v_b_meson = event.add_vertex(Vertex::new(vec![pi_plus, k_minus, pi_zero]));
    event.set_end_vertex(b_meson, v_b_meson).unwrap();
    let v_b = event.add_vertex(Vertex::new(vec![b_meson]));
    event.set_end_vertex(b, v_b).unwrap();

    // bbar -> Bbar0 -> (mu-, nu)
    let bbar_meson = unstable(event, -33.0, -511, 2);
    let muon = stable(event, -8.0, 0.0, -15.0, 13);
    let neutrino = stable(event, 2.0, 0.5, -12.0, 14);

    let v_bbar_meson = event.add_vertex(Vertex::new(vec![muon, neutrino]));
    event.set_end_vertex(bbar_meson, v_bbar_meson).unwrap();
    let v_bbar = event.add_vertex(Vertex::new(vec![bbar_meson]));
    event.set_end_vertex(bbar, v_bbar).unwrap();
}

fn analysis() -> AnalysisConfig {
    AnalysisConfig::new()
        .with_category("final", SelectorConfig::final_charged())
        .with_category("initial", SelectorConfig::InitialState)
        .with_category("hard-process", SelectorConfig::HardProcessOutgoing)
        .with_observable("q2", ObservableKind::InvariantMass, "hard-process")
        .with_observable("ht", ObservableKind::ScalarPtSum, "final")
        .with_signal("hard-process", SelectorConfig::final_charged())
}

#[test]
fn classification_covers_expected_categories() {
    let mut event = Event::new();
    build_event(&mut event);

    let config = analysis();
    let analyzer = config.build_analyzer().unwrap();
    let classification = analyzer.analyze(&event);

    assert_eq!(classification.particles_of("initial").len(), 2);
    assert_eq!(classification.particles_of("hard-process").len(), 2);
    // charged stable: pi+, K-, mu- (pi0 and nu are neutral, mesons not final)
    assert_eq!(classification.particles_of("final").len(), 3);

    // union never exceeds the event, no particle in two categories
    let mut all: Vec<ParticleId> = Vec::new();
    for label in ["final", "initial", "hard-process"] {
        all.extend_from_slice(classification.particles_of(label));
    }
    let before = all.len();
    all.sort();
    all.dedup();
    assert_eq!(before, all.len());
    assert!(all.len() <= event.particle_count());
}

#[test]
fn signal_search_reaches_charged_descendants_only() {
    let mut event = Event::new();
    build_event(&mut event);

    let config = analysis();
    let analyzer = config.build_analyzer().unwrap();
    let searcher = config.build_searcher().unwrap().unwrap();

    let classification = analyzer.analyze(&event);
    let seeds = classification.particles_of("hard-process");
    let signal = searcher.search(&event, seeds);

    let pids: Vec<i32> = signal.iter().map(|&id| event.particle(id).pid).collect();
    // depth-first from the higher-pT seed's chain; neutrals are dead ends
    assert_eq!(pids, vec![211, -321, 13]);
}

#[test]
fn observables_evaluate_over_categories() {
    let mut event = Event::new();
    build_event(&mut event);

    let config = analysis();
    let analyzer = config.build_analyzer().unwrap();
    let classification = analyzer.analyze(&event);

    let q2 = analyzer.evaluate_observable(&event, &classification, "q2", "hard-process");
    // b and bbar fly apart along the beam: the pair mass is well above zero
    assert!(q2 > 10.0);

    let ht = analyzer.evaluate_observable(&event, &classification, "ht", "final");
    let expected: f64 = classification
        .resolve(&event, "final")
        .iter()
        .map(|p| p.pt())
        .sum();
    assert!((ht - expected).abs() < 1e-12);

    // unknown names stay sentinels, not errors
    assert_eq!(
        analyzer.evaluate_observable(&event, &classification, "nope", "final"),
        event_analyzer::OBSERVABLE_SENTINEL
    );
    assert_eq!(
        analyzer.evaluate_observable(&event, &classification, "q2", "nope"),
        event_analyzer::OBSERVABLE_SENTINEL
    );
}
