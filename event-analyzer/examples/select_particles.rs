//! Classify a synthetic event and print the selected categories.
//!
//! Run with: cargo run --example select_particles

use event_analyzer::{
    AnalysisConfig, Event, FourMomentum, ObservableKind, Particle, SelectorConfig,
};

fn main() {
    env_logger::init();

    // the classic setup: charged final state, incoming beams, hard process
    let config = AnalysisConfig::new()
        .with_category("final", SelectorConfig::final_charged())
        .with_category("initial", SelectorConfig::InitialState)
        .with_category("hard-process", SelectorConfig::HardProcessOutgoing)
        .with_observable("invariantMass", ObservableKind::InvariantMass, "hard-process");

    let analyzer = config.build_analyzer().expect("valid analysis config");

    let mut event = Event::new();
    event.add_particle(Particle::new(
        FourMomentum::new(0.0, 0.0, 3500.0, 3500.0),
        2212,
        21,
    ));
    event.add_particle(Particle::new(
        FourMomentum::new(0.0, 0.0, -3500.0, 3500.0),
        2212,
        21,
    ));
    event.add_particle(Particle::new(FourMomentum::new(25.0, 3.0, 10.0, 28.0), 5, 23));
    event.add_particle(Particle::new(
        FourMomentum::new(-24.0, -2.0, -8.0, 26.0),
        -5,
        23,
    ));
    event.add_particle(Particle::new(FourMomentum::new(6.0, 1.0, 2.0, 6.5), 211, 1));
    event.add_particle(Particle::new(FourMomentum::new(-4.0, 2.0, 1.0, 4.7), -13, 1));
    event.add_particle(Particle::new(FourMomentum::new(1.0, -1.0, 0.5, 1.6), 22, 1));

    let classification = analyzer.analyze(&event);

    for label in classification.labels() {
        println!("{}: {} particles", label, classification.particles_of(label).len());
        for particle in classification.resolve(&event, label) {
            println!(
                "  pid {:>6}  pt {:8.3}  eta {:7.3}  phi {:7.3}",
                particle.pid,
                particle.pt(),
                particle.momentum.eta(),
                particle.momentum.phi()
            );
        }
    }

    let q2 = analyzer.evaluate_observable(&event, &classification, "invariantMass", "hard-process");
    println!("invariant mass of the hard process: {:.3}", q2);
}
