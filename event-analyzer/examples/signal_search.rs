//! Trace a decay chain from the hard process to its stable charged products.
//!
//! Run with: cargo run --example signal_search

use event_analyzer::{
    Event, FourMomentum, Particle, SelectorConfig, SignalSearcher, Vertex,
};

fn main() {
    env_logger::init();

    let mut event = Event::new();

    // hard-process b quark decaying through a B meson into three hadrons
    let b = event.add_particle(Particle::new(FourMomentum::new(0.0, 0.0, 40.0, 45.0), 5, 23));
    let b_meson = event.add_particle(Particle::new(FourMomentum::new(0.0, 0.0, 38.0, 43.0), 511, 2));
    let pi_plus = event.add_particle(Particle::new(FourMomentum::new(6.0, 1.0, 20.0, 21.0), 211, 1));
    let k_minus = event.add_particle(Particle::new(FourMomentum::new(-3.0, 2.0, 10.0, 11.0), -321, 1));
    let pi_zero = event.add_particle(Particle::new(FourMomentum::new(1.0, -1.0, 5.0, 5.3), 111, 1));

    let decay = event.add_vertex(Vertex::new(vec![pi_plus, k_minus, pi_zero]));
    event.set_end_vertex(b_meson, decay).expect("valid handles");
    let hadronization = event.add_vertex(Vertex::new(vec![b_meson]));
    event.set_end_vertex(b, hadronization).expect("valid handles");

    let terminal = SelectorConfig::final_charged()
        .build()
        .expect("valid selector config");
    let searcher = SignalSearcher::new(terminal);

    let signal = searcher.search(&event, &[b]);
    println!("{} charged stable particles from the hard process:", signal.len());
    for &id in &signal {
        let particle = event.particle(id);
        println!("  pid {:>6}  pt {:8.3}", particle.pid, particle.pt());
    }
}
