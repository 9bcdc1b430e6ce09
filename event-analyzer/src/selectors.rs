//! Particle selectors
//!
//! A selector is a pure boolean predicate over a single particle. The
//! classifier and the signal searcher are parameterized by boxed selectors,
//! composed through [`AllSelector`] rather than through trait hierarchies.

use crate::types::Particle;
use std::collections::BTreeSet;

/// Pythia-convention status code for final-state stable particles
pub const STATUS_FINAL_STATE: i32 = 1;
/// Pythia-convention status code for incoming hard-process particles
pub const STATUS_INITIAL_STATE: i32 = 21;
/// Pythia-convention status code for outgoing hard-process particles
pub const STATUS_HARD_PROCESS_OUTGOING: i32 = 23;

/// Decides whether a particle must be selected
///
/// Implementations are pure: no side effects, no panics for well-formed
/// input. `Send + Sync` so an assembled analysis can be shared read-only
/// across per-event workers.
pub trait ParticleSelector: Send + Sync {
    /// True if the particle must be selected, false otherwise
    fn selects(&self, particle: &Particle) -> bool;
}

/// Selects particles by exact generator status code
///
/// The preset constructors encode the Pythia convention; other generators can
/// use arbitrary codes through [`StatusSelector::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSelector {
    code: i32,
}

impl StatusSelector {
    pub fn new(code: i32) -> Self {
        Self { code }
    }

    /// Final-state stable particles (status 1)
    pub fn final_state() -> Self {
        Self::new(STATUS_FINAL_STATE)
    }

    /// Incoming hard-process particles (status 21)
    pub fn initial_state() -> Self {
        Self::new(STATUS_INITIAL_STATE)
    }

    /// Outgoing hard-process particles (status 23)
    pub fn hard_process_outgoing() -> Self {
        Self::new(STATUS_HARD_PROCESS_OUTGOING)
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl ParticleSelector for StatusSelector {
    fn selects(&self, particle: &Particle) -> bool {
        particle.status == self.code
    }
}

/// Selects particles whose species is in an allowed set
///
/// Matching is on `abs_pid`, so a set entry covers particle and antiparticle
/// alike. The set can grow after construction via [`SpeciesSelector::add_pid`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesSelector {
    pids: BTreeSet<i32>,
}

impl SpeciesSelector {
    pub fn new(pids: impl IntoIterator<Item = i32>) -> Self {
        Self {
            pids: pids.into_iter().map(i32::abs).collect(),
        }
    }

    /// The usual charged species: e, mu, charged pion, charged kaon, proton
    ///
    /// The records carry no charge information, so charge selection is
    /// approximated by accepting species known to be charged.
    pub fn charged() -> Self {
        Self::new([11, 13, 211, 321, 2212])
    }

    /// Add a species code to the allowed set
    pub fn add_pid(&mut self, pid: i32) {
        self.pids.insert(pid.abs());
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }
}

impl ParticleSelector for SpeciesSelector {
    fn selects(&self, particle: &Particle) -> bool {
        self.pids.contains(&particle.abs_pid())
    }
}

/// Logical AND over an ordered list of selectors
///
/// Short-circuits on the first failing sub-selector. An empty list selects
/// everything (the identity element for AND).
#[derive(Default)]
pub struct AllSelector {
    selectors: Vec<Box<dyn ParticleSelector>>,
}

impl AllSelector {
    pub fn new(selectors: Vec<Box<dyn ParticleSelector>>) -> Self {
        Self { selectors }
    }

    /// Append a sub-selector
    pub fn push(&mut self, selector: Box<dyn ParticleSelector>) {
        self.selectors.push(selector);
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl ParticleSelector for AllSelector {
    fn selects(&self, particle: &Particle) -> bool {
        self.selectors.iter().all(|s| s.selects(particle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FourMomentum;

    fn particle(pid: i32, status: i32) -> Particle {
        Particle::new(FourMomentum::new(1.0, 0.0, 0.0, 2.0), pid, status)
    }

    #[test]
    fn test_status_selector() {
        let final_state = StatusSelector::final_state();
        assert!(final_state.selects(&particle(211, 1)));
        assert!(!final_state.selects(&particle(211, 23)));

        // producer-defined codes are not baked in
        let custom = StatusSelector::new(62);
        assert!(custom.selects(&particle(23, 62)));
        assert!(!custom.selects(&particle(23, 1)));
    }

    #[test]
    fn test_species_selector_matches_antiparticles() {
        let charged = SpeciesSelector::charged();
        assert!(charged.selects(&particle(211, 1)));
        assert!(charged.selects(&particle(-211, 1)));
        assert!(charged.selects(&particle(-13, 1)));
        assert!(!charged.selects(&particle(22, 1))); // photon
        assert!(!charged.selects(&particle(2112, 1))); // neutron
    }

    #[test]
    fn test_species_selector_grows() {
        let mut selector = SpeciesSelector::charged();
        assert!(!selector.selects(&particle(3222, 1))); // Sigma+
        selector.add_pid(-3222); // stored as absolute value
        assert!(selector.selects(&particle(3222, 1)));
        assert!(selector.selects(&particle(-3222, 1)));
    }

    #[test]
    fn test_all_selector_short_circuit_and_identity() {
        let final_charged = AllSelector::new(vec![
            Box::new(StatusSelector::final_state()),
            Box::new(SpeciesSelector::charged()),
        ]);
        assert!(final_charged.selects(&particle(211, 1)));
        assert!(!final_charged.selects(&particle(211, 23))); // wrong status
        assert!(!final_charged.selects(&particle(22, 1))); // neutral

        // empty conjunction selects everything
        let identity = AllSelector::default();
        assert!(identity.selects(&particle(22, 91)));
    }
}
