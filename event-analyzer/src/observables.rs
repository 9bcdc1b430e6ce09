//! Observables
//!
//! An observable reduces an ordered particle collection to one scalar. All
//! implementations are stateless; they are registered by name on the
//! [`EventAnalyzer`](crate::EventAnalyzer) and evaluated over a category of a
//! classified event.

use crate::types::{FourMomentum, Particle};

/// Reduces a particle collection to a double-precision scalar
pub trait Observable: Send + Sync {
    /// Evaluate the observable for a set of particles
    ///
    /// Implementations must return a defined neutral value (not NaN) for an
    /// empty input.
    fn evaluate(&self, particles: &[&Particle]) -> f64;
}

/// Invariant mass of the combined four-momentum
///
/// Sums all four-momenta component-wise in double precision and returns the
/// Lorentzian norm of the total. Empty input sums to the zero four-vector,
/// so the result is 0, never NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvariantMass;

impl Observable for InvariantMass {
    fn evaluate(&self, particles: &[&Particle]) -> f64 {
        let total: FourMomentum = particles.iter().map(|p| p.momentum).sum();
        total.mass()
    }
}

/// Scalar sum of transverse momenta
///
/// The HT-style scalar used for threshold decisions on a selected particle
/// list. Empty input gives 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarPtSum;

impl Observable for ScalarPtSum {
    fn evaluate(&self, particles: &[&Particle]) -> f64 {
        particles.iter().map(|p| p.pt()).sum()
    }
}
