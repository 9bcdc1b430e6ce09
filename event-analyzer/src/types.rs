//! Core data model for particle event records
//!
//! This module defines the types an event source materializes before analysis:
//! four-momenta, particles, decay vertices, and the `Event` arena that owns
//! them. The analysis engines consume events read-only and never mutate a
//! particle's momentum or status.
//!
//! Particles and vertices are referenced through arena handles (`ParticleId`,
//! `VertexId`) rather than pointers, so visited-sets and de-duplication
//! compare stable indices.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can occur while building events or assembling an analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("unknown particle handle {0:?}")]
    UnknownParticle(ParticleId),

    #[error("unknown vertex handle {0:?}")]
    UnknownVertex(VertexId),

    #[error("malformed event record: {0}")]
    MalformedRecord(String),

    #[error("duplicate category label: {0}")]
    DuplicateCategory(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Handle to a particle inside an [`Event`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(u32);

impl ParticleId {
    /// Position of the particle in the owning event, in insertion order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a decay vertex inside an [`Event`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(u32);

impl VertexId {
    /// Position of the vertex in the owning event
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A four-momentum (px, py, pz, E) in GeV
///
/// Derived kinematic quantities (pT, eta, phi, mass) are computed on demand;
/// nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourMomentum {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl FourMomentum {
    /// The zero four-vector
    pub const ZERO: FourMomentum = FourMomentum {
        px: 0.0,
        py: 0.0,
        pz: 0.0,
        e: 0.0,
    };

    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Transverse momentum (component perpendicular to the beam axis)
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Magnitude of the three-momentum
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Azimuthal angle in the transverse plane, in (-pi, pi]
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Pseudorapidity
    ///
    /// Returns +/- infinity for momenta exactly along the beam axis and 0 for
    /// the zero vector.
    pub fn eta(&self) -> f64 {
        if self.pt() == 0.0 {
            return if self.pz == 0.0 {
                0.0
            } else if self.pz > 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        let p = self.p();
        0.5 * ((p + self.pz) / (p - self.pz)).ln()
    }

    /// Squared invariant mass (can be slightly negative from rounding)
    pub fn mass2(&self) -> f64 {
        self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz
    }

    /// Invariant mass, clamped at zero so rounding never produces NaN
    pub fn mass(&self) -> f64 {
        self.mass2().max(0.0).sqrt()
    }
}

impl Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, other: FourMomentum) -> FourMomentum {
        FourMomentum {
            px: self.px + other.px,
            py: self.py + other.py,
            pz: self.pz + other.pz,
            e: self.e + other.e,
        }
    }
}

impl AddAssign for FourMomentum {
    fn add_assign(&mut self, other: FourMomentum) {
        self.px += other.px;
        self.py += other.py;
        self.pz += other.pz;
        self.e += other.e;
    }
}

impl Sum for FourMomentum {
    fn sum<I: Iterator<Item = FourMomentum>>(iter: I) -> FourMomentum {
        iter.fold(FourMomentum::ZERO, |acc, m| acc + m)
    }
}

/// A generator-level particle
///
/// The type code follows the PDG numbering scheme: the absolute value is the
/// species, the sign distinguishes particle from antiparticle. The status code
/// is a generator convention (1 = final state, 21 = incoming hard process,
/// 23 = outgoing hard process for Pythia-style records) and is never
/// interpreted by the engines beyond equality tests in selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Four-momentum as produced by the generator
    pub momentum: FourMomentum,
    /// Signed PDG particle type code
    pub pid: i32,
    /// Generator status code
    pub status: i32,
    /// Decay vertex this particle flows into, if it decays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_vertex: Option<VertexId>,
}

impl Particle {
    /// Create a particle with no decay vertex
    pub fn new(momentum: FourMomentum, pid: i32, status: i32) -> Self {
        Self {
            momentum,
            pid,
            status,
            end_vertex: None,
        }
    }

    /// Species code: absolute value of the PDG type code
    pub fn abs_pid(&self) -> i32 {
        self.pid.abs()
    }

    /// Transverse momentum shortcut
    pub fn pt(&self) -> f64 {
        self.momentum.pt()
    }
}

/// A decay/interaction vertex: the set of outgoing particle edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Outgoing particles, in generator order
    pub particles_out: Vec<ParticleId>,
}

impl Vertex {
    pub fn new(particles_out: Vec<ParticleId>) -> Self {
        Self { particles_out }
    }
}

/// One collision record: an arena of particles and decay vertices
///
/// The event owns all particles and vertices; handles returned by
/// `add_particle`/`add_vertex` index into this arena. Accessors panic on
/// handles from a different event, the same way slice indexing does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    particles: Vec<Particle>,
    vertices: Vec<Vertex>,
}

impl Event {
    /// Create an empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a particle, returning its handle
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = ParticleId(self.particles.len() as u32);
        self.particles.push(particle);
        id
    }

    /// Append a vertex, returning its handle
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(vertex);
        id
    }

    /// Wire a particle to its decay vertex, validating both handles
    pub fn set_end_vertex(&mut self, particle: ParticleId, vertex: VertexId) -> Result<()> {
        if vertex.index() >= self.vertices.len() {
            return Err(AnalyzerError::UnknownVertex(vertex));
        }
        let slot = self
            .particles
            .get_mut(particle.index())
            .ok_or(AnalyzerError::UnknownParticle(particle))?;
        slot.end_vertex = Some(vertex);
        Ok(())
    }

    /// Borrow a particle by handle
    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.index()]
    }

    /// Borrow a particle by handle without panicking on foreign handles
    pub fn get_particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    /// Borrow a vertex by handle
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Iterate over all particles in insertion order
    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.particles
            .iter()
            .enumerate()
            .map(|(i, p)| (ParticleId(i as u32), p))
    }

    /// Number of particles in the event
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of vertices in the event
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Check that every cross-reference in the event is in range
    ///
    /// Event sources that deserialize records from external input should call
    /// this once after assembly; events built through the handle-returning
    /// methods are valid by construction.
    pub fn validate(&self) -> Result<()> {
        for (i, particle) in self.particles.iter().enumerate() {
            if let Some(vertex) = particle.end_vertex {
                if vertex.index() >= self.vertices.len() {
                    return Err(AnalyzerError::MalformedRecord(format!(
                        "particle {} points at missing vertex {}",
                        i,
                        vertex.index()
                    )));
                }
            }
        }
        for (i, vertex) in self.vertices.iter().enumerate() {
            for &out in &vertex.particles_out {
                if out.index() >= self.particles.len() {
                    return Err(AnalyzerError::MalformedRecord(format!(
                        "vertex {} lists missing outgoing particle {}",
                        i,
                        out.index()
                    )));
                }
            }
        }
        Ok(())
    }
}
