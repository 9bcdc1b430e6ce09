//! Signal particle search
//!
//! Walks decay chains from seed particles down to the terminal particles they
//! produce. The canonical use is tracing the outgoing hard-process particles
//! to the final-state charged particles they end up as, so jet reconstruction
//! can run on signal particles only.

use crate::selectors::ParticleSelector;
use crate::types::{Event, ParticleId, VertexId};
use std::collections::HashSet;

/// Searches decay chains for terminal particles
///
/// Starting from each seed, the search tests the particle against the
/// terminal selector. A match is collected (once per particle identity) and
/// its branch ends there. A non-match is expanded through its decay vertex
/// into every outgoing particle, depth first. A vertex is expanded at most
/// once per call: decay graphs can reach the same vertex through sibling
/// branches, and the visited set is also the only guard the search needs
/// against cyclic records.
///
/// Results come back in depth-first discovery order, seeds in input order.
pub struct SignalSearcher {
    terminal: Box<dyn ParticleSelector>,
}

impl SignalSearcher {
    /// Create a searcher that stops at particles accepted by `terminal`
    pub fn new(terminal: Box<dyn ParticleSelector>) -> Self {
        Self { terminal }
    }

    /// Collect the terminal descendants of the seed particles
    ///
    /// All search state (visited vertices, result de-duplication) is scoped
    /// to this call. Seeds that already satisfy the terminal selector are
    /// returned as they are; seeds with no decay vertex and no match are dead
    /// ends and contribute nothing.
    ///
    /// The traversal uses an explicit work stack instead of recursion, so
    /// deep decay chains cannot exhaust the call stack.
    pub fn search(&self, event: &Event, seeds: &[ParticleId]) -> Vec<ParticleId> {
        let mut found: Vec<ParticleId> = Vec::new();
        let mut found_set: HashSet<ParticleId> = HashSet::new();
        let mut visited: HashSet<VertexId> = HashSet::new();

        // reversed so the stack pops seeds in input order
        let mut stack: Vec<ParticleId> = seeds.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let particle = event.particle(id);

            if self.terminal.selects(particle) {
                if found_set.insert(id) {
                    found.push(id);
                }
                continue;
            }

            if let Some(vertex_id) = particle.end_vertex {
                // only expand a vertex the first time any branch reaches it
                if visited.insert(vertex_id) {
                    let vertex = event.vertex(vertex_id);
                    for &child in vertex.particles_out.iter().rev() {
                        stack.push(child);
                    }
                }
            }
            // no vertex and no match: dead end, nothing to contribute
        }

        log::debug!(
            "signal search: {} seeds -> {} terminal particles ({} vertices expanded)",
            seeds.len(),
            found.len(),
            visited.len()
        );

        found
    }
}
