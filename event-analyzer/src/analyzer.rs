//! Event analyzer
//!
//! This module provides the classification engine. The [`EventAnalyzer`]
//! holds the run-scoped configuration (ordered category registry plus named
//! observables) and produces one [`EventClassification`] per analyzed event.
//! The analyzer itself never mutates during analysis, so classifying the same
//! event twice yields identical results and a future per-event worker pool
//! can share one analyzer read-only.

use crate::observables::Observable;
use crate::selectors::ParticleSelector;
use crate::types::{Event, Particle, ParticleId};
use std::collections::HashMap;

/// Value returned when an observable name or category label is unknown
pub const OBSERVABLE_SENTINEL: f64 = -1.0;

struct Category {
    label: String,
    selector: Box<dyn ParticleSelector>,
}

/// Classifies an event's particles into named categories
///
/// Categories are tested in registration order and a particle is assigned to
/// the FIRST category whose selector accepts it, so overlapping selectors
/// shadow later registrations instead of producing multi-membership. Callers
/// that want "final AND charged" therefore register one composite selector
/// rather than two separate categories.
///
/// # Example
/// ```
/// use event_analyzer::{AllSelector, EventAnalyzer, SpeciesSelector, StatusSelector};
///
/// let mut analyzer = EventAnalyzer::new();
/// analyzer.register_category(
///     "final",
///     Box::new(AllSelector::new(vec![
///         Box::new(StatusSelector::final_state()),
///         Box::new(SpeciesSelector::charged()),
///     ])),
/// );
/// analyzer.register_category("initial", Box::new(StatusSelector::initial_state()));
/// ```
#[derive(Default)]
pub struct EventAnalyzer {
    /// Registration order doubles as match priority
    categories: Vec<Category>,
    observables: HashMap<String, Box<dyn Observable>>,
}

impl EventAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category under a label
    ///
    /// Re-registering an existing label replaces its selector in place, so the
    /// original registration position keeps its match priority.
    pub fn register_category(
        &mut self,
        label: impl Into<String>,
        selector: Box<dyn ParticleSelector>,
    ) {
        let label = label.into();
        if let Some(existing) = self.categories.iter_mut().find(|c| c.label == label) {
            log::debug!("replacing selector for category '{}'", label);
            existing.selector = selector;
        } else {
            log::debug!("registered category '{}'", label);
            self.categories.push(Category { label, selector });
        }
    }

    /// Register an observable under a name
    pub fn register_observable(&mut self, name: impl Into<String>, observable: Box<dyn Observable>) {
        self.observables.insert(name.into(), observable);
    }

    /// Labels of all registered categories, in registration order
    pub fn category_labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }

    /// Number of registered categories
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Classify every particle in the event
    ///
    /// Single pass in insertion order; each particle lands in at most one
    /// category (first match wins) and particles matching nothing are
    /// dropped. Every category list is then sorted by descending transverse
    /// momentum with a stable sort, so equal-pT particles keep event order.
    pub fn analyze(&self, event: &Event) -> EventClassification {
        let mut lists: Vec<Vec<ParticleId>> = vec![Vec::new(); self.categories.len()];

        let mut assigned = 0usize;
        for (id, particle) in event.particles() {
            if let Some(slot) = self
                .categories
                .iter()
                .position(|c| c.selector.selects(particle))
            {
                lists[slot].push(id);
                assigned += 1;
            }
        }

        for list in &mut lists {
            list.sort_by(|&a, &b| {
                event
                    .particle(b)
                    .pt()
                    .total_cmp(&event.particle(a).pt())
            });
        }

        log::debug!(
            "classified {} of {} particles into {} categories",
            assigned,
            event.particle_count(),
            self.categories.len()
        );

        EventClassification {
            categories: self
                .categories
                .iter()
                .zip(lists)
                .map(|(c, list)| (c.label.clone(), list))
                .collect(),
        }
    }

    /// Evaluate a named observable over a category of a classified event
    ///
    /// Absence is not an error: an unknown observable name or category label
    /// yields [`OBSERVABLE_SENTINEL`]. A known but empty category is
    /// evaluated normally (the invariant mass of nothing is 0).
    pub fn evaluate_observable(
        &self,
        event: &Event,
        classification: &EventClassification,
        name: &str,
        label: &str,
    ) -> f64 {
        match (self.observables.get(name), classification.get(label)) {
            (Some(observable), Some(ids)) => {
                let particles: Vec<&Particle> =
                    ids.iter().map(|&id| event.particle(id)).collect();
                observable.evaluate(&particles)
            }
            _ => {
                log::trace!(
                    "observable '{}' over category '{}' not registered",
                    name,
                    label
                );
                OBSERVABLE_SENTINEL
            }
        }
    }
}

/// Per-event classification result
///
/// Owns the category particle lists for exactly one event; the next event's
/// analysis produces a fresh one, so no state ever leaks across events.
#[derive(Debug, Clone, PartialEq)]
pub struct EventClassification {
    /// (label, sorted particle handles), in registration order
    categories: Vec<(String, Vec<ParticleId>)>,
}

impl EventClassification {
    /// Particles of a category, sorted by descending pT
    ///
    /// Unknown labels are a valid query and yield the empty slice.
    pub fn particles_of(&self, label: &str) -> &[ParticleId] {
        self.get(label).unwrap_or(&[])
    }

    /// Like [`particles_of`](Self::particles_of), but distinguishing an
    /// unknown label from a registered-but-empty category
    pub fn get(&self, label: &str) -> Option<&[ParticleId]> {
        self.categories
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, list)| list.as_slice())
    }

    /// Category labels in registration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(l, _)| l.as_str())
    }

    /// Resolve a category to borrowed particles, in list order
    pub fn resolve<'e>(&self, event: &'e Event, label: &str) -> Vec<&'e Particle> {
        self.particles_of(label)
            .iter()
            .map(|&id| event.particle(id))
            .collect()
    }

    /// Total number of particles assigned across all categories
    pub fn assigned_count(&self) -> usize {
        self.categories.iter().map(|(_, list)| list.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::{AllSelector, SpeciesSelector, StatusSelector};
    use crate::types::{FourMomentum, Particle};
    use std::collections::HashSet;

    fn particle(pt: f64, pid: i32, status: i32) -> Particle {
        Particle::new(FourMomentum::new(pt, 0.0, 1.0, pt + 2.0), pid, status)
    }

    fn analyzer() -> EventAnalyzer {
        let mut analyzer = EventAnalyzer::new();
        analyzer.register_category(
            "final",
            Box::new(AllSelector::new(vec![
                Box::new(StatusSelector::final_state()),
                Box::new(SpeciesSelector::charged()),
            ])),
        );
        analyzer.register_category("initial", Box::new(StatusSelector::initial_state()));
        analyzer.register_category(
            "hard-process",
            Box::new(StatusSelector::hard_process_outgoing()),
        );
        analyzer
    }

    fn event() -> Event {
        let mut event = Event::new();
        event.add_particle(particle(5.0, 211, 1));
        event.add_particle(particle(20.0, 2212, 21));
        event.add_particle(particle(12.0, 13, 1));
        event.add_particle(particle(30.0, 5, 23));
        event.add_particle(particle(7.0, 22, 1)); // photon: matches nothing
        event.add_particle(particle(40.0, -11, 1));
        event
    }

    #[test]
    fn test_first_match_exclusivity() {
        let analyzer = analyzer();
        let event = event();
        let classification = analyzer.analyze(&event);

        let mut seen = HashSet::new();
        for label in classification.labels().collect::<Vec<_>>() {
            for &id in classification.particles_of(label) {
                assert!(seen.insert(id), "particle assigned to two categories");
            }
        }
        // the photon matched no category and was dropped
        assert_eq!(classification.assigned_count(), event.particle_count() - 1);
    }

    #[test]
    fn test_sorted_by_descending_pt() {
        let analyzer = analyzer();
        let event = event();
        let classification = analyzer.analyze(&event);

        let pts: Vec<f64> = classification
            .resolve(&event, "final")
            .iter()
            .map(|p| p.pt())
            .collect();
        assert_eq!(pts, vec![40.0, 12.0, 5.0]);
    }

    #[test]
    fn test_equal_pt_keeps_event_order() {
        let mut analyzer = EventAnalyzer::new();
        analyzer.register_category("final", Box::new(StatusSelector::final_state()));

        let mut event = Event::new();
        let first = event.add_particle(particle(10.0, 211, 1));
        let second = event.add_particle(particle(10.0, 13, 1));
        let third = event.add_particle(particle(10.0, 321, 1));

        let classification = analyzer.analyze(&event);
        assert_eq!(
            classification.particles_of("final"),
            &[first, second, third]
        );
    }

    #[test]
    fn test_overlapping_categories_shadow() {
        let mut analyzer = EventAnalyzer::new();
        // both selectors accept every final-state particle; the first one
        // registered takes all of them
        analyzer.register_category("winner", Box::new(StatusSelector::final_state()));
        analyzer.register_category("shadowed", Box::new(StatusSelector::final_state()));

        let mut event = Event::new();
        event.add_particle(particle(1.0, 211, 1));
        event.add_particle(particle(2.0, 13, 1));

        let classification = analyzer.analyze(&event);
        assert_eq!(classification.particles_of("winner").len(), 2);
        assert!(classification.particles_of("shadowed").is_empty());
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut analyzer = analyzer();
        // "final" now takes everything with status 1, charged or not
        analyzer.register_category("final", Box::new(StatusSelector::final_state()));
        assert_eq!(analyzer.category_count(), 3);
        assert_eq!(
            analyzer.category_labels().collect::<Vec<_>>(),
            vec!["final", "initial", "hard-process"]
        );

        let event = event();
        let classification = analyzer.analyze(&event);
        // the photon is picked up now
        assert_eq!(classification.particles_of("final").len(), 4);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let analyzer = analyzer();
        let event = event();
        let first = analyzer.analyze(&event);
        let second = analyzer.analyze(&event);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_label_is_empty_not_error() {
        let analyzer = analyzer();
        let classification = analyzer.analyze(&event());
        assert!(classification.particles_of("no-such-category").is_empty());
        assert!(classification.get("no-such-category").is_none());
        assert_eq!(classification.get("final").map(|l| l.len()), Some(3));
    }
}
