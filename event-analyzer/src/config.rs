//! Analysis configuration
//!
//! Serde-friendly descriptions of a whole analysis: which categories to
//! register, which observables to bind, and whether to run a decay-chain
//! signal search. The application layer deserializes these from TOML; library
//! users can assemble them through the builder methods instead.

use crate::analyzer::EventAnalyzer;
use crate::observables::{InvariantMass, Observable, ScalarPtSum};
use crate::search::SignalSearcher;
use crate::selectors::{AllSelector, ParticleSelector, SpeciesSelector, StatusSelector};
use crate::types::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};

/// Declarative form of a particle selector
///
/// `build` turns the description into a boxed selector; `all-of` nests
/// recursively, mirroring [`AllSelector`] composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SelectorConfig {
    /// Final-state stable particles (status 1)
    FinalState,
    /// Incoming hard-process particles (status 21)
    InitialState,
    /// Outgoing hard-process particles (status 23)
    HardProcessOutgoing,
    /// Any producer-defined status code
    Status { code: i32 },
    /// The charged-species preset, optionally extended with more PIDs
    Charged {
        #[serde(default)]
        extra_pids: Vec<i32>,
    },
    /// An explicit species set (must not be empty)
    Species { pids: Vec<i32> },
    /// Logical AND over sub-selectors (empty list selects everything)
    AllOf { of: Vec<SelectorConfig> },
}

impl SelectorConfig {
    /// Build the runtime selector this configuration describes
    pub fn build(&self) -> Result<Box<dyn ParticleSelector>> {
        match self {
            SelectorConfig::FinalState => Ok(Box::new(StatusSelector::final_state())),
            SelectorConfig::InitialState => Ok(Box::new(StatusSelector::initial_state())),
            SelectorConfig::HardProcessOutgoing => {
                Ok(Box::new(StatusSelector::hard_process_outgoing()))
            }
            SelectorConfig::Status { code } => Ok(Box::new(StatusSelector::new(*code))),
            SelectorConfig::Charged { extra_pids } => {
                let mut selector = SpeciesSelector::charged();
                for &pid in extra_pids {
                    selector.add_pid(pid);
                }
                Ok(Box::new(selector))
            }
            SelectorConfig::Species { pids } => {
                if pids.is_empty() {
                    return Err(AnalyzerError::InvalidConfig(
                        "species selector needs at least one PID".into(),
                    ));
                }
                Ok(Box::new(SpeciesSelector::new(pids.iter().copied())))
            }
            SelectorConfig::AllOf { of } => {
                let mut selectors = Vec::with_capacity(of.len());
                for sub in of {
                    selectors.push(sub.build()?);
                }
                Ok(Box::new(AllSelector::new(selectors)))
            }
        }
    }

    /// Shorthand for the classic "final state AND charged" selection
    pub fn final_charged() -> Self {
        SelectorConfig::AllOf {
            of: vec![
                SelectorConfig::FinalState,
                SelectorConfig::Charged { extra_pids: vec![] },
            ],
        }
    }
}

/// One category registration: a label bound to a selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub label: String,
    pub selector: SelectorConfig,
}

/// Observable implementations known to the configuration layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservableKind {
    InvariantMass,
    ScalarPtSum,
}

impl ObservableKind {
    pub fn build(&self) -> Box<dyn Observable> {
        match self {
            ObservableKind::InvariantMass => Box::new(InvariantMass),
            ObservableKind::ScalarPtSum => Box::new(ScalarPtSum),
        }
    }
}

/// One observable binding: a name, an implementation, and the category it is
/// evaluated over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservableConfig {
    pub name: String,
    pub kind: ObservableKind,
    /// Category label whose particles feed the observable
    pub category: String,
}

/// Decay-chain signal search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Category whose particles seed the search
    pub seed_category: String,
    /// Selector that terminal particles must satisfy
    pub terminal: SelectorConfig,
}

/// A complete analysis description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Categories in registration (priority) order
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,

    /// Named observables
    #[serde(default)]
    pub observables: Vec<ObservableConfig>,

    /// Optional decay-chain signal search
    #[serde(default)]
    pub signal: Option<SignalConfig>,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: append a category
    pub fn with_category(mut self, label: impl Into<String>, selector: SelectorConfig) -> Self {
        self.categories.push(CategoryConfig {
            label: label.into(),
            selector,
        });
        self
    }

    /// Builder method: bind an observable to a category
    pub fn with_observable(
        mut self,
        name: impl Into<String>,
        kind: ObservableKind,
        category: impl Into<String>,
    ) -> Self {
        self.observables.push(ObservableConfig {
            name: name.into(),
            kind,
            category: category.into(),
        });
        self
    }

    /// Builder method: enable the signal search
    pub fn with_signal(
        mut self,
        seed_category: impl Into<String>,
        terminal: SelectorConfig,
    ) -> Self {
        self.signal = Some(SignalConfig {
            seed_category: seed_category.into(),
            terminal,
        });
        self
    }

    /// Assemble a ready-to-use analyzer
    ///
    /// Rejects configurations that register the same category label twice;
    /// the analyzer's replace-on-reregister behavior is meant for
    /// programmatic use, and a duplicate label in one declarative
    /// configuration is always a mistake.
    pub fn build_analyzer(&self) -> Result<EventAnalyzer> {
        let mut analyzer = EventAnalyzer::new();
        for category in &self.categories {
            if analyzer.category_labels().any(|l| l == category.label) {
                return Err(AnalyzerError::DuplicateCategory(category.label.clone()));
            }
            analyzer.register_category(category.label.clone(), category.selector.build()?);
        }
        for observable in &self.observables {
            analyzer.register_observable(observable.name.clone(), observable.kind.build());
        }
        log::info!(
            "assembled analyzer: {} categories, {} observables",
            self.categories.len(),
            self.observables.len()
        );
        Ok(analyzer)
    }

    /// Build the signal searcher, if one is configured
    pub fn build_searcher(&self) -> Result<Option<SignalSearcher>> {
        match &self.signal {
            Some(signal) => Ok(Some(SignalSearcher::new(signal.terminal.build()?))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Event, FourMomentum, Particle};

    #[test]
    fn test_selector_config_builds() {
        let config = SelectorConfig::AllOf {
            of: vec![
                SelectorConfig::FinalState,
                SelectorConfig::Charged {
                    extra_pids: vec![3222],
                },
            ],
        };
        let selector = config.build().unwrap();

        let pion = Particle::new(FourMomentum::new(1.0, 0.0, 0.0, 1.0), 211, 1);
        let sigma = Particle::new(FourMomentum::new(1.0, 0.0, 0.0, 1.3), -3222, 1);
        let photon = Particle::new(FourMomentum::new(1.0, 0.0, 0.0, 1.0), 22, 1);
        assert!(selector.selects(&pion));
        assert!(selector.selects(&sigma));
        assert!(!selector.selects(&photon));
    }

    #[test]
    fn test_empty_species_rejected() {
        let config = SelectorConfig::Species { pids: vec![] };
        assert!(matches!(
            config.build(),
            Err(AnalyzerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let config = AnalysisConfig::new()
            .with_category("final", SelectorConfig::FinalState)
            .with_category("final", SelectorConfig::InitialState);
        assert!(matches!(
            config.build_analyzer(),
            Err(AnalyzerError::DuplicateCategory(_))
        ));
    }

    #[test]
    fn test_full_config_round_trips_through_json() {
        let config = AnalysisConfig::new()
            .with_category("final", SelectorConfig::final_charged())
            .with_category("initial", SelectorConfig::InitialState)
            .with_category("hard-process", SelectorConfig::HardProcessOutgoing)
            .with_observable("q2", ObservableKind::InvariantMass, "hard-process")
            .with_signal("hard-process", SelectorConfig::final_charged());

        let json = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_built_analyzer_classifies() {
        let config = AnalysisConfig::new()
            .with_category("final", SelectorConfig::final_charged())
            .with_category("initial", SelectorConfig::InitialState)
            .with_observable("q2", ObservableKind::InvariantMass, "final");
        let analyzer = config.build_analyzer().unwrap();

        let mut event = Event::new();
        event.add_particle(Particle::new(FourMomentum::new(2.0, 0.0, 0.0, 2.1), 211, 1));
        event.add_particle(Particle::new(
            FourMomentum::new(0.0, 0.0, 100.0, 100.0),
            2212,
            21,
        ));

        let classification = analyzer.analyze(&event);
        assert_eq!(classification.particles_of("final").len(), 1);
        assert_eq!(classification.particles_of("initial").len(), 1);
        assert!(analyzer.evaluate_observable(&event, &classification, "q2", "final") > 0.0);
    }

    #[test]
    fn test_searcher_built_only_when_configured() {
        let without = AnalysisConfig::new();
        assert!(without.build_searcher().unwrap().is_none());

        let with = AnalysisConfig::new().with_signal("hard-process", SelectorConfig::FinalState);
        assert!(with.build_searcher().unwrap().is_some());
    }
}
