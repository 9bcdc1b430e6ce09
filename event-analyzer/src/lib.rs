//! Event Analyzer Library
//!
//! A stateless, reusable library for analyzing particle-physics event records
//! (directed acyclic decay graphs of particles connected by vertices).
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on analysis:
//! - Classifies an event's particles into named categories via composable
//!   selectors (first matching category wins, in registration order)
//! - Traces decay chains from seed particles to their terminal descendants
//! - Reduces particle collections to scalars through named observables
//!
//! The library does NOT:
//! - Read event files (the application layer materializes [`Event`]s)
//! - Cluster particles into jets (external jet-finding collaborator)
//! - Write tabular output
//! - Generate or simulate events
//!
//! All I/O and orchestration is in the application layer (event-cli).
//!
//! # Example Usage
//!
//! ```
//! use event_analyzer::{
//!     AnalysisConfig, Event, FourMomentum, ObservableKind, Particle, SelectorConfig,
//! };
//!
//! // Describe the analysis: categories, observables, signal search
//! let config = AnalysisConfig::new()
//!     .with_category("final", SelectorConfig::final_charged())
//!     .with_category("initial", SelectorConfig::InitialState)
//!     .with_category("hard-process", SelectorConfig::HardProcessOutgoing)
//!     .with_observable("q2", ObservableKind::InvariantMass, "hard-process")
//!     .with_signal("hard-process", SelectorConfig::final_charged());
//!
//! let analyzer = config.build_analyzer().unwrap();
//! let searcher = config.build_searcher().unwrap().unwrap();
//!
//! // Events come from an external source; build a tiny one by hand
//! let mut event = Event::new();
//! event.add_particle(Particle::new(FourMomentum::new(3.0, 0.0, 1.0, 3.2), 211, 1));
//!
//! let classification = analyzer.analyze(&event);
//! let signal = searcher.search(&event, classification.particles_of("hard-process"));
//! let q2 = analyzer.evaluate_observable(&event, &classification, "q2", "hard-process");
//! assert_eq!(signal.len(), 0);
//! assert_eq!(q2, 0.0);
//! ```

// Public modules
pub mod analyzer;
pub mod config;
pub mod observables;
pub mod search;
pub mod selectors;
pub mod types;

// Re-export main types for convenience
pub use analyzer::{EventAnalyzer, EventClassification, OBSERVABLE_SENTINEL};
pub use config::{
    AnalysisConfig, CategoryConfig, ObservableConfig, ObservableKind, SelectorConfig, SignalConfig,
};
pub use observables::{InvariantMass, Observable, ScalarPtSum};
pub use search::SignalSearcher;
pub use selectors::{AllSelector, ParticleSelector, SpeciesSelector, StatusSelector};
pub use types::{
    AnalyzerError, Event, FourMomentum, Particle, ParticleId, Result, Vertex, VertexId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
