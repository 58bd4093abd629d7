//! Re-exported APIs for consumers of the engine crate.

pub use crate::changes::{ChangeEntry, ChangeKey, OrbitalChange, OrbitalChanges, compute_changes};
pub use crate::determination::{DeterminedOrbit, Period, determine_orbit};
pub use crate::error::{ErrorKind, Failure, ImpactError};
pub use crate::physical::{estimate_mass, maneuver_cost, mean_diameter};
pub use crate::pipeline::{ImpactResult, compute_impact_result};
pub use crate::scenario::{ApplicationPoint, DeltaVSpec, ImpactScenario, scenario_from_lookup};
pub use crate::trajectory::TrajectoryPlot;
pub use impactor_config::{AsteroidLookup, EngineConfig, LookupError};
pub use impactor_impulsive::{ImpulseDirection, KineticImpactor};
