//! Impact-effect engine: turns an asteroid scenario and a delta-v into before/after orbital
//! elements and the comparison consumed by presentation layers.

pub mod changes;
pub mod determination;
pub mod error;
pub mod physical;
pub mod pipeline;
pub mod scenario;
pub mod trajectory;

pub use facade::*;
pub use impactor_impulsive as impulsive;
pub use impactor_orbits as orbits;

mod facade;
