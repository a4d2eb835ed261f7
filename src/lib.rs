//! Agent-based predator/prey/plant ecosystem simulation on a bounded,
//! wrap-around 2D plane. The `World` owns the entity collections and drives
//! the per-tick update order; callers inject the clock, the seed, and the
//! configuration, and read back snapshots and population counts.

pub mod config;
pub mod constants;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod stamina;

pub use config::{SimulationConfig, SpeciesConfig, SprintConfig};
pub use entity::{Creature, Entity, Obstacle, Plant, Species};
pub use simulation::{EntityKind, EntityView, PopulationCounts, SimRng, World};
pub use stamina::SprintState;
