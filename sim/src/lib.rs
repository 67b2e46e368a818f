//! Arena Wager - Simulation Core
//!
//! A seeded, single-writer ECS simulation of a free-for-all arena encounter:
//! fighters steer, fire archetype-specific volleys and trade projectiles until
//! at most one is left, while a live odds line tracks the field.
//! Uses `bevy_ecs` for the entity-component-system architecture.

pub mod api;
pub mod components;
pub mod config;
pub mod render_bridge;
pub mod systems;
pub mod world;

pub use api::SimWorld;
pub use components::*;
pub use config::{ArchetypeBaseline, ConfigError, EncounterConfig, FighterSpec, StatMultipliers};
pub use systems::*;
pub use world::{FighterSnapshot, ProjectileSnapshot, Snapshot};
