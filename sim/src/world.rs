//! Simulation snapshot types.
//!
//! The `Snapshot` struct provides a serializable, owned view of the encounter
//! that can be handed to a renderer or wagering front end. Snapshots are copies:
//! mutating one never feeds back into the simulation. JSON encoding lives in
//! `systems::serialization`.

use crate::components::*;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot of a single fighter's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub name: String,
    pub color: String,
    pub kind: WeaponKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    pub range: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    pub spread: f32,
    pub fire_cooldown: f32,
    pub fire_timer: f32,
    pub alive: bool,
}

impl FighterSnapshot {
    /// Read a fighter entity. Returns `None` if it lacks fighter components.
    pub fn from_entity(world: &World, entity: Entity) -> Option<Self> {
        let name = world.get::<FighterName>(entity)?;
        let color = world.get::<FighterColor>(entity)?;
        let kind = world.get::<WeaponKind>(entity)?;
        let pos = world.get::<Position>(entity)?;
        let vel = world.get::<Velocity>(entity)?;
        let heading = world.get::<Heading>(entity)?;
        let health = world.get::<Health>(entity)?;
        let stats = world.get::<CombatStats>(entity)?;
        let fire = world.get::<FireControl>(entity)?;

        Some(Self {
            name: name.0.clone(),
            color: color.0.clone(),
            kind: *kind,
            position: pos.0,
            velocity: vel.0,
            heading: heading.0,
            hp: health.current,
            max_hp: health.max,
            speed: stats.speed,
            range: stats.range,
            damage: stats.damage,
            projectile_speed: stats.projectile_speed,
            spread: stats.spread,
            fire_cooldown: fire.cooldown,
            fire_timer: fire.timer,
            alive: health.alive,
        })
    }

    /// Hit points clamped at zero, for display and ratios.
    pub fn display_hp(&self) -> f32 {
        self.hp.max(0.0)
    }

    /// Health ratio clamped to `[0, 1]`.
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        }
    }
}

/// Projectiles are plain values already; a snapshot is a clone.
pub type ProjectileSnapshot = Projectile;

/// Complete encounter snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of completed `advance` calls.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub time: f32,
    /// Every fighter in roster order, dead ones included.
    pub fighters: Vec<FighterSnapshot>,
    /// Live projectiles.
    pub projectiles: Vec<ProjectileSnapshot>,
}

impl Snapshot {
    /// Create a snapshot from the ECS world, reading fighters in `roster` order.
    pub fn from_world(
        world: &World,
        roster: &[Entity],
        projectiles: &[Projectile],
        tick: u64,
        time: f32,
    ) -> Self {
        let fighters = roster
            .iter()
            .filter_map(|&entity| FighterSnapshot::from_entity(world, entity))
            .collect();

        Self {
            tick,
            time,
            fighters,
            projectiles: projectiles.to_vec(),
        }
    }
}
