//! Public API for the simulation.
//!
//! `SimWorld` is the only thing a driver needs: build it from an
//! `EncounterConfig`, call `advance(dt)` once per host frame and query the
//! outcome, odds or a snapshot between steps.
//!
//! ## Tick order
//!
//! Each `advance` runs one chained schedule:
//! `steering_system → weapon_system → projectile_system`. Queries never run
//! systems and never mutate the world.

use crate::components::*;
use crate::config::{ConfigError, EncounterConfig};
use crate::systems::*;
use crate::world::{FighterSnapshot, ProjectileSnapshot, Snapshot};
use bevy_ecs::prelude::*;
use tracing::{debug, info, warn};

/// The main simulation world container.
///
/// Holds the ECS world and schedule, providing a clean API for:
/// - Building an encounter from configuration
/// - Stepping the encounter forward
/// - Read-only outcome, odds and snapshot queries
pub struct SimWorld {
    world: World,
    schedule: Schedule,
    /// Fighter entities in roster order.
    roster: Vec<Entity>,
    tick: u64,
    time: f32,
    /// Set once the encounter first reaches one or zero living fighters.
    decided: bool,
}

impl SimWorld {
    /// Validate `config` and spawn its roster.
    pub fn new(config: EncounterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(ArenaBounds::new(config.width, config.height));
        world.insert_resource(SimRng::seeded(config.seed));
        world.insert_resource(Projectiles::default());

        let roster: Vec<Entity> = config
            .fighters
            .iter()
            .map(|spec| world.spawn(spec.to_bundle()).id())
            .collect();
        world.insert_resource(Roster(roster.clone()));

        let mut schedule = Schedule::default();
        schedule.add_systems((steering_system, weapon_system, projectile_system).chain());

        debug!(
            fighters = roster.len(),
            width = config.width,
            height = config.height,
            seed = config.seed,
            "encounter created"
        );

        Ok(Self {
            world,
            schedule,
            roster,
            tick: 0,
            time: 0.0,
            decided: false,
        })
    }

    /// Step the encounter forward by `dt` seconds.
    ///
    /// Non-positive or non-finite `dt` is ignored. Stepping a decided encounter
    /// is allowed; survivors idle and in-flight projectiles keep flying.
    pub fn advance(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "ignoring non-positive frame delta");
            return;
        }

        self.world.resource_mut::<DeltaTime>().0 = dt;
        self.schedule.run(&mut self.world);
        self.tick += 1;
        self.time += dt;

        if !self.decided && self.alive_count() <= 1 {
            self.decided = true;
            let winner = self.winner().map(|w| w.name);
            info!(tick = self.tick, time = self.time, winner = ?winner, "encounter decided");
        }
    }

    /// Every roster fighter in roster order, dead ones included.
    pub fn live_fighters(&self) -> Vec<FighterSnapshot> {
        self.roster
            .iter()
            .filter_map(|&entity| FighterSnapshot::from_entity(&self.world, entity))
            .collect()
    }

    /// Projectiles still in flight after the last step.
    pub fn live_projectiles(&self) -> Vec<ProjectileSnapshot> {
        self.world.resource::<Projectiles>().as_slice().to_vec()
    }

    /// Current winner, see `outcome::decide_winner`.
    pub fn winner(&self) -> Option<FighterSnapshot> {
        decide_winner(&self.live_fighters()).cloned()
    }

    /// Live payout multiplier for `name`; `1.0` if no such fighter.
    pub fn odds_for(&self, name: &str) -> f32 {
        odds_for(&self.live_fighters(), name)
    }

    /// Odds for every fighter, roster order.
    pub fn odds_board(&self) -> Vec<(String, f32)> {
        odds_board(&self.live_fighters())
    }

    pub fn alive_count(&self) -> usize {
        self.roster
            .iter()
            .filter(|&&entity| self.world.get::<Health>(entity).is_some_and(|h| h.is_alive()))
            .count()
    }

    /// True once at most one fighter is alive.
    pub fn is_decided(&self) -> bool {
        self.alive_count() <= 1
    }

    /// Get a snapshot of the current simulation state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_world(
            &self.world,
            &self.roster,
            self.world.resource::<Projectiles>().as_slice(),
            self.tick,
            self.time,
        )
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&self) -> String {
        snapshot_to_json(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Number of completed `advance` calls.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds elapsed.
    pub fn elapsed(&self) -> f32 {
        self.time
    }

    pub fn arena(&self) -> ArenaBounds {
        *self.world.resource::<ArenaBounds>()
    }

    /// Get direct access to the ECS world (for advanced usage).
    pub fn world(&self) -> &World {
        &self.world
    }
}
