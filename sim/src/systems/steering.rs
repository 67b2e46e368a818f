//! Steering system - nearest-enemy targeting and composite movement.
//!
//! Each alive fighter picks the closest living opponent, then blends three
//! desires into one heading: pursue the target, drift toward the arena center,
//! and push away from whichever edge is near. Fighters are processed in roster
//! order and positions are updated in place, so a fighter later in the roster
//! targets against the already-moved positions of those before it.

use crate::components::*;
use bevy_ecs::prelude::*;

/// Velocities are expressed per 1/60 s; this rescales them to real seconds.
pub const FRAME_RATE_NORMALIZATION: f32 = 60.0;

/// Fighters are kept this far inside every arena edge.
pub const ARENA_MARGIN: f32 = 16.0;

/// Weight applied to the edge-avoidance vector (negative = push away).
const EDGE_AVOID_WEIGHT: f32 = -0.6;

/// Resource containing the delta time for the current tick.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DeltaTime(pub f32);

/// Arena extents. The arena spans `[0, width] × [0, height]`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

impl ArenaBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point into the playable area `[16, w-16] × [16, h-16]`.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.max(ARENA_MARGIN).min(self.width - ARENA_MARGIN),
            p.y.max(ARENA_MARGIN).min(self.height - ARENA_MARGIN),
        )
    }

    /// Per-axis offset from the center scaled to `[-1, 1]`; reaches ±1 at an edge.
    pub fn edge_pressure(&self, p: Vec2) -> Vec2 {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Vec2::new(
            ((p.x - half_w) / half_w).clamp(-1.0, 1.0),
            ((p.y - half_h) / half_h).clamp(-1.0, 1.0),
        )
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Fighter entities in roster order. Every per-fighter pass iterates this list,
/// never the raw query, so tie-breaks follow configuration order.
#[derive(Resource, Debug, Default, Clone)]
pub struct Roster(pub Vec<Entity>);

/// Index of the nearest alive fighter other than `me`.
///
/// Strict `<` keeps the first candidate in roster order on equal distances.
pub fn nearest_enemy(field: &[(Entity, Vec2, bool)], me: usize) -> Option<usize> {
    let origin = field[me].1;
    let mut best: Option<(usize, f32)> = None;
    for (j, &(_, pos, alive)) in field.iter().enumerate() {
        if j == me || !alive {
            continue;
        }
        let dist = origin.distance_to(pos);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((j, dist)),
        }
    }
    best.map(|(j, _)| j)
}

/// Unit desired-travel direction for a fighter at `pos` chasing `target`.
pub fn desired_direction(pos: Vec2, target: Vec2, arena: &ArenaBounds) -> Vec2 {
    let pursue = (target - pos).normalized();
    let center = (arena.center() - pos).normalized();
    let avoid = arena.edge_pressure(pos) * EDGE_AVOID_WEIGHT;
    (pursue + center + avoid).normalized()
}

/// System that retargets, steers and moves every alive fighter, and runs down
/// fire timers.
///
/// ## Data Access
/// - Reads: DeltaTime, ArenaBounds, Roster, Health, CombatStats
/// - Writes: Position, Velocity, Heading, FireControl, Target
pub fn steering_system(
    dt: Res<DeltaTime>,
    arena: Res<ArenaBounds>,
    roster: Res<Roster>,
    mut query: Query<(
        &mut Position,
        &mut Velocity,
        &mut Heading,
        &mut FireControl,
        &mut Target,
        &Health,
        &CombatStats,
    )>,
) {
    let delta = dt.0;

    let mut field: Vec<(Entity, Vec2, bool)> = roster
        .0
        .iter()
        .filter_map(|&entity| {
            query
                .get(entity)
                .ok()
                .map(|(pos, _, _, _, _, health, _)| (entity, pos.0, health.is_alive()))
        })
        .collect();

    for i in 0..field.len() {
        let (entity, _, alive) = field[i];
        if !alive {
            continue;
        }
        let Ok((mut pos, mut vel, mut heading, mut fire, mut target, _, stats)) =
            query.get_mut(entity)
        else {
            continue;
        };

        // Reload runs even when there is nobody left to shoot at.
        fire.tick(delta);

        let Some(j) = nearest_enemy(&field, i) else {
            target.0 = None;
            continue;
        };
        let (target_entity, target_pos, _) = field[j];
        target.0 = Some(target_entity);

        vel.0 = desired_direction(pos.0, target_pos, &arena) * stats.speed;
        pos.0 = arena.clamp(pos.0 + vel.0 * delta * FRAME_RATE_NORMALIZATION);
        heading.0 = (target_pos - pos.0).angle();

        field[i].1 = pos.0;
    }
}
