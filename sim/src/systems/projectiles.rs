//! Projectile system - integration, expiry and first-contact collision.
//!
//! Projectiles live in a dense `Vec` inside the `Projectiles` resource. Spent
//! projectiles (expired or hit) are collected during the pass and removed
//! afterwards with `swap_remove`, highest index first, so no projectile is
//! skipped or visited twice within a tick and the store is never rebuilt.

use crate::components::*;
use crate::systems::steering::{DeltaTime, Roster, FRAME_RATE_NORMALIZATION};
use bevy_ecs::prelude::*;
use tracing::{debug, info};

/// Radius of a fighter's hit circle. A projectile connects when its center is
/// closer than `FIGHTER_HIT_RADIUS + projectile.radius`.
pub const FIGHTER_HIT_RADIUS: f32 = 8.0;

/// Dense store of live projectiles.
#[derive(Resource, Debug, Default, Clone)]
pub struct Projectiles {
    live: Vec<Projectile>,
}

impl Projectiles {
    pub fn push(&mut self, projectile: Projectile) {
        self.live.push(projectile);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.live.iter()
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.live
    }

    /// Remove the given indices. `spent` must be strictly ascending.
    fn remove_spent(&mut self, spent: &[usize]) {
        for &idx in spent.iter().rev() {
            self.live.swap_remove(idx);
        }
    }
}

/// System that moves every projectile, expires it by lifetime and resolves hits.
///
/// Each surviving projectile is tested against alive fighters in roster order,
/// skipping its owner; the first fighter in contact takes the damage and the
/// projectile is spent.
///
/// ## Data Access
/// - Reads: DeltaTime, Roster, Position, FighterName
/// - Writes: Projectiles, Health
pub fn projectile_system(
    dt: Res<DeltaTime>,
    roster: Res<Roster>,
    mut projectiles: ResMut<Projectiles>,
    mut fighters: Query<(&Position, &mut Health, &FighterName)>,
) {
    let delta = dt.0;
    let mut spent = Vec::new();

    for (idx, p) in projectiles.live.iter_mut().enumerate() {
        p.ttl -= delta;
        p.position += p.velocity * delta * FRAME_RATE_NORMALIZATION;
        if p.ttl <= 0.0 {
            spent.push(idx);
            continue;
        }

        for (index, &entity) in roster.0.iter().enumerate() {
            if index as u32 == p.owner {
                continue;
            }
            let Ok((pos, mut health, name)) = fighters.get_mut(entity) else {
                continue;
            };
            if !health.is_alive() {
                continue;
            }
            if pos.0.distance_to(p.position) < FIGHTER_HIT_RADIUS + p.radius {
                let killed = health.damage(p.damage);
                debug!(victim = %name.0, damage = p.damage, hp = health.current, "fighter hit");
                if killed {
                    info!(victim = %name.0, hp = health.current, "fighter eliminated");
                }
                spent.push(idx);
                break;
            }
        }
    }

    projectiles.remove_spent(&spent);
}
