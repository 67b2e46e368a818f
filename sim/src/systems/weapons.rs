//! Weapon system - per-archetype firing.
//!
//! Firing is table-driven: every `WeaponKind` maps to one `WeaponProfile`
//! describing its volley (projectile count, damage/speed multipliers, lifetime,
//! collision radius, spread policy, cooldown multiplier). The system only
//! decides *whether* a fighter fires; `fire_volley` decides *what* comes out.
//!
//! ## Archetype Table
//!
//! | Kind         | Count | Damage | TTL | Radius | Speed | Spread      | Cooldown |
//! |--------------|-------|--------|-----|--------|-------|-------------|----------|
//! | blaster      | 1     | 1.0    | 2.5 | 2.0    | 1.0   | none        | 1.0      |
//! | sniper       | 1     | 2.2    | 3.5 | 2.5    | 1.0   | none        | 1.8      |
//! | shotgun      | 6     | 0.5    | 0.8 | 2.8    | 0.9   | ±spread/2   | 1.2      |
//! | rocket       | 1     | 1.0    | 2.2 | 4.0    | 1.0   | none        | 1.6      |
//! | flamethrower | 10    | 0.25   | 0.5 | 2.2    | 0.6   | ±spread     | 0.6      |
//! | laser        | 1     | 0.7    | 0.4 | 1.6    | 1.5   | none        | 0.4      |
//!
//! Rockets differ from blasters only by radius, lifetime and reload; they hit a
//! single fighter like everything else.

use crate::components::*;
use crate::systems::projectiles::Projectiles;
use crate::systems::steering::Roster;
use bevy_ecs::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Seeded random source for spread jitter. The only randomness in the engine.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::seeded(0)
    }
}

/// How a volley perturbs the aim angle of each projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadPolicy {
    /// Every projectile flies straight down the aim line.
    None,
    /// Uniform offset in `[-spread/2, spread/2)`.
    HalfArc,
    /// Uniform offset in `[-spread, spread)`.
    FullArc,
}

impl SpreadPolicy {
    /// Draw one angle offset. `None` never touches the generator.
    pub fn sample<R: Rng + ?Sized>(self, spread: f32, rng: &mut R) -> f32 {
        match self {
            SpreadPolicy::None => 0.0,
            SpreadPolicy::HalfArc => (rng.gen::<f32>() - 0.5) * spread,
            SpreadPolicy::FullArc => (rng.gen::<f32>() - 0.5) * 2.0 * spread,
        }
    }
}

/// Kinematic and damage profile of one archetype's volley.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    pub projectiles: u32,
    pub damage_mult: f32,
    pub ttl: f32,
    pub radius: f32,
    pub speed_mult: f32,
    pub spread: SpreadPolicy,
    pub cooldown_mult: f32,
}

const STANDARD: WeaponProfile = WeaponProfile {
    projectiles: 1,
    damage_mult: 1.0,
    ttl: 2.5,
    radius: 2.0,
    speed_mult: 1.0,
    spread: SpreadPolicy::None,
    cooldown_mult: 1.0,
};

impl WeaponKind {
    pub const fn profile(self) -> WeaponProfile {
        match self {
            WeaponKind::Blaster => STANDARD,
            WeaponKind::Sniper => WeaponProfile {
                damage_mult: 2.2,
                ttl: 3.5,
                radius: 2.5,
                cooldown_mult: 1.8,
                ..STANDARD
            },
            WeaponKind::Shotgun => WeaponProfile {
                projectiles: 6,
                damage_mult: 0.5,
                ttl: 0.8,
                radius: 2.8,
                speed_mult: 0.9,
                spread: SpreadPolicy::HalfArc,
                cooldown_mult: 1.2,
            },
            WeaponKind::Rocket => WeaponProfile {
                ttl: 2.2,
                radius: 4.0,
                cooldown_mult: 1.6,
                ..STANDARD
            },
            WeaponKind::Flamethrower => WeaponProfile {
                projectiles: 10,
                damage_mult: 0.25,
                ttl: 0.5,
                radius: 2.2,
                speed_mult: 0.6,
                spread: SpreadPolicy::FullArc,
                cooldown_mult: 0.6,
            },
            WeaponKind::Laser => WeaponProfile {
                damage_mult: 0.7,
                ttl: 0.4,
                radius: 1.6,
                speed_mult: 1.5,
                cooldown_mult: 0.4,
                ..STANDARD
            },
        }
    }

    /// Fire timer value right after a shot.
    pub fn reload_time(self, base_cooldown: f32) -> f32 {
        base_cooldown * self.profile().cooldown_mult
    }
}

/// The firing fighter as seen by `fire_volley`.
#[derive(Debug, Clone, Copy)]
pub struct Shooter<'a> {
    /// Roster index, stamped on every projectile as its owner.
    pub index: u32,
    pub origin: Vec2,
    pub stats: &'a CombatStats,
    pub color: &'a str,
}

/// Append one volley for `kind` to `out`. `aim` must be a unit vector.
/// Returns the number of projectiles emitted.
pub fn fire_volley<R: Rng + ?Sized>(
    kind: WeaponKind,
    shooter: &Shooter<'_>,
    aim: Vec2,
    rng: &mut R,
    out: &mut Projectiles,
) -> u32 {
    let profile = kind.profile();
    let speed = shooter.stats.projectile_speed * profile.speed_mult;
    let damage = shooter.stats.damage * profile.damage_mult;

    for _ in 0..profile.projectiles {
        let offset = profile.spread.sample(shooter.stats.spread, rng);
        out.push(Projectile {
            owner: shooter.index,
            position: shooter.origin,
            velocity: aim.rotated(offset) * speed,
            color: shooter.color.to_string(),
            damage,
            ttl: profile.ttl,
            radius: profile.radius,
        });
    }
    profile.projectiles
}

/// System that fires for every alive fighter whose reload has elapsed and whose
/// target is within range.
///
/// ## Data Access
/// - Reads: Roster, Position, Health, CombatStats, WeaponKind, FighterColor, Target
/// - Writes: FireControl, Projectiles, SimRng
pub fn weapon_system(
    roster: Res<Roster>,
    mut rng: ResMut<SimRng>,
    mut projectiles: ResMut<Projectiles>,
    mut query: Query<(
        &Position,
        &Health,
        &CombatStats,
        &WeaponKind,
        &FighterColor,
        &FighterName,
        &Target,
        &mut FireControl,
    )>,
) {
    for (index, &entity) in roster.0.iter().enumerate() {
        let Ok((pos, health, stats, kind, color, name, target, fire)) = query.get(entity) else {
            continue;
        };
        if !health.is_alive() || !fire.is_ready() {
            continue;
        }
        let Some(target_entity) = target.0 else {
            continue;
        };
        let Ok((target_pos, target_health, ..)) = query.get(target_entity) else {
            continue;
        };
        if !target_health.is_alive() {
            continue;
        }

        let origin = pos.0;
        let dist = origin.distance_to(target_pos.0);
        if dist > stats.range {
            continue;
        }

        let aim = (target_pos.0 - origin).normalized();
        let (stats, kind, color) = (*stats, *kind, color.0.clone());
        let shooter = Shooter {
            index: index as u32,
            origin,
            stats: &stats,
            color: &color,
        };
        let count = fire_volley(kind, &shooter, aim, &mut rng.0, &mut projectiles);
        trace!(shooter = %name.0, kind = kind.as_str(), count, dist, "volley fired");

        if let Ok((.., mut fire)) = query.get_mut(entity) {
            fire.timer = kind.reload_time(fire.cooldown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::steering::{steering_system, ArenaBounds, DeltaTime};

    fn spawn(world: &mut World, name: &str, kind: WeaponKind, x: f32, y: f32, timer: f32) -> Entity {
        world
            .spawn(FighterBundle {
                name: FighterName(name.to_string()),
                color: FighterColor("#ff0000".to_string()),
                position: Position(Vec2::new(x, y)),
                stats: CombatStats {
                    speed: 0.0,
                    range: 300.0,
                    damage: 10.0,
                    projectile_speed: 5.0,
                    spread: 0.4,
                },
                fire: FireControl {
                    cooldown: 1.0,
                    timer,
                },
                kind,
                ..Default::default()
            })
            .id()
    }

    fn setup() -> World {
        let mut world = World::new();
        world.insert_resource(DeltaTime(1.0 / 60.0));
        world.insert_resource(ArenaBounds::new(800.0, 600.0));
        world.insert_resource(SimRng::seeded(7));
        world.insert_resource(Projectiles::default());
        world
    }

    fn run_once(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems((steering_system, weapon_system).chain());
        schedule.run(world);
    }

    #[test]
    fn test_profile_table() {
        let sniper = WeaponKind::Sniper.profile();
        assert_eq!(sniper.projectiles, 1);
        assert_eq!(sniper.damage_mult, 2.2);
        assert_eq!(sniper.ttl, 3.5);
        assert_eq!(sniper.radius, 2.5);
        assert_eq!(sniper.cooldown_mult, 1.8);

        let rocket = WeaponKind::Rocket.profile();
        assert_eq!(rocket.damage_mult, 1.0);
        assert_eq!(rocket.radius, 4.0);
        assert_eq!(rocket.spread, SpreadPolicy::None);

        let flame = WeaponKind::Flamethrower.profile();
        assert_eq!(flame.projectiles, 10);
        assert_eq!(flame.speed_mult, 0.6);
        assert_eq!(flame.spread, SpreadPolicy::FullArc);

        let laser = WeaponKind::Laser.profile();
        assert_eq!(laser.speed_mult, 1.5);
        assert_eq!(laser.cooldown_mult, 0.4);
        assert_eq!(WeaponKind::Blaster.profile(), STANDARD);
    }

    #[test]
    fn test_blaster_fires_single_shot_and_reloads() {
        let mut world = setup();
        let a = spawn(&mut world, "a", WeaponKind::Blaster, 200.0, 300.0, 0.0);
        let b = spawn(&mut world, "b", WeaponKind::Blaster, 400.0, 300.0, 5.0);
        world.insert_resource(Roster(vec![a, b]));

        run_once(&mut world);

        let projectiles = world.resource::<Projectiles>();
        assert_eq!(projectiles.len(), 1);
        let shot = &projectiles.as_slice()[0];
        assert_eq!(shot.damage, 10.0);
        assert_eq!(shot.ttl, 2.5);
        assert_eq!(shot.radius, 2.0);
        assert_eq!(shot.color, "#ff0000");
        assert_eq!(shot.owner, 0);
        assert_eq!(shot.position, Vec2::new(200.0, 300.0));
        assert_eq!(shot.velocity, Vec2::new(5.0, 0.0));

        assert_eq!(world.get::<FireControl>(a).unwrap().timer, 1.0);
    }

    #[test]
    fn test_every_archetype_reloads_by_its_multiplier() {
        let expected = [
            (WeaponKind::Blaster, 1.0),
            (WeaponKind::Sniper, 1.8),
            (WeaponKind::Shotgun, 1.2),
            (WeaponKind::Rocket, 1.6),
            (WeaponKind::Flamethrower, 0.6),
            (WeaponKind::Laser, 0.4),
        ];
        for (kind, timer) in expected {
            let mut world = setup();
            let a = spawn(&mut world, "a", kind, 200.0, 300.0, 0.0);
            let b = spawn(&mut world, "b", WeaponKind::Blaster, 400.0, 300.0, 5.0);
            world.insert_resource(Roster(vec![a, b]));

            run_once(&mut world);

            assert!(!world.resource::<Projectiles>().is_empty(), "{kind:?} did not fire");
            let reloaded = world.get::<FireControl>(a).unwrap().timer;
            assert!((reloaded - timer).abs() < 1e-6, "{kind:?} reloaded to {reloaded}");
        }
    }

    #[test]
    fn test_shotgun_pellets_within_half_arc() {
        let mut world = setup();
        let a = spawn(&mut world, "a", WeaponKind::Shotgun, 200.0, 300.0, 0.0);
        let b = spawn(&mut world, "b", WeaponKind::Blaster, 400.0, 300.0, 5.0);
        world.insert_resource(Roster(vec![a, b]));

        run_once(&mut world);

        let projectiles = world.resource::<Projectiles>();
        assert_eq!(projectiles.len(), 6);
        for pellet in projectiles.iter() {
            assert_eq!(pellet.damage, 5.0);
            assert_eq!(pellet.ttl, 0.8);
            assert!((pellet.velocity.length() - 4.5).abs() < 1e-4);
            assert!(pellet.velocity.angle().abs() <= 0.2 + 1e-6);
        }
        let timer = world.get::<FireControl>(a).unwrap().timer;
        assert!((timer - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_flamethrower_particles_within_full_arc() {
        let mut world = setup();
        let a = spawn(&mut world, "a", WeaponKind::Flamethrower, 200.0, 300.0, 0.0);
        let b = spawn(&mut world, "b", WeaponKind::Blaster, 300.0, 300.0, 5.0);
        world.insert_resource(Roster(vec![a, b]));

        run_once(&mut world);

        let projectiles = world.resource::<Projectiles>();
        assert_eq!(projectiles.len(), 10);
        let mut widest: f32 = 0.0;
        for flame in projectiles.iter() {
            assert_eq!(flame.damage, 2.5);
            assert!((flame.velocity.length() - 3.0).abs() < 1e-4);
            widest = widest.max(flame.velocity.angle().abs());
        }
        assert!(widest <= 0.4 + 1e-6);
    }

    #[test]
    fn test_no_fire_out_of_range_or_reloading() {
        let mut world = setup();
        let a = spawn(&mut world, "a", WeaponKind::Blaster, 50.0, 300.0, 0.0);
        let b = spawn(&mut world, "b", WeaponKind::Blaster, 750.0, 300.0, 0.2);
        world.insert_resource(Roster(vec![a, b]));

        run_once(&mut world);

        assert!(world.resource::<Projectiles>().is_empty());
        // Reload keeps counting down while waiting.
        let timer = world.get::<FireControl>(a).unwrap().timer;
        assert!((timer + 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_same_volley() {
        let volley = |seed: u64| {
            let mut rng = SimRng::seeded(seed);
            let mut out = Projectiles::default();
            let stats = CombatStats {
                spread: 0.5,
                ..Default::default()
            };
            let shooter = Shooter {
                index: 3,
                origin: Vec2::new(100.0, 100.0),
                stats: &stats,
                color: "#00ff00",
            };
            fire_volley(WeaponKind::Shotgun, &shooter, Vec2::new(0.0, 1.0), &mut rng.0, &mut out);
            out
        };
        assert_eq!(volley(42).as_slice(), volley(42).as_slice());
        assert_ne!(volley(42).as_slice(), volley(43).as_slice());
    }

    #[test]
    fn test_straight_shooters_leave_rng_untouched() {
        let mut rng = SimRng::seeded(9);
        let mut reference = SimRng::seeded(9);
        let mut out = Projectiles::default();
        let stats = CombatStats::default();
        let shooter = Shooter {
            index: 0,
            origin: Vec2::ZERO,
            stats: &stats,
            color: "#fff",
        };
        for kind in [WeaponKind::Blaster, WeaponKind::Sniper, WeaponKind::Rocket, WeaponKind::Laser] {
            fire_volley(kind, &shooter, Vec2::new(1.0, 0.0), &mut rng.0, &mut out);
        }
        assert_eq!(rng.0.gen::<u64>(), reference.0.gen::<u64>());
        assert_eq!(out.len(), 4);
    }
}
