//! ECS Components for the Arena Wager simulation.
//!
//! Components are pure data containers attached to fighter entities.
//! All game logic lives in systems that query these components.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

// ============================================================================
// VECTOR MATH
// ============================================================================

/// Plain 2D vector used for steering and projectile kinematics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length vector normalizes to `(1, 0)`. Targeting ties between
    /// overlapping fighters rely on this exact fallback.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::new(1.0, 0.0)
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    pub fn distance_to(&self, other: Vec2) -> f32 {
        (other - *self).length()
    }

    /// Angle of the vector in radians (`atan2(y, x)`).
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Rotate counter-clockwise by `angle` radians.
    pub fn rotated(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ============================================================================
// SPATIAL COMPONENTS
// ============================================================================

/// 2D position inside the arena (origin at the top-left corner).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Velocity in arena units per 1/60 s.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Facing angle in radians. Tracks the current target, not the travel direction.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f32);

// ============================================================================
// IDENTITY COMPONENTS
// ============================================================================

/// Unique fighter name within an encounter.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FighterName(pub String);

/// Display color, inherited by every projectile the fighter fires.
#[derive(Component, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterColor(pub String);

impl Default for FighterColor {
    fn default() -> Self {
        Self("#ffffff".to_string())
    }
}

// ============================================================================
// COMBAT COMPONENTS
// ============================================================================

/// Hit points and the one-way alive flag.
///
/// `current` may drop below zero on an overkill hit; the negative value is kept
/// so "no survivors" tie-breaks can compare it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub alive: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            alive: max > 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Apply damage. Returns `true` if this hit killed the fighter.
    pub fn damage(&mut self, amount: f32) -> bool {
        self.current -= amount;
        if self.alive && self.current <= 0.0 {
            self.alive = false;
            return true;
        }
        false
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Movement and weapon statistics, already derived for the fighter's archetype.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    /// Steering speed (units per 1/60 s).
    pub speed: f32,
    /// Maximum firing distance.
    pub range: f32,
    /// Base damage per shot before the archetype multiplier.
    pub damage: f32,
    /// Base projectile speed before the archetype multiplier.
    pub projectile_speed: f32,
    /// Firing-arc jitter magnitude in radians.
    pub spread: f32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            speed: 2.0,
            range: 250.0,
            damage: 10.0,
            projectile_speed: 6.0,
            spread: 0.0,
        }
    }
}

/// Reload state. `timer` counts down in seconds; a shot is allowed at `<= 0`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireControl {
    /// Base reload duration in seconds.
    pub cooldown: f32,
    /// Seconds remaining until the next shot may fire.
    pub timer: f32,
}

impl FireControl {
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown,
            timer: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer -= dt;
    }

    pub fn is_ready(&self) -> bool {
        self.timer <= 0.0
    }
}

impl Default for FireControl {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Weapon archetype. Firing behavior is table-driven, see `systems::weapons`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    #[default]
    Blaster,
    Sniper,
    Shotgun,
    Rocket,
    Flamethrower,
    Laser,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 6] = [
        WeaponKind::Blaster,
        WeaponKind::Sniper,
        WeaponKind::Shotgun,
        WeaponKind::Rocket,
        WeaponKind::Flamethrower,
        WeaponKind::Laser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Blaster => "blaster",
            WeaponKind::Sniper => "sniper",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Rocket => "rocket",
            WeaponKind::Flamethrower => "flamethrower",
            WeaponKind::Laser => "laser",
        }
    }
}

/// Nearest living enemy chosen by the steering pass this tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Target(pub Option<Entity>);

// ============================================================================
// PROJECTILES
// ============================================================================

/// A live projectile. Plain value stored in the `Projectiles` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Roster index of the fighter that fired it. Shooters never hit themselves.
    pub owner: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: String,
    pub damage: f32,
    /// Seconds remaining before expiry.
    pub ttl: f32,
    /// Collision radius.
    pub radius: f32,
}

// ============================================================================
// BUNDLES
// ============================================================================

/// Bundle for spawning a complete fighter entity.
#[derive(Bundle, Default)]
pub struct FighterBundle {
    pub name: FighterName,
    pub color: FighterColor,
    pub position: Position,
    pub velocity: Velocity,
    pub heading: Heading,
    pub health: Health,
    pub stats: CombatStats,
    pub fire: FireControl,
    pub kind: WeaponKind,
    pub target: Target,
}
