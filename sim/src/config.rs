//! Encounter configuration.
//!
//! An `EncounterConfig` fully describes a match before it starts: arena size,
//! RNG seed and an ordered roster of fully-derived `FighterSpec`s. The engine
//! trusts nothing here until `validate` has passed.
//!
//! Stat derivation is a setup concern: `ArchetypeBaseline` holds each weapon
//! archetype's base stats and `StatMultipliers` scales them per fighter.

use crate::components::*;
use crate::systems::steering::ARENA_MARGIN;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration errors. Raised once, at construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("encounter roster is empty")]
    EmptyRoster,
    #[error("arena {width}x{height} must be finite and wider than twice the edge margin")]
    InvalidArena { width: f32, height: f32 },
    #[error("duplicate fighter name: {0}")]
    DuplicateName(String),
    #[error("fighter {name}: {reason}")]
    InvalidFighter { name: String, reason: &'static str },
    #[error("failed to parse encounter config: {0}")]
    Json(#[from] serde_json::Error),
}

/// A fully-derived fighter, ready to spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterSpec {
    pub name: String,
    pub color: String,
    pub kind: WeaponKind,
    pub x: f32,
    pub y: f32,
    pub max_hp: f32,
    /// Starting hp; defaults to `max_hp`.
    #[serde(default)]
    pub hp: Option<f32>,
    pub speed: f32,
    pub range: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    #[serde(default)]
    pub spread: f32,
    pub fire_cooldown: f32,
    /// Initial fire timer; `0` lets the fighter shoot on its first tick.
    #[serde(default)]
    pub fire_timer: f32,
}

impl FighterSpec {
    /// Derive a spec from an archetype's baseline scaled by `mult`.
    pub fn from_archetype(
        name: impl Into<String>,
        color: impl Into<String>,
        kind: WeaponKind,
        position: Vec2,
        mult: StatMultipliers,
    ) -> Self {
        let base = ArchetypeBaseline::for_kind(kind);
        Self {
            name: name.into(),
            color: color.into(),
            kind,
            x: position.x,
            y: position.y,
            max_hp: base.max_hp * mult.hp,
            hp: None,
            speed: base.speed * mult.speed,
            range: base.range * mult.range,
            damage: base.damage * mult.damage,
            projectile_speed: base.projectile_speed,
            spread: base.spread,
            fire_cooldown: base.fire_cooldown / mult.fire_rate,
            fire_timer: 0.0,
        }
    }

    pub fn to_bundle(&self) -> FighterBundle {
        let current = self.hp.unwrap_or(self.max_hp);
        FighterBundle {
            name: FighterName(self.name.clone()),
            color: FighterColor(self.color.clone()),
            position: Position(Vec2::new(self.x, self.y)),
            velocity: Velocity::default(),
            heading: Heading::default(),
            health: Health {
                current,
                max: self.max_hp,
                alive: current > 0.0,
            },
            stats: CombatStats {
                speed: self.speed,
                range: self.range,
                damage: self.damage,
                projectile_speed: self.projectile_speed,
                spread: self.spread,
            },
            fire: FireControl {
                cooldown: self.fire_cooldown,
                timer: self.fire_timer,
            },
            kind: self.kind,
            target: Target::default(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidFighter {
            name: self.name.clone(),
            reason,
        };
        let stats = [
            self.x,
            self.y,
            self.max_hp,
            self.speed,
            self.range,
            self.damage,
            self.projectile_speed,
            self.spread,
            self.fire_cooldown,
            self.fire_timer,
        ];
        if stats.iter().any(|v| !v.is_finite()) {
            return Err(invalid("stats must be finite"));
        }
        let magnitudes = [
            self.max_hp,
            self.speed,
            self.range,
            self.damage,
            self.projectile_speed,
            self.spread,
        ];
        if magnitudes.iter().any(|&v| v < 0.0) {
            return Err(invalid("stats must not be negative"));
        }
        if !(self.max_hp * self.damage * self.range * self.speed).is_finite() {
            return Err(invalid("combat power overflows"));
        }
        if let Some(hp) = self.hp {
            if !hp.is_finite() || hp > self.max_hp {
                return Err(invalid("hp must be finite and at most max_hp"));
            }
        }
        if self.fire_cooldown <= 0.0 {
            return Err(invalid("fire_cooldown must be positive"));
        }
        Ok(())
    }
}

/// Per-fighter scaling applied on top of an archetype baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatMultipliers {
    pub hp: f32,
    pub speed: f32,
    pub damage: f32,
    pub range: f32,
    /// Divides the base cooldown: `2.0` fires twice as often.
    pub fire_rate: f32,
}

impl Default for StatMultipliers {
    fn default() -> Self {
        Self {
            hp: 1.0,
            speed: 1.0,
            damage: 1.0,
            range: 1.0,
            fire_rate: 1.0,
        }
    }
}

/// Base stats of an archetype before per-fighter multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeBaseline {
    pub max_hp: f32,
    pub speed: f32,
    pub range: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    pub spread: f32,
    pub fire_cooldown: f32,
}

impl ArchetypeBaseline {
    pub const fn for_kind(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Blaster => Self {
                max_hp: 100.0,
                speed: 2.0,
                range: 260.0,
                damage: 8.0,
                projectile_speed: 7.0,
                spread: 0.0,
                fire_cooldown: 0.5,
            },
            WeaponKind::Sniper => Self {
                max_hp: 80.0,
                speed: 1.6,
                range: 420.0,
                damage: 14.0,
                projectile_speed: 11.0,
                spread: 0.0,
                fire_cooldown: 1.0,
            },
            WeaponKind::Shotgun => Self {
                max_hp: 120.0,
                speed: 2.2,
                range: 160.0,
                damage: 10.0,
                projectile_speed: 8.0,
                spread: 0.6,
                fire_cooldown: 0.9,
            },
            WeaponKind::Rocket => Self {
                max_hp: 110.0,
                speed: 1.8,
                range: 300.0,
                damage: 18.0,
                projectile_speed: 5.0,
                spread: 0.0,
                fire_cooldown: 1.1,
            },
            WeaponKind::Flamethrower => Self {
                max_hp: 130.0,
                speed: 2.4,
                range: 110.0,
                damage: 6.0,
                projectile_speed: 5.0,
                spread: 0.35,
                fire_cooldown: 0.2,
            },
            WeaponKind::Laser => Self {
                max_hp: 90.0,
                speed: 2.0,
                range: 220.0,
                damage: 5.0,
                projectile_speed: 10.0,
                spread: 0.0,
                fire_cooldown: 0.25,
            },
        }
    }
}

/// Complete encounter description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterConfig {
    pub width: f32,
    pub height: f32,
    /// Seed for spread jitter. Same seed + same roster = same encounter.
    #[serde(default)]
    pub seed: u64,
    pub fighters: Vec<FighterSpec>,
}

impl EncounterConfig {
    pub fn new(width: f32, height: f32, seed: u64, fighters: Vec<FighterSpec>) -> Self {
        Self {
            width,
            height,
            seed,
            fighters,
        }
    }

    /// Six fighters, one per archetype, evenly spaced on a ring around the center.
    pub fn showcase(width: f32, height: f32, seed: u64) -> Self {
        const LINEUP: [(&str, &str, WeaponKind); 6] = [
            ("Vega", "#4cc9f0", WeaponKind::Blaster),
            ("Hawk", "#f72585", WeaponKind::Sniper),
            ("Brute", "#ffb703", WeaponKind::Shotgun),
            ("Boomer", "#fb5607", WeaponKind::Rocket),
            ("Scorch", "#e63946", WeaponKind::Flamethrower),
            ("Prism", "#80ffdb", WeaponKind::Laser),
        ];
        let center = Vec2::new(width / 2.0, height / 2.0);
        let radius = width.min(height) * 0.35;
        let step = std::f32::consts::TAU / LINEUP.len() as f32;

        let fighters = LINEUP
            .iter()
            .enumerate()
            .map(|(i, &(name, color, kind))| {
                let position = center + Vec2::from_angle(step * i as f32) * radius;
                FighterSpec::from_archetype(name, color, kind, position, StatMultipliers::default())
            })
            .collect();

        Self::new(width, height, seed, fighters)
    }

    /// Parse and validate a JSON encounter description.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the boundary contract the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_extent = 2.0 * ARENA_MARGIN;
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= min_extent
            || self.height <= min_extent
        {
            return Err(ConfigError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }
        if self.fighters.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for spec in &self.fighters {
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateName(spec.name.clone()));
            }
            spec.validate()?;
        }
        Ok(())
    }
}
