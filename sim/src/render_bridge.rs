//! Render Bridge
//!
//! Flattens a `Snapshot` into a contiguous `Vec<f32>` for a renderer that
//! lives across an FFI or worker boundary. The JSON snapshot carries names and
//! colors; this buffer carries only the per-frame numbers.
//!
//! # Buffer Layout (Version 1.0)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ HEADER (2 elements)                                             │
//! │ [0] fighter_count, [1] projectile_count                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ FIGHTERS (fighter_count × FIGHTER_STRIDE), roster order         │
//! │   [+0] index     - Roster index                                 │
//! │   [+1] x         [+2] y                                         │
//! │   [+3] vx        [+4] vy                                        │
//! │   [+5] heading   - Radians, facing the current target           │
//! │   [+6] hp        - Clamped at 0                                 │
//! │   [+7] hp_max                                                   │
//! │   [+8] is_alive  - 1.0 alive, 0.0 dead                          │
//! │   [+9] kind_id   - Archetype (see KIND_* constants)             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ PROJECTILES (projectile_count × PROJECTILE_STRIDE)              │
//! │   [+0] x   [+1] y   [+2] vx   [+3] vy   [+4] radius   [+5] ttl  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The buffer is deterministic: the same `Snapshot` always yields the same
//! output.

use crate::components::WeaponKind;
use crate::world::Snapshot;

// ============================================================================
// CONSTANTS - STABLE LAYOUT
// ============================================================================

/// Number of f32 values in the buffer header.
pub const HEADER_SIZE: usize = 2;

/// Number of f32 values per fighter.
pub const FIGHTER_STRIDE: usize = 10;

/// Number of f32 values per projectile.
pub const PROJECTILE_STRIDE: usize = 6;

pub const KIND_BLASTER: f32 = 0.0;
pub const KIND_SNIPER: f32 = 1.0;
pub const KIND_SHOTGUN: f32 = 2.0;
pub const KIND_ROCKET: f32 = 3.0;
pub const KIND_FLAMETHROWER: f32 = 4.0;
pub const KIND_LASER: f32 = 5.0;

#[inline]
pub fn kind_to_id(kind: WeaponKind) -> f32 {
    match kind {
        WeaponKind::Blaster => KIND_BLASTER,
        WeaponKind::Sniper => KIND_SNIPER,
        WeaponKind::Shotgun => KIND_SHOTGUN,
        WeaponKind::Rocket => KIND_ROCKET,
        WeaponKind::Flamethrower => KIND_FLAMETHROWER,
        WeaponKind::Laser => KIND_LASER,
    }
}

// ============================================================================
// MAIN SERIALIZATION FUNCTION
// ============================================================================

/// Convert a snapshot to the flat render buffer.
///
/// # Example
///
/// ```rust
/// use arena_sim::api::SimWorld;
/// use arena_sim::config::EncounterConfig;
/// use arena_sim::render_bridge::{calculate_buffer_size, snapshot_to_flatbuffer};
///
/// let sim = SimWorld::new(EncounterConfig::showcase(800.0, 600.0, 1)).unwrap();
/// let buffer = snapshot_to_flatbuffer(&sim.snapshot());
/// assert_eq!(buffer.len(), calculate_buffer_size(6, 0));
/// ```
pub fn snapshot_to_flatbuffer(snapshot: &Snapshot) -> Vec<f32> {
    let fighter_count = snapshot.fighters.len();
    let projectile_count = snapshot.projectiles.len();
    let buffer_size = calculate_buffer_size(fighter_count, projectile_count);

    let mut buffer = Vec::with_capacity(buffer_size);
    buffer.push(fighter_count as f32);
    buffer.push(projectile_count as f32);

    for (index, f) in snapshot.fighters.iter().enumerate() {
        buffer.push(index as f32);
        buffer.push(f.position.x);
        buffer.push(f.position.y);
        buffer.push(f.velocity.x);
        buffer.push(f.velocity.y);
        buffer.push(f.heading);
        buffer.push(f.display_hp());
        buffer.push(f.max_hp);
        buffer.push(if f.alive { 1.0 } else { 0.0 });
        buffer.push(kind_to_id(f.kind));
    }

    for p in &snapshot.projectiles {
        buffer.push(p.position.x);
        buffer.push(p.position.y);
        buffer.push(p.velocity.x);
        buffer.push(p.velocity.y);
        buffer.push(p.radius);
        buffer.push(p.ttl);
    }

    debug_assert_eq!(buffer.len(), buffer_size, "Buffer size mismatch");
    buffer
}

/// `HEADER_SIZE + fighters * FIGHTER_STRIDE + projectiles * PROJECTILE_STRIDE`
#[inline]
pub fn calculate_buffer_size(fighter_count: usize, projectile_count: usize) -> usize {
    HEADER_SIZE + fighter_count * FIGHTER_STRIDE + projectile_count * PROJECTILE_STRIDE
}

/// Read `(fighter_count, projectile_count)` from the header.
///
/// Returns `None` if the header is incomplete.
#[inline]
pub fn parse_counts(buffer: &[f32]) -> Option<(usize, usize)> {
    match buffer {
        [fighters, projectiles, ..] => Some((*fighters as usize, *projectiles as usize)),
        _ => None,
    }
}

#[inline]
pub const fn fighter_offset(fighter_index: usize) -> usize {
    HEADER_SIZE + fighter_index * FIGHTER_STRIDE
}

/// Projectile records start after every fighter record.
#[inline]
pub const fn projectile_offset(fighter_count: usize, projectile_index: usize) -> usize {
    fighter_offset(fighter_count) + projectile_index * PROJECTILE_STRIDE
}

// ============================================================================
// FIELD OFFSET CONSTANTS
// ============================================================================

pub const FIELD_INDEX: usize = 0;
pub const FIELD_X: usize = 1;
pub const FIELD_Y: usize = 2;
pub const FIELD_VX: usize = 3;
pub const FIELD_VY: usize = 4;
pub const FIELD_HEADING: usize = 5;
pub const FIELD_HP: usize = 6;
pub const FIELD_HP_MAX: usize = 7;
pub const FIELD_IS_ALIVE: usize = 8;
pub const FIELD_KIND: usize = 9;

pub const PROJ_FIELD_X: usize = 0;
pub const PROJ_FIELD_Y: usize = 1;
pub const PROJ_FIELD_VX: usize = 2;
pub const PROJ_FIELD_VY: usize = 3;
pub const PROJ_FIELD_RADIUS: usize = 4;
pub const PROJ_FIELD_TTL: usize = 5;

// ============================================================================
// TESTS
// ============================================================================
