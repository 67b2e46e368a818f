//! ECS Systems for the Arena Wager simulation.
//!
//! Systems contain the game logic that operates on components.
//!
//! ## Tick Order
//!
//! One `advance(dt)` runs the three mutating systems as a chain:
//!
//! 1. `steering_system` - runs down fire timers, picks each fighter's nearest
//!    living enemy, steers and moves it, and turns it to face the target
//! 2. `weapon_system` - fires a volley for every fighter that is reloaded and
//!    has its target in range
//! 3. `projectile_system` - integrates projectiles, expires them, applies hits
//!
//! The `outcome` module holds the read-only winner and odds queries.

pub mod outcome;
pub mod projectiles;
pub mod serialization;
pub mod steering;
pub mod weapons;

pub use outcome::*;
pub use projectiles::*;
pub use serialization::*;
pub use steering::*;
pub use weapons::*;
