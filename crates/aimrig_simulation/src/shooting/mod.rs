//! Shooting domain — направление пули, выстрел, aim laser
//!
//! Содержит:
//! - MuzzlePose, WeaponAimDirection, bullet_direction (WeaponDirector)
//! - ProjectileSpawnRequest (event для projectile spawner)
//! - AimLaser (polyline от дула)
//! - ProjectilePlugin (headless spawner)

pub mod director;
pub mod events;
pub mod laser;
pub mod projectile;

pub use director::*;
pub use events::*;
pub use laser::*;
pub use projectile::*;
