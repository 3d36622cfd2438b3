//! Aim domain — cursor ray probe + aim resolution
//!
//! Содержит:
//! - RayProbe (cached cursor hit), AimCamera (screen → world ray), SceneRaycast (backend trait)
//! - AimState + resolve_aim_point (lock-on / precision rules)
//!
//! Порядок внутри тика: backend probe (`AimCoreSet::Sense`) → `resolve_player_aim`
//! (`AimCoreSet::Resolve`).

pub mod ray_probe;
pub mod resolver;


pub use ray_probe::*;
pub use resolver::*;
