//! Rig domain — веса procedural rig и left hand IK
//!
//! Flow:
//! 1. Weapon switch / reload edges → RigBlendState роняет веса + animator triggers
//! 2. Evaluator шлёт GrabAnimationComplete / ReloadAnimationComplete
//! 3. RigBlendState поднимает веса к 1.0 → RigWeightSettled
//! 4. Внешний pose evaluator читает `rig_weight` / `left_hand_ik_weight`

pub mod blender;
pub mod events;
pub mod systems;


pub use blender::*;
pub use events::*;
pub use systems::*;
