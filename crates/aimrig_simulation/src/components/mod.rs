//! ECS компоненты, общие для нескольких доменов
//!
//! - player: player control marker (Player)
//! - input: owned input-state персонажа (PlayerInput)
//! - targeting: lock-on capability (Targetable)

pub mod input;
pub mod player;
pub mod targeting;

pub use input::*;
pub use player::*;
pub use targeting::*;
