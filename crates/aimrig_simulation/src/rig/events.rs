//! Rig events
//!
//! Animation evaluator → ECS: completion callbacks (single-shot, повтор = no-op).
//! ECS → наружу: RigWeightSettled (ramp дошёл до 1.0).

use bevy::prelude::*;

/// Callback: weapon grab animation закончилась (`onGrabAnimationComplete`)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrabAnimationComplete {
    pub entity: Entity,
}

/// Callback: reload animation закончилась (`onReloadAnimationComplete`)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadAnimationComplete {
    pub entity: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigChannel {
    Rig,
    LeftHandIk,
}

/// Event: вес канала дошёл до 1.0
///
/// `LeftHandIk` после grab = IK handoff завершён, рука снова на оружии.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigWeightSettled {
    pub entity: Entity,
    pub channel: RigChannel,
}
