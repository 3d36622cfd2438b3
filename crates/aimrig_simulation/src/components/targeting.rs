//! Lock-on capability

use bevy::prelude::*;

/// Marker: entity можно взять в lock-on
///
/// Lock-on берёт только entity под ТЕКУЩИМ cached hit курсора — памяти о цели нет.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Targetable;
