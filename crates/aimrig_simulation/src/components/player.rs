//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Все системы ядра фильтруют `With<Player>`: single-player, один персонаж.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
