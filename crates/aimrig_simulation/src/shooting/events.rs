//! Shooting events (ECS → projectile spawner)

use bevy::prelude::*;

/// Event: заспавнить снаряд
///
/// Spawner (headless `ProjectilePlugin` или внешний движок) владеет lifecycle
/// снаряда полностью: physics, collision, удаление через `lifetime`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProjectileSpawnRequest {
    /// Кто стреляет (для self-hit фильтра на стороне spawner'а)
    pub shooter: Entity,

    /// Позиция дула (world)
    pub position: Vec3,

    /// Ориентация модели пули (вдоль ствола)
    pub orientation: Quat,

    /// Начальная скорость (direction · muzzle speed)
    pub velocity: Vec3,

    /// Через сколько секунд удалить
    pub lifetime: f32,
}
