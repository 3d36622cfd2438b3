//! Headless projectile spawner
//!
//! Заменяет движковый spawner в headless режиме: пуля летит с постоянной
//! скоростью и удаляется по истечении lifetime. Коллизий и урона нет.

use bevy::prelude::*;

use crate::shooting::ProjectileSpawnRequest;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub shooter: Entity,
    pub velocity: Vec3,
    /// Секунд до удаления
    pub remaining_lifetime: f32,
}

/// System: ProjectileSpawnRequest → Projectile entity
pub fn spawn_requested_projectiles(
    mut commands: Commands,
    mut requests: EventReader<ProjectileSpawnRequest>,
) {
    for request in requests.read() {
        commands.spawn((
            Transform::from_translation(request.position).with_rotation(request.orientation),
            Projectile {
                shooter: request.shooter,
                velocity: request.velocity,
                remaining_lifetime: request.lifetime,
            },
        ));
    }
}

/// System: движение + удаление по lifetime
pub fn advance_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut projectile) in projectiles.iter_mut() {
        projectile.remaining_lifetime -= delta;
        if projectile.remaining_lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation += projectile.velocity * delta;
    }
}

/// Headless spawner plugin
///
/// Spawn после fire (`AimCoreSet::Present`), движение — в начале следующего тика.
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                advance_projectiles.in_set(crate::AimCoreSet::Sense),
                spawn_requested_projectiles.in_set(crate::AimCoreSet::Present),
            ),
        );
    }
}
