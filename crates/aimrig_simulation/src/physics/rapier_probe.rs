//! Rapier backend для ray probe + aim laser
//!
//! Production путь: коллайдеры сцены — rapier `Collider` + `CollisionGroups`
//! (слои из `collision.rs`). Требует `RapierPhysicsPlugin` в app.
//!
//! Rapier синхронизирует коллайдеры в PostUpdate → ray query в FixedUpdate
//! видит сцену на момент прошлого кадра.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::aim::{run_ray_probes, AimCamera, AimState, RayHit, RayProbe, SceneRaycast};
use crate::collision::query_groups;
use crate::components::{Player, PlayerInput};
use crate::config::WeaponConfig;
use crate::shooting::{run_aim_lasers, AimLaser, MuzzlePose};

/// `SceneRaycast` поверх RapierContext
pub struct RapierSceneQuery<'a> {
    context: &'a RapierContext<'a>,
}

impl<'a> RapierSceneQuery<'a> {
    pub fn new(context: &'a RapierContext<'a>) -> Self {
        Self { context }
    }
}

impl SceneRaycast for RapierSceneQuery<'_> {
    fn cast_ray(
        &self,
        ray: Ray3d,
        max_distance: f32,
        mask: u32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let mut filter = QueryFilter::default().groups(query_groups(mask));
        if let Some(entity) = exclude {
            filter = filter.exclude_collider(entity);
        }

        let (entity, intersection) = self.context.cast_ray_and_get_normal(
            ray.origin,
            ray.direction.as_vec3(),
            max_distance,
            true,
            filter,
        )?;

        Some(RayHit {
            point: intersection.point,
            normal: intersection.normal,
            entity,
            distance: intersection.time_of_impact,
        })
    }
}

/// System: cursor probe через rapier
pub fn probe_rapier_scene(
    rapier_context: ReadRapierContext,
    cameras: Query<(&AimCamera, &Transform), Without<Player>>,
    mut probes: Query<(Entity, &PlayerInput, &mut RayProbe), With<Player>>,
    mut camera_warned: Local<bool>,
) {
    let Ok(context) = rapier_context.single() else {
        crate::log_warning("⚠️ RapierProbe: no rapier context, skipping aim probe");
        return;
    };

    run_ray_probes(
        &RapierSceneQuery::new(&context),
        &cameras,
        &mut probes,
        &mut camera_warned,
    );
}

/// System: aim laser через rapier
pub fn trace_rapier_lasers(
    rapier_context: ReadRapierContext,
    mut players: Query<(Entity, &AimState, &MuzzlePose, &WeaponConfig, &mut AimLaser), With<Player>>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    run_aim_lasers(&RapierSceneQuery::new(&context), &mut players);
}

/// Rapier backend plugin (вместо `HeadlessProbePlugin`)
///
/// Сам `RapierPhysicsPlugin` добавляет вызывающий код.
pub struct RapierProbePlugin;

impl Plugin for RapierProbePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                probe_rapier_scene.in_set(crate::AimCoreSet::Sense),
                trace_rapier_lasers.in_set(crate::AimCoreSet::Act),
            ),
        );
    }
}
