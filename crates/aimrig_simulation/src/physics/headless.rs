//! Headless scene backend — аналитические ray queries без Rapier
//!
//! Используется в headless симуляции и тестах: plane + sphere коллайдеры,
//! позиция из `Transform`. Маска слоёв та же, что у rapier groups
//! (см. `collision.rs`).

use bevy::prelude::*;

use crate::aim::{run_ray_probes, AimCamera, AimState, RayHit, RayProbe, SceneRaycast};
use crate::components::{Player, PlayerInput};
use crate::config::WeaponConfig;
use crate::shooting::{run_aim_lasers, AimLaser, MuzzlePose};

/// Параллельные лучи (|n·d| меньше) не пересекают plane
const PARALLEL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum HeadlessShape {
    /// Бесконечная плоскость через `Transform::translation`
    Plane { normal: Vec3 },
    Sphere { radius: f32 },
}

/// Коллайдер headless сцены
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HeadlessCollider {
    pub shape: HeadlessShape,
    /// Collision layer bits (`COLLISION_LAYER_*`)
    pub layers: u32,
}

impl HeadlessCollider {
    pub fn ground(layers: u32) -> Self {
        Self {
            shape: HeadlessShape::Plane { normal: Vec3::Y },
            layers,
        }
    }

    pub fn sphere(radius: f32, layers: u32) -> Self {
        Self {
            shape: HeadlessShape::Sphere { radius },
            layers,
        }
    }

    /// Пересечение луча с коллайдером в `position`: (distance, normal)
    fn intersect(&self, position: Vec3, ray: Ray3d) -> Option<(f32, Vec3)> {
        let direction = ray.direction.as_vec3();

        match self.shape {
            HeadlessShape::Plane { normal } => {
                let normal = normal.normalize_or_zero();
                let denom = normal.dot(direction);
                if denom.abs() < PARALLEL_EPSILON {
                    return None;
                }
                let distance = normal.dot(position - ray.origin) / denom;
                // Нормаль всегда навстречу лучу
                let facing = if denom < 0.0 { normal } else { -normal };
                (distance >= 0.0).then_some((distance, facing))
            }
            HeadlessShape::Sphere { radius } => {
                let to_center = position - ray.origin;
                let projection = to_center.dot(direction);
                let closest_squared = to_center.length_squared() - projection * projection;
                let radius_squared = radius * radius;
                if closest_squared > radius_squared {
                    return None;
                }
                let half_chord = (radius_squared - closest_squared).sqrt();
                // Origin внутри сферы → выходная точка
                let distance = if projection - half_chord >= 0.0 {
                    projection - half_chord
                } else {
                    projection + half_chord
                };
                if distance < 0.0 {
                    return None;
                }
                let normal = (ray.get_point(distance) - position).normalize_or_zero();
                Some((distance, normal))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SceneCollider {
    entity: Entity,
    position: Vec3,
    collider: HeadlessCollider,
}

/// Snapshot коллайдеров на момент query
#[derive(Debug, Clone, Default)]
pub struct HeadlessScene {
    colliders: Vec<SceneCollider>,
}

impl HeadlessScene {
    pub fn from_colliders<'a>(
        colliders: impl IntoIterator<Item = (Entity, &'a HeadlessCollider, &'a Transform)>,
    ) -> Self {
        let mut colliders: Vec<SceneCollider> = colliders
            .into_iter()
            .map(|(entity, collider, transform)| SceneCollider {
                entity,
                position: transform.translation,
                collider: *collider,
            })
            .collect();
        // Порядок query не гарантирован → сортируем для детерминизма (tie-break)
        colliders.sort_by_key(|scene_collider| scene_collider.entity.index());

        Self { colliders }
    }
}

impl SceneRaycast for HeadlessScene {
    fn cast_ray(
        &self,
        ray: Ray3d,
        max_distance: f32,
        mask: u32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;

        for scene_collider in &self.colliders {
            if scene_collider.collider.layers & mask == 0 {
                continue;
            }
            if exclude == Some(scene_collider.entity) {
                continue;
            }
            let Some((distance, normal)) = scene_collider.collider.intersect(scene_collider.position, ray)
            else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if closest.is_some_and(|hit| hit.distance <= distance) {
                continue;
            }
            closest = Some(RayHit {
                point: ray.get_point(distance),
                normal,
                entity: scene_collider.entity,
                distance,
            });
        }

        closest
    }
}

/// System: cursor probe против headless сцены
pub fn probe_headless_scene(
    colliders: Query<(Entity, &HeadlessCollider, &Transform)>,
    cameras: Query<(&AimCamera, &Transform), Without<Player>>,
    mut probes: Query<(Entity, &PlayerInput, &mut RayProbe), With<Player>>,
    mut camera_warned: Local<bool>,
) {
    let scene = HeadlessScene::from_colliders(colliders.iter());
    run_ray_probes(&scene, &cameras, &mut probes, &mut camera_warned);
}

/// System: aim laser против headless сцены
pub fn trace_headless_lasers(
    colliders: Query<(Entity, &HeadlessCollider, &Transform)>,
    mut players: Query<(Entity, &AimState, &MuzzlePose, &WeaponConfig, &mut AimLaser), With<Player>>,
) {
    let scene = HeadlessScene::from_colliders(colliders.iter());
    run_aim_lasers(&scene, &mut players);
}

/// Headless backend plugin (вместо `RapierProbePlugin`)
pub struct HeadlessProbePlugin;

impl Plugin for HeadlessProbePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                probe_headless_scene.in_set(crate::AimCoreSet::Sense),
                trace_headless_lasers.in_set(crate::AimCoreSet::Act),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{COLLISION_LAYER_ENVIRONMENT, COLLISION_LAYER_TARGETS, COLLISION_MASK_AIM};

    fn scene(colliders: &[(u32, HeadlessCollider, Vec3)]) -> HeadlessScene {
        let transforms: Vec<(Entity, HeadlessCollider, Transform)> = colliders
            .iter()
            .map(|(index, collider, position)| {
                (Entity::from_raw(*index), *collider, Transform::from_translation(*position))
            })
            .collect();
        HeadlessScene::from_colliders(
            transforms
                .iter()
                .map(|(entity, collider, transform)| (*entity, collider, transform)),
        )
    }

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(direction).unwrap())
    }

    #[test]
    fn test_ground_plane_hit() {
        let scene = scene(&[(1, HeadlessCollider::ground(COLLISION_LAYER_ENVIRONMENT), Vec3::ZERO)]);

        let hit = scene
            .cast_ray(ray(Vec3::new(2.0, 10.0, 3.0), Vec3::NEG_Y), f32::MAX, COLLISION_MASK_AIM, None)
            .unwrap();

        assert!((hit.point - Vec3::new(2.0, 0.0, 3.0)).length() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
        assert!((hit.distance - 10.0).abs() < 1e-5);
        assert_eq!(hit.entity, Entity::from_raw(1));
    }

    #[test]
    fn test_ray_away_from_plane_misses() {
        let scene = scene(&[(1, HeadlessCollider::ground(COLLISION_LAYER_ENVIRONMENT), Vec3::ZERO)]);

        assert!(scene
            .cast_ray(ray(Vec3::Y, Vec3::Y), f32::MAX, COLLISION_MASK_AIM, None)
            .is_none());
        assert!(scene
            .cast_ray(ray(Vec3::Y, Vec3::X), f32::MAX, COLLISION_MASK_AIM, None)
            .is_none());
    }

    #[test]
    fn test_nearest_collider_wins() {
        let scene = scene(&[
            (1, HeadlessCollider::ground(COLLISION_LAYER_ENVIRONMENT), Vec3::ZERO),
            (2, HeadlessCollider::sphere(0.5, COLLISION_LAYER_TARGETS), Vec3::new(0.0, 1.0, 0.0)),
        ]);

        let hit = scene
            .cast_ray(ray(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y), f32::MAX, COLLISION_MASK_AIM, None)
            .unwrap();

        assert_eq!(hit.entity, Entity::from_raw(2));
        assert!((hit.point.y - 1.5).abs() < 1e-5);
        assert!((hit.normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_mask_and_exclude_filter() {
        let scene = scene(&[
            (1, HeadlessCollider::ground(COLLISION_LAYER_ENVIRONMENT), Vec3::ZERO),
            (2, HeadlessCollider::sphere(0.5, COLLISION_LAYER_TARGETS), Vec3::new(0.0, 1.0, 0.0)),
        ]);
        let down = ray(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);

        let env_only = scene.cast_ray(down, f32::MAX, COLLISION_LAYER_ENVIRONMENT, None).unwrap();
        assert_eq!(env_only.entity, Entity::from_raw(1));

        let excluded = scene
            .cast_ray(down, f32::MAX, COLLISION_MASK_AIM, Some(Entity::from_raw(2)))
            .unwrap();
        assert_eq!(excluded.entity, Entity::from_raw(1));
    }

    #[test]
    fn test_max_distance_limits_hit() {
        let scene = scene(&[(1, HeadlessCollider::ground(COLLISION_LAYER_ENVIRONMENT), Vec3::ZERO)]);

        assert!(scene
            .cast_ray(ray(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y), 4.0, COLLISION_MASK_AIM, None)
            .is_none());
    }

    #[test]
    fn test_origin_inside_sphere_hits_exit_point() {
        let scene = scene(&[(3, HeadlessCollider::sphere(2.0, COLLISION_LAYER_TARGETS), Vec3::ZERO)]);

        let hit = scene
            .cast_ray(ray(Vec3::ZERO, Vec3::X), f32::MAX, COLLISION_MASK_AIM, None)
            .unwrap();

        assert!((hit.point - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }
}
