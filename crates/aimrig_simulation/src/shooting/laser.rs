//! Aim laser — три точки polyline для внешнего line renderer
//!
//! [muzzle, end, end + dir·tip]:
//! - луч вдоль bullet direction на `laser_distance`
//! - упёрся во что-то → end = hit, tip = 0
//! - иначе end = muzzle + dir·distance, tip = `laser_tip_length`

use bevy::prelude::*;

use crate::aim::{AimState, SceneRaycast};
use crate::collision::COLLISION_MASK_LASER;
use crate::components::Player;
use crate::config::WeaponConfig;
use crate::shooting::{MuzzlePose, WeaponAimDirection};

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AimLaser {
    pub points: [Vec3; 3],
}

pub fn laser_points<R: SceneRaycast + ?Sized>(
    raycaster: &R,
    muzzle: &MuzzlePose,
    direction: Vec3,
    weapon: &WeaponConfig,
    shooter: Entity,
) -> [Vec3; 3] {
    let Ok(dir) = Dir3::new(direction) else {
        return [muzzle.position; 3];
    };

    let ray = Ray3d::new(muzzle.position, dir);
    let (end, tip_length) = match raycaster.cast_ray(
        ray,
        weapon.laser_distance,
        COLLISION_MASK_LASER,
        Some(shooter),
    ) {
        Some(hit) => (hit.point, 0.0),
        None => (ray.get_point(weapon.laser_distance), weapon.laser_tip_length),
    };

    [muzzle.position, end, end + dir.as_vec3() * tip_length]
}

/// Общая часть backend-систем (`AimCoreSet::Act`, после resolve)
pub fn run_aim_lasers<R: SceneRaycast + ?Sized>(
    raycaster: &R,
    players: &mut Query<(Entity, &AimState, &MuzzlePose, &WeaponConfig, &mut AimLaser), With<Player>>,
) {
    for (entity, aim, muzzle, weapon, mut laser) in players.iter_mut() {
        let direction = WeaponAimDirection::for_aim(aim, muzzle).direction;
        laser.points = laser_points(raycaster, muzzle, direction, weapon, entity);
    }
}
