//! Spawn helper для player-персонажа
//!
//! Fail fast: blueprint валидируется и ровно одна AimCamera должна существовать ДО spawn.
//! После spawn ни одна система ядра не возвращает ошибок.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::aim::{AimCamera, AimState, RayProbe};
use crate::animation::AnimatorParameters;
use crate::camera::CameraState;
use crate::collision::actor_groups;
use crate::components::{Player, PlayerInput};
use crate::config::{CharacterBlueprint, ConfigError};
use crate::equipment::LeftHandIkTarget;
use crate::movement::LocomotionState;
use crate::rig::RigBlendState;
use crate::shooting::{AimLaser, MuzzlePose};

/// Стартовый слот (hotkey 1), без grab анимации
const STARTING_GUN_INDEX: usize = 0;

/// Spawn player-персонажа с полным набором компонентов ядра
///
/// Создаёт entity:
/// - Transform + Player + PlayerInput
/// - RayProbe / AimState / CameraState / RigBlendState (state каждого модуля)
/// - AnimatorParameters, LeftHandIkTarget, MuzzlePose, AimLaser, LocomotionState
/// - Configs + Loadout из blueprint
/// - Rapier: kinematic capsule на слое Actors
pub fn spawn_player_character(
    world: &mut World,
    blueprint: &CharacterBlueprint,
    position: Vec3,
) -> Result<Entity, ConfigError> {
    blueprint.validate()?;

    // Cursor ray строится от единственной AimCamera
    let camera_count = world
        .query_filtered::<(), With<AimCamera>>()
        .iter(world)
        .count();
    match camera_count {
        0 => return Err(ConfigError::MissingAimCamera),
        1 => {}
        count => return Err(ConfigError::AmbiguousAimCamera { count }),
    }

    let transform = Transform::from_translation(position);
    let aim = AimState::facing(&transform);

    let mut camera = CameraState::new(&blueprint.camera, position);
    camera.anchor_position = camera.desired_position(aim.resolved_aim_point(), position, 0.0);

    let rig = RigBlendState::new(STARTING_GUN_INDEX);
    let (muzzle, left_hand) = match blueprint.loadout.slot(STARTING_GUN_INDEX) {
        Some(gun) => (
            MuzzlePose::from_character(&transform, gun.muzzle_offset()),
            LeftHandIkTarget::from_gun(gun),
        ),
        // validate() гарантирует хотя бы один слот
        None => (MuzzlePose::default(), LeftHandIkTarget::default()),
    };

    let entity = world
        .spawn((
            // Bevy transform + control
            (transform, Player, PlayerInput::default()),
            // Module state
            (
                RayProbe::new(blueprint.aim.aim_mask),
                aim,
                camera,
                rig,
                AnimatorParameters::default(),
                left_hand,
                muzzle,
                AimLaser::default(),
                LocomotionState::default(),
            ),
            // Tunables
            (
                blueprint.aim.clone(),
                blueprint.camera.clone(),
                blueprint.rig.clone(),
                blueprint.weapon.clone(),
                blueprint.locomotion.clone(),
                blueprint.loadout.clone(),
            ),
            // Rapier physics
            (
                RigidBody::KinematicPositionBased,
                Collider::capsule_y(0.5, 0.4),
                actor_groups(),
            ),
        ))
        .id();

    crate::log_info(&format!(
        "🧍 Player character spawned: {:?} at {:?} ({} guns)",
        entity,
        position,
        blueprint.loadout.guns.len()
    ));

    Ok(entity)
}
