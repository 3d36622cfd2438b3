//! WeaponDirector — направление пули + выстрел
//!
//! Architecture:
//! - `bullet_direction` — чистая функция (aim point, muzzle pose, режимы), НЕ кэшируется:
//!   дуло и aim двигаются каждый кадр
//! - `fire_player_weapon` — discrete fire edge → ProjectileSpawnRequest + Fire trigger
//! - Cooldown/ammo здесь нет (внешний weapon-stats collaborator)

use bevy::prelude::*;

use crate::aim::AimState;
use crate::animation::{AnimatorTrigger, AnimatorTriggerFired};
use crate::components::{Player, PlayerInput};
use crate::config::WeaponConfig;
use crate::equipment::Loadout;
use crate::rig::RigBlendState;
use crate::shooting::ProjectileSpawnRequest;

/// World pose дула активного оружия
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MuzzlePose {
    pub position: Vec3,
    /// Forward ствола (unit)
    pub forward: Vec3,
}

impl Default for MuzzlePose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }
}

impl MuzzlePose {
    pub fn from_character(character: &Transform, muzzle_offset: Vec3) -> Self {
        Self {
            position: character.transform_point(muzzle_offset),
            forward: character.forward().as_vec3(),
        }
    }
}

/// Derived value: куда полетит пуля
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponAimDirection {
    /// Unit vector
    pub direction: Vec3,
    /// true = y был обнулён (imprecise aim без lock-on)
    pub vertical_component_suppressed: bool,
}

impl WeaponAimDirection {
    /// То же, что `bullet_direction`, с режимами из AimState
    pub fn for_aim(aim: &AimState, muzzle: &MuzzlePose) -> Self {
        bullet_direction(
            aim.resolved_aim_point(),
            muzzle,
            aim.can_aim_precisely(),
            aim.has_locked_target(),
        )
    }
}

/// Направление от дула к aim point.
///
/// Без precision и без lock-on цели вертикаль обнуляется (шальные выстрелы летят
/// горизонтально); результат всегда ренормализуется. Если направление выродилось
/// (aim в дуле или строго над ним) — стреляем вдоль ствола.
pub fn bullet_direction(
    aim_point: Vec3,
    muzzle: &MuzzlePose,
    precision_enabled: bool,
    has_locked_target: bool,
) -> WeaponAimDirection {
    let suppress_vertical = !precision_enabled && !has_locked_target;

    let mut direction = (aim_point - muzzle.position).normalize_or_zero();
    if suppress_vertical {
        direction.y = 0.0;
    }

    WeaponAimDirection {
        direction: direction.try_normalize().unwrap_or(muzzle.forward),
        vertical_component_suppressed: suppress_vertical,
    }
}

/// System: MuzzlePose из позы персонажа + offset активного оружия
pub fn update_muzzle_pose(
    mut players: Query<(&Transform, &Loadout, &RigBlendState, &mut MuzzlePose), With<Player>>,
) {
    for (transform, loadout, rig, mut muzzle) in players.iter_mut() {
        let Some(gun) = loadout.slot(rig.active_gun_index) else {
            continue;
        };
        *muzzle = MuzzlePose::from_character(transform, gun.muzzle_offset());
    }
}

/// System: fire edge → spawn request + animator Fire trigger
pub fn fire_player_weapon(
    players: Query<(Entity, &PlayerInput, &AimState, &MuzzlePose, &WeaponConfig), With<Player>>,
    mut spawn_requests: EventWriter<ProjectileSpawnRequest>,
    mut triggers: EventWriter<AnimatorTriggerFired>,
) {
    for (entity, input, aim, muzzle, weapon) in players.iter() {
        if !input.fire {
            continue;
        }

        let aim_direction = WeaponAimDirection::for_aim(aim, muzzle);
        let orientation = Transform::default()
            .looking_to(muzzle.forward, Vec3::Y)
            .rotation;

        spawn_requests.write(ProjectileSpawnRequest {
            shooter: entity,
            position: muzzle.position,
            orientation,
            velocity: aim_direction.direction * weapon.bullet_speed,
            lifetime: weapon.bullet_lifetime,
        });
        triggers.write(AnimatorTriggerFired {
            entity,
            trigger: AnimatorTrigger::Fire,
        });

        crate::log(&format!(
            "🔫 {:?} fired: dir={:?} (vertical suppressed: {})",
            entity, aim_direction.direction, aim_direction.vertical_component_suppressed
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn muzzle_at(position: Vec3) -> MuzzlePose {
        MuzzlePose {
            position,
            forward: Vec3::NEG_Z,
        }
    }

    #[test]
    fn test_imprecise_direction_is_horizontal_unit() {
        let muzzle = muzzle_at(Vec3::new(0.0, 1.4, 0.0));
        let result = bullet_direction(Vec3::new(3.0, 5.0, 4.0), &muzzle, false, false);

        assert!(result.vertical_component_suppressed);
        assert_eq!(result.direction.y, 0.0);
        assert!((result.direction.length() - 1.0).abs() < 1e-5);
        assert!((result.direction - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_precision_keeps_full_3d_direction() {
        let muzzle = muzzle_at(Vec3::ZERO);
        let result = bullet_direction(Vec3::new(0.0, 3.0, -4.0), &muzzle, true, false);

        assert!(!result.vertical_component_suppressed);
        assert!((result.direction - Vec3::new(0.0, 0.6, -0.8)).length() < 1e-5);
    }

    #[test]
    fn test_locked_target_keeps_full_3d_direction() {
        let muzzle = muzzle_at(Vec3::ZERO);
        let result = bullet_direction(Vec3::new(0.0, -3.0, -4.0), &muzzle, false, true);

        assert!(!result.vertical_component_suppressed);
        assert!(result.direction.y < 0.0);
    }

    #[test]
    fn test_aim_straight_above_falls_back_to_barrel() {
        let muzzle = muzzle_at(Vec3::ZERO);
        let result = bullet_direction(Vec3::new(0.0, 5.0, 0.0), &muzzle, false, false);

        assert_eq!(result.direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_muzzle_follows_character_rotation() {
        let character = Transform::from_xyz(1.0, 0.0, 0.0)
            .looking_to(Vec3::X, Vec3::Y);
        let muzzle = MuzzlePose::from_character(&character, Vec3::new(0.0, 1.0, -2.0));

        // local -Z (forward) теперь мировой +X
        assert!((muzzle.position - Vec3::new(3.0, 1.0, 0.0)).length() < 1e-5);
        assert!((muzzle.forward - Vec3::X).length() < 1e-5);
    }
}
