//! Tunables персонажа + blueprint loading
//!
//! Каждая секция — отдельный Component на character entity (как AIConfig),
//! чтобы системы брали только свой кусок конфигурации.
//! Defaults совпадают с исходными значениями инспектора.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::animation::ANIMATION_LAYER_COUNT;
use crate::collision::COLLISION_MASK_AIM;
use crate::equipment::{Loadout, MAX_LOADOUT_SLOTS};

pub mod error;

pub use error::ConfigError;

/// Высота "плеча" над позицией персонажа: плоскость imprecise aim и высота camera anchor
pub const AIM_PLANE_HEIGHT: f32 = 1.0;

/// Ось движения ниже этого порога = "движемся вниз", камера подтягивается к min distance
pub const DOWNWARD_INPUT_THRESHOLD: f32 = -0.5;

/// Rig weight на время grab/reload (руки не спорят с анимацией)
pub const REDUCED_RIG_WEIGHT: f32 = 0.15;

/// Cursor ray + aim plane
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Collision mask для cursor ray (см. `collision`)
    pub aim_mask: u32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            aim_mask: COLLISION_MASK_AIM,
        }
    }
}

/// Camera anchor follow
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Lerp rate (1/sec), "camera sensitivity"
    pub follow_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: 1.5,
            max_distance: 4.0,
            follow_rate: 5.0,
        }
    }
}

/// Rig / left hand IK ramp rates (weight/sec)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub rig_weight_increase_rate: f32,
    pub left_hand_ik_weight_increase_rate: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            rig_weight_increase_rate: 2.5,
            left_hand_ik_weight_increase_rate: 2.5,
        }
    }
}

/// Projectile + aim laser
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Muzzle speed (m/s)
    pub bullet_speed: f32,
    /// Время жизни пули (sec)
    pub bullet_lifetime: f32,
    /// Длина лазерного прицела от дула (m)
    pub laser_distance: f32,
    /// "Хвост" лазера за концом, когда луч ни во что не упёрся (m)
    pub laser_tip_length: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            bullet_speed: 20.0,
            bullet_lifetime: 2.0,
            laser_distance: 4.0,
            laser_tip_length: 0.5,
        }
    }
}

/// Walk/run + поворот к aim point
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Slerp rate поворота (1/sec)
    pub turn_speed: f32,
    /// Damp time для xVelocity/zVelocity (sec)
    pub animator_damp_time: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 6.0,
            turn_speed: 10.0,
            animator_damp_time: 0.1,
        }
    }
}

/// Полная конфигурация персонажа (spawn input)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterBlueprint {
    pub aim: AimConfig,
    pub camera: CameraConfig,
    pub rig: RigConfig,
    pub weapon: WeaponConfig,
    pub locomotion: LocomotionConfig,
    pub loadout: Loadout,
}

impl CharacterBlueprint {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let blueprint: Self = serde_json::from_str(json)?;
        blueprint.validate()?;
        Ok(blueprint)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Fail fast: всё, без чего персонаж не может работать, проверяется до spawn
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aim.aim_mask == 0 {
            return Err(ConfigError::EmptyAimMask);
        }

        let camera = &self.camera;
        if !(camera.min_distance > 0.0 && camera.min_distance <= camera.max_distance) {
            return Err(ConfigError::InvalidCameraRange {
                min: camera.min_distance,
                max: camera.max_distance,
            });
        }

        let rates = [
            ("camera.follow_rate", camera.follow_rate),
            ("rig.rig_weight_increase_rate", self.rig.rig_weight_increase_rate),
            (
                "rig.left_hand_ik_weight_increase_rate",
                self.rig.left_hand_ik_weight_increase_rate,
            ),
            ("weapon.bullet_speed", self.weapon.bullet_speed),
            ("weapon.bullet_lifetime", self.weapon.bullet_lifetime),
            ("weapon.laser_distance", self.weapon.laser_distance),
            ("locomotion.walk_speed", self.locomotion.walk_speed),
            ("locomotion.run_speed", self.locomotion.run_speed),
            ("locomotion.turn_speed", self.locomotion.turn_speed),
            ("locomotion.animator_damp_time", self.locomotion.animator_damp_time),
        ];
        for (name, value) in rates {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let count = self.loadout.guns.len();
        if count == 0 || count > MAX_LOADOUT_SLOTS {
            return Err(ConfigError::InvalidLoadoutSize {
                count,
                max: MAX_LOADOUT_SLOTS,
            });
        }

        for (slot, gun) in self.loadout.guns.iter().enumerate() {
            if gun.muzzle_offset.is_none() {
                return Err(ConfigError::MissingMuzzle { slot, kind: gun.kind });
            }
            let (Some(_), Some(rotation)) = (gun.left_hand_grip, gun.left_hand_grip_rotation) else {
                return Err(ConfigError::MissingLeftHandTarget { slot, kind: gun.kind });
            };
            let length = Vec4::from_array(rotation).length();
            if !(length.is_finite() && length > f32::EPSILON) {
                return Err(ConfigError::InvalidLeftHandRotation {
                    slot,
                    kind: gun.kind,
                    rotation,
                });
            }
            if gun.animation_layer == 0 || gun.animation_layer >= ANIMATION_LAYER_COUNT {
                return Err(ConfigError::InvalidAnimationLayer {
                    slot,
                    kind: gun.kind,
                    layer: gun.animation_layer,
                    layer_count: ANIMATION_LAYER_COUNT,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blueprint_is_valid() {
        let blueprint = CharacterBlueprint::default();
        assert!(blueprint.validate().is_ok());
        assert_eq!(blueprint.camera.min_distance, 1.5);
        assert_eq!(blueprint.camera.max_distance, 4.0);
        assert_eq!(blueprint.camera.follow_rate, 5.0);
        assert_eq!(blueprint.loadout.guns.len(), 5);
    }

    #[test]
    fn test_empty_aim_mask_rejected() {
        let mut blueprint = CharacterBlueprint::default();
        blueprint.aim.aim_mask = 0;
        assert!(matches!(blueprint.validate(), Err(ConfigError::EmptyAimMask)));
    }

    #[test]
    fn test_missing_muzzle_rejected() {
        let mut blueprint = CharacterBlueprint::default();
        blueprint.loadout.guns[3].muzzle_offset = None;
        assert!(matches!(
            blueprint.validate(),
            Err(ConfigError::MissingMuzzle { slot: 3, .. })
        ));
    }

    #[test]
    fn test_missing_left_hand_target_rejected() {
        let mut blueprint = CharacterBlueprint::default();
        blueprint.loadout.guns[0].left_hand_grip = None;
        assert!(matches!(
            blueprint.validate(),
            Err(ConfigError::MissingLeftHandTarget { slot: 0, .. })
        ));
    }

    #[test]
    fn test_missing_left_hand_rotation_rejected() {
        let mut blueprint = CharacterBlueprint::default();
        blueprint.loadout.guns[4].left_hand_grip_rotation = None;
        assert!(matches!(
            blueprint.validate(),
            Err(ConfigError::MissingLeftHandTarget { slot: 4, .. })
        ));
    }

    #[test]
    fn test_zero_left_hand_rotation_rejected() {
        let mut blueprint = CharacterBlueprint::default();
        blueprint.loadout.guns[1].left_hand_grip_rotation = Some([0.0; 4]);
        assert!(matches!(
            blueprint.validate(),
            Err(ConfigError::InvalidLeftHandRotation { slot: 1, .. })
        ));
    }

    #[test]
    fn test_inverted_camera_range_rejected() {
        let mut blueprint = CharacterBlueprint::default();
        blueprint.camera.min_distance = 5.0;
        assert!(matches!(
            blueprint.validate(),
            Err(ConfigError::InvalidCameraRange { .. })
        ));
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let mut blueprint = CharacterBlueprint::default();
        blueprint.rig.left_hand_ik_weight_increase_rate = 0.0;
        assert!(matches!(
            blueprint.validate(),
            Err(ConfigError::NonPositive {
                name: "rig.left_hand_ik_weight_increase_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{ "camera": { "max_distance": 3.0 }, "rig": { "rig_weight_increase_rate": 4.0 } }"#;
        let blueprint = CharacterBlueprint::from_json_str(json).expect("valid blueprint");

        assert_eq!(blueprint.camera.max_distance, 3.0);
        assert_eq!(blueprint.camera.min_distance, 1.5);
        assert_eq!(blueprint.rig.rig_weight_increase_rate, 4.0);
        assert_eq!(blueprint.loadout, Loadout::default());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = CharacterBlueprint::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
