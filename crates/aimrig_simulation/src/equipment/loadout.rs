//! Loadout: 5 weapon slots (hotkeys 1-5)
//!
//! Каждый слот знает свой animation layer, grab style и две точки на модели
//! оружия: дуло (MuzzlePose) и grip для левой руки (LeftHandIkTarget,
//! position + rotation).

use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Hotkeys 1-5
pub const MAX_LOADOUT_SLOTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum GunKind {
    Pistol,
    Revolver,
    AutoRifle,
    Shotgun,
    Rifle,
}

/// Вариант анимации доставания оружия
///
/// Значение уходит в animator как `WeaponGrabType` float (0 = side, 1 = back).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum GrabStyle {
    SideGrab,
    BackGrab,
}

impl GrabStyle {
    pub fn as_parameter(self) -> f32 {
        match self {
            GrabStyle::SideGrab => 0.0,
            GrabStyle::BackGrab => 1.0,
        }
    }
}

/// Описание одного слота
///
/// Offsets — в local space персонажа (x = right, y = up, -z = forward).
/// `None` = точка не настроена на модели → ConfigError при spawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GunSpec {
    pub kind: GunKind,
    /// Animator layer (1..ANIMATION_LAYER_COUNT), layer 0 = base locomotion
    pub animation_layer: usize,
    pub grab_style: GrabStyle,
    pub muzzle_offset: Option<[f32; 3]>,
    pub left_hand_grip: Option<[f32; 3]>,
    /// Ориентация grip'а, quaternion `[x, y, z, w]`
    pub left_hand_grip_rotation: Option<[f32; 4]>,
}

impl GunSpec {
    fn new(
        kind: GunKind,
        animation_layer: usize,
        grab_style: GrabStyle,
        muzzle_offset: [f32; 3],
        left_hand_grip: [f32; 3],
        left_hand_grip_rotation: Quat,
    ) -> Self {
        Self {
            kind,
            animation_layer,
            grab_style,
            muzzle_offset: Some(muzzle_offset),
            left_hand_grip: Some(left_hand_grip),
            left_hand_grip_rotation: Some(left_hand_grip_rotation.to_array()),
        }
    }

    pub fn muzzle_offset(&self) -> Vec3 {
        self.muzzle_offset.map(Vec3::from_array).unwrap_or(Vec3::ZERO)
    }

    pub fn left_hand_grip(&self) -> Vec3 {
        self.left_hand_grip.map(Vec3::from_array).unwrap_or(Vec3::ZERO)
    }

    /// Нормализованная ориентация grip'а (blueprint может хранить неточный quaternion)
    pub fn left_hand_grip_rotation(&self) -> Quat {
        self.left_hand_grip_rotation
            .map(|xyzw| Quat::from_array(xyzw).normalize())
            .unwrap_or(Quat::IDENTITY)
    }
}

/// Все оружие персонажа, индекс = slot (hotkey - 1)
#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub guns: Vec<GunSpec>,
}

impl Default for Loadout {
    fn default() -> Self {
        use GrabStyle::*;
        use GunKind::*;

        // Пистолеты: ладонь под рукоятью. Длинные стволы: ладонь под цевьём
        let handgun_grip = Quat::from_rotation_z(FRAC_PI_2);
        let foregrip = Quat::from_rotation_z(FRAC_PI_2) * Quat::from_rotation_x(-FRAC_PI_6);

        Self {
            guns: vec![
                GunSpec::new(Pistol, 1, SideGrab, [0.25, 1.35, -0.55], [0.0, -0.05, 0.1], handgun_grip),
                GunSpec::new(Revolver, 1, SideGrab, [0.25, 1.35, -0.6], [0.0, -0.05, 0.1], handgun_grip),
                GunSpec::new(AutoRifle, 1, BackGrab, [0.2, 1.3, -0.9], [0.0, -0.08, -0.3], foregrip),
                GunSpec::new(Shotgun, 2, BackGrab, [0.2, 1.3, -1.0], [0.0, -0.1, -0.35], foregrip),
                GunSpec::new(Rifle, 3, BackGrab, [0.2, 1.3, -1.1], [0.0, -0.08, -0.4], foregrip),
            ],
        }
    }
}

impl Loadout {
    pub fn slot(&self, index: usize) -> Option<&GunSpec> {
        self.guns.get(index)
    }
}

/// Local target для two-bone IK левой руки
///
/// Копируется из grip активного оружия при каждом switch ("attach left hand"):
/// и позиция, и ориентация.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LeftHandIkTarget {
    pub local_position: Vec3,
    pub local_rotation: Quat,
}

impl Default for LeftHandIkTarget {
    fn default() -> Self {
        Self {
            local_position: Vec3::ZERO,
            local_rotation: Quat::IDENTITY,
        }
    }
}

impl LeftHandIkTarget {
    pub fn from_gun(gun: &GunSpec) -> Self {
        Self {
            local_position: gun.left_hand_grip(),
            local_rotation: gun.left_hand_grip_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slot_table() {
        let loadout = Loadout::default();
        let table: Vec<_> = loadout
            .guns
            .iter()
            .map(|gun| (gun.kind, gun.animation_layer, gun.grab_style))
            .collect();

        assert_eq!(
            table,
            vec![
                (GunKind::Pistol, 1, GrabStyle::SideGrab),
                (GunKind::Revolver, 1, GrabStyle::SideGrab),
                (GunKind::AutoRifle, 1, GrabStyle::BackGrab),
                (GunKind::Shotgun, 2, GrabStyle::BackGrab),
                (GunKind::Rifle, 3, GrabStyle::BackGrab),
            ]
        );
    }

    #[test]
    fn test_grab_style_parameter() {
        assert_eq!(GrabStyle::SideGrab.as_parameter(), 0.0);
        assert_eq!(GrabStyle::BackGrab.as_parameter(), 1.0);
    }

    #[test]
    fn test_left_hand_target_copies_grip_pose() {
        let mut gun = Loadout::default().guns[2].clone();
        gun.left_hand_grip_rotation = Some([0.0, 0.0, 2.0, 0.0]);

        let target = LeftHandIkTarget::from_gun(&gun);
        assert_eq!(target.local_position, Vec3::new(0.0, -0.08, -0.3));
        // Quaternion из blueprint нормализуется
        assert_eq!(target.local_rotation, Quat::from_xyzw(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_default_guns_have_distinct_grip_rotations() {
        let loadout = Loadout::default();
        assert_ne!(
            loadout.guns[0].left_hand_grip_rotation(),
            loadout.guns[2].left_hand_grip_rotation()
        );
        assert!(loadout.guns.iter().all(|gun| gun.left_hand_grip_rotation().is_normalized()));
    }

    #[test]
    fn test_slot_out_of_range() {
        assert!(Loadout::default().slot(5).is_none());
    }
}
