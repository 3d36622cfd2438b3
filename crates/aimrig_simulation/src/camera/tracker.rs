//! CameraTracker — camera anchor следует за aim point
//!
//! Desired position:
//! - направление = character → aim (горизонталь не форсируем, только итоговую высоту)
//! - дистанция = clamp(|aim - character|, min, effective_max)
//! - effective_max = min, если игрок движется вниз (ось < -0.5): камера не лезет в террейн
//! - y = character.y + AIM_PLANE_HEIGHT
//!
//! Anchor НЕ телепортируется: lerp к desired с t = follow_rate·Δt (clamped в [0, 1]).

use bevy::prelude::*;

use crate::aim::AimState;
use crate::components::{Player, PlayerInput};
use crate::config::{CameraConfig, AIM_PLANE_HEIGHT, DOWNWARD_INPUT_THRESHOLD};

/// Camera anchor state (владелец — CameraTracker)
///
/// Camera rig снаружи ядра читает `anchor_position` и ставит туда pivot.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraState {
    pub anchor_position: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub follow_rate: f32,
}

impl CameraState {
    pub fn new(config: &CameraConfig, anchor_position: Vec3) -> Self {
        Self {
            anchor_position,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            follow_rate: config.follow_rate,
        }
    }

    pub fn anchor_position(&self) -> Vec3 {
        self.anchor_position
    }

    pub fn effective_max_distance(&self, vertical_move_input: f32) -> f32 {
        if vertical_move_input < DOWNWARD_INPUT_THRESHOLD {
            self.min_distance
        } else {
            self.max_distance
        }
    }

    /// Куда камера хочет встать в этом кадре
    pub fn desired_position(
        &self,
        aim_point: Vec3,
        character_position: Vec3,
        vertical_move_input: f32,
    ) -> Vec3 {
        let offset = aim_point - character_position;
        // aim совпал с персонажем → направления нет, anchor над головой
        let direction = offset.normalize_or_zero();
        let distance = offset
            .length()
            .clamp(self.min_distance, self.effective_max_distance(vertical_move_input));

        let mut desired = character_position + direction * distance;
        desired.y = character_position.y + AIM_PLANE_HEIGHT;
        desired
    }

    /// Один шаг follow; возвращает новый anchor
    pub fn update(
        &mut self,
        aim_point: Vec3,
        character_position: Vec3,
        vertical_move_input: f32,
        delta: f32,
    ) -> Vec3 {
        let desired = self.desired_position(aim_point, character_position, vertical_move_input);
        let t = (self.follow_rate * delta).clamp(0.0, 1.0);

        self.anchor_position = self.anchor_position.lerp(desired, t);
        self.anchor_position
    }
}

/// System: camera follow для player (после resolve aim)
pub fn update_camera_anchor(
    mut players: Query<(&Transform, &AimState, &PlayerInput, &mut CameraState), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (transform, aim, input, mut camera) in players.iter_mut() {
        camera.update(
            aim.resolved_aim_point(),
            transform.translation,
            input.vertical_axis(),
            delta,
        );
    }
}
