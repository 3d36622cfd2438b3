//! Locomotion contribution — move axis → velocity, facing к aim point
//!
//! Ядро отвечает только за направление и скорость. Gravity, collision-shape
//! movement — снаружи (Rapier kinematic body). В headless режиме velocity
//! интегрируется прямо в Transform.
//!
//! Порядок внутри тика: facing → translation → animator параметры
//! (xVelocity/zVelocity считаются относительно уже повёрнутого персонажа).

use bevy::prelude::*;

use crate::aim::AimState;
use crate::animation::{damp_parameter, AnimatorParameters};
use crate::components::{Player, PlayerInput};
use crate::config::LocomotionConfig;

/// Мёртвая зона move axis
const MOVE_DEADZONE_SQUARED: f32 = 0.01;

/// Locomotion state персонажа
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionState {
    /// Горизонтальное направление движения (length <= 1)
    pub move_direction: Vec3,
    /// m/s, world space
    pub velocity: Vec3,
    pub is_running: bool,
}

impl LocomotionState {
    pub fn is_moving(&self) -> bool {
        self.move_direction.length_squared() > MOVE_DEADZONE_SQUARED
    }
}

/// Move axis → world direction `(x, 0, y)`, длина ограничена 1
pub fn move_direction(move_axis: Vec2) -> Vec3 {
    let direction = Vec3::new(move_axis.x, 0.0, move_axis.y);
    if direction.length_squared() <= MOVE_DEADZONE_SQUARED {
        return Vec3::ZERO;
    }
    direction.clamp_length_max(1.0)
}

/// Rotation, смотрящая на aim point в горизонтальной плоскости
///
/// `None` если aim point над/под персонажем (нет горизонтального направления).
pub fn facing_rotation(character_position: Vec3, aim_point: Vec3) -> Option<Quat> {
    let mut look = aim_point - character_position;
    look.y = 0.0;
    let direction = Dir3::new(look).ok()?;
    Some(Transform::IDENTITY.looking_to(direction, Dir3::Y).rotation)
}

/// Один шаг locomotion; возвращает новое состояние
pub fn step_locomotion(
    transform: &mut Transform,
    input: &PlayerInput,
    aim_point: Vec3,
    config: &LocomotionConfig,
    delta: f32,
) -> LocomotionState {
    if let Some(target) = facing_rotation(transform.translation, aim_point) {
        let t = (config.turn_speed * delta).clamp(0.0, 1.0);
        transform.rotation = transform.rotation.slerp(target, t);
    }

    let direction = move_direction(input.move_axis);
    let moving = direction != Vec3::ZERO;
    let is_running = input.run && moving;
    let speed = if is_running {
        config.run_speed
    } else {
        config.walk_speed
    };
    let velocity = direction * speed;
    transform.translation += velocity * delta;

    LocomotionState {
        move_direction: direction,
        velocity,
        is_running,
    }
}

/// System: locomotion + facing + animator velocity для player
pub fn apply_player_locomotion(
    mut players: Query<
        (
            &PlayerInput,
            &AimState,
            &LocomotionConfig,
            &mut Transform,
            &mut LocomotionState,
            &mut AnimatorParameters,
        ),
        With<Player>,
    >,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (input, aim, config, mut transform, mut locomotion, mut animator) in players.iter_mut() {
        *locomotion = step_locomotion(
            &mut transform,
            input,
            aim.resolved_aim_point(),
            config,
            delta,
        );

        let right = transform.right().as_vec3();
        let forward = transform.forward().as_vec3();
        animator.x_velocity = damp_parameter(
            animator.x_velocity,
            locomotion.move_direction.dot(right),
            config.animator_damp_time,
            delta,
        );
        animator.z_velocity = damp_parameter(
            animator.z_velocity,
            locomotion.move_direction.dot(forward),
            config.animator_damp_time,
            delta,
        );
        animator.is_running = locomotion.is_running;
    }
}
