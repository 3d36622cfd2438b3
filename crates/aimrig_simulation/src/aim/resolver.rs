//! AimResolver — cached ray hit → aim point
//!
//! Правила (в порядке приоритета):
//! 1. Lock-on включён И entity под курсором `Targetable` → aim = позиция цели
//!    (каждый кадр, цель может двигаться)
//! 2. Иначе aim = точка hit'а
//! 3. Precision выключен → y прижимается к плоскости плеча (`y + AIM_PLANE_HEIGHT`),
//!    чтобы не целиться в землю под курсором
//!
//! Toggle режимов — мгновенный, по key edge.

use bevy::prelude::*;

use crate::aim::{RayHit, RayProbe};
use crate::components::{Player, PlayerInput, Targetable};
use crate::config::AIM_PLANE_HEIGHT;

/// Aim state персонажа (владелец — AimResolver)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AimState {
    /// Копия cached hit из RayProbe (никогда не сбрасывается в None после первого hit)
    pub current_ray_hit: Option<RayHit>,
    pub precision_mode: bool,
    pub lock_on_mode: bool,
    pub resolved_aim_point: Vec3,
    /// Entity, к которой сейчас прибит aim (только пока она под курсором)
    pub locked_target: Option<Entity>,
}

impl AimState {
    /// Стартовый aim: перед персонажем на высоте плеча
    pub fn facing(character: &Transform) -> Self {
        Self {
            resolved_aim_point: character.translation
                + character.forward().as_vec3()
                + Vec3::Y * AIM_PLANE_HEIGHT,
            ..default()
        }
    }

    pub fn resolved_aim_point(&self) -> Vec3 {
        self.resolved_aim_point
    }

    pub fn can_aim_precisely(&self) -> bool {
        self.precision_mode
    }

    pub fn has_locked_target(&self) -> bool {
        self.locked_target.is_some()
    }

    /// Применить toggle edges; возвращает true если что-то переключилось
    pub fn apply_toggles(&mut self, input: &PlayerInput) -> bool {
        if input.toggle_precision {
            self.precision_mode = !self.precision_mode;
        }
        if input.toggle_lock_on {
            self.lock_on_mode = !self.lock_on_mode;
        }
        input.toggle_precision || input.toggle_lock_on
    }
}

/// Чистая функция aim point.
///
/// `target_position` — позиция entity под hit'ом, если она `Targetable` (иначе `None`).
pub fn resolve_aim_point(
    hit: &RayHit,
    target_position: Option<Vec3>,
    lock_on_enabled: bool,
    precision_enabled: bool,
    character_position: Vec3,
) -> Vec3 {
    if lock_on_enabled {
        if let Some(target) = target_position {
            return target;
        }
    }

    let mut aim = hit.point;
    if !precision_enabled {
        aim.y = character_position.y + AIM_PLANE_HEIGHT;
    }
    aim
}

/// System: toggles + resolve aim для player
///
/// Запускается после probe (`AimCoreSet::Resolve`) — потребители того же тика
/// видят уже свежий aim point.
pub fn resolve_player_aim(
    mut players: Query<(Entity, &Transform, &RayProbe, &PlayerInput, &mut AimState), With<Player>>,
    targets: Query<&Transform, With<Targetable>>,
) {
    for (entity, transform, probe, input, mut aim) in players.iter_mut() {
        if aim.apply_toggles(input) {
            crate::log_info(&format!(
                "🔧 Aim modes for {:?}: precision={}, lock_on={}",
                entity, aim.precision_mode, aim.lock_on_mode
            ));
        }

        aim.current_ray_hit = probe.last_hit();

        // Ни одного hit ещё не было — держим предыдущий aim point
        let Some(hit) = aim.current_ray_hit else {
            aim.locked_target = None;
            continue;
        };

        let target_position = targets.get(hit.entity).ok().map(|target| target.translation);
        let locked = if aim.lock_on_mode && target_position.is_some() {
            Some(hit.entity)
        } else {
            None
        };

        if locked != aim.locked_target {
            match locked {
                Some(target) => crate::log_info(&format!("🔒 Lock-on acquired: {:?}", target)),
                None => crate::log(&format!("🔓 Lock-on released for {:?}", entity)),
            }
            aim.locked_target = locked;
        }

        aim.resolved_aim_point = resolve_aim_point(
            &hit,
            target_position,
            aim.lock_on_mode,
            aim.precision_mode,
            transform.translation,
        );
    }
}
