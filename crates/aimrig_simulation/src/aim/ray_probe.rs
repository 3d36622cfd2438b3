//! RayProbe — cursor ray против scene collision
//!
//! Flow:
//! 1. AimCamera превращает курсор (viewport pixels) в world ray
//! 2. Backend (`SceneRaycast`: rapier или headless) делает query по маске
//! 3. Hit → новый cached "last known hit"; miss → остаётся предыдущий
//!
//! Промах НЕ ошибка: курсор, ушедший с геометрии на пару кадров, не должен
//! бросать aim point в origin.

use bevy::ecs::query::QuerySingleError;
use bevy::prelude::*;

use crate::components::{Player, PlayerInput};

/// Cursor ray бесконечный (rapier не любит `f32::INFINITY` в max_toi)
pub const UNBOUNDED_RAY_DISTANCE: f32 = f32::MAX;

/// Результат ray query
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub entity: Entity,
    /// Расстояние от origin луча до `point`
    pub distance: f32,
}

/// Scene/physics layer: ray query с маской слоёв
///
/// Реализации: `RapierSceneQuery` (production), `HeadlessScene` (headless/tests).
pub trait SceneRaycast {
    fn cast_ray(
        &self,
        ray: Ray3d,
        max_distance: f32,
        mask: u32,
        exclude: Option<Entity>,
    ) -> Option<RayHit>;
}

/// Per-character probe: маска + cached hit
#[derive(Component, Debug, Clone, Default)]
pub struct RayProbe {
    pub mask: u32,
    last_hit: Option<RayHit>,
}

impl RayProbe {
    pub fn new(mask: u32) -> Self {
        Self { mask, last_hit: None }
    }

    /// Cast + обновление кэша.
    ///
    /// Возвращает `None` только пока ни один луч ещё ни во что не попал.
    pub fn probe<R: SceneRaycast + ?Sized>(
        &mut self,
        raycaster: &R,
        ray: Ray3d,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        if let Some(hit) = raycaster.cast_ray(ray, UNBOUNDED_RAY_DISTANCE, self.mask, exclude) {
            self.last_hit = Some(hit);
        }
        self.last_hit
    }

    pub fn last_hit(&self) -> Option<RayHit> {
        self.last_hit
    }
}

/// Камера, через которую курсор проецируется в мир
///
/// Perspective projection, смотрит вдоль своего `-Z` (Bevy forward).
#[derive(Component, Debug, Clone, Copy)]
pub struct AimCamera {
    /// Размер viewport в пикселях
    pub viewport_size: Vec2,
    /// Vertical field of view (radians)
    pub fov_y: f32,
}

impl Default for AimCamera {
    fn default() -> Self {
        Self {
            viewport_size: Vec2::new(1280.0, 720.0),
            fov_y: 60f32.to_radians(),
        }
    }
}

impl AimCamera {
    /// Screen point (origin top-left) → world ray из позиции камеры
    pub fn screen_point_to_ray(&self, camera_transform: &Transform, screen_point: Vec2) -> Ray3d {
        let ndc = Vec2::new(
            2.0 * screen_point.x / self.viewport_size.x - 1.0,
            1.0 - 2.0 * screen_point.y / self.viewport_size.y,
        );
        let half_height = (self.fov_y * 0.5).tan();
        let aspect = self.viewport_size.x / self.viewport_size.y;

        let local = Vec3::new(ndc.x * half_height * aspect, ndc.y * half_height, -1.0);
        // Degenerate viewport → NaN → смотрим прямо вперёд
        let direction =
            Dir3::new(camera_transform.rotation * local).unwrap_or(camera_transform.forward());

        Ray3d::new(camera_transform.translation, direction)
    }
}

/// Один проход probe для всех player-персонажей.
///
/// Общая часть backend-систем: каждый backend собирает свой `SceneRaycast`
/// и вызывает это в `AimCoreSet::Sense`.
///
/// `camera_warned` — `Local` системы: warning про лишнюю AimCamera пишется
/// один раз, пока конфигурация не исправится.
pub fn run_ray_probes<R: SceneRaycast + ?Sized>(
    raycaster: &R,
    cameras: &Query<(&AimCamera, &Transform), Without<Player>>,
    probes: &mut Query<(Entity, &PlayerInput, &mut RayProbe), With<Player>>,
    camera_warned: &mut bool,
) {
    let (camera, camera_transform) = match cameras.single() {
        Ok(camera) => {
            *camera_warned = false;
            camera
        }
        Err(QuerySingleError::MultipleEntities(_)) => {
            if !*camera_warned {
                *camera_warned = true;
                crate::log_warning(&format!(
                    "⚠️ RayProbe: {} AimCamera entities, cursor probe paused until one is left",
                    cameras.iter().count()
                ));
            }
            return;
        }
        // Камера проверяется при spawn, её удаление — просто пропуск кадра
        Err(QuerySingleError::NoEntities(_)) => return,
    };

    for (entity, input, mut probe) in probes.iter_mut() {
        let ray = camera.screen_point_to_ray(camera_transform, input.cursor);
        let had_hit = probe.last_hit().is_some();

        if probe.probe(raycaster, ray, Some(entity)).is_some() && !had_hit {
            crate::log(&format!("🎯 Aim probe: first hit for {:?}", entity));
        }
    }
}
