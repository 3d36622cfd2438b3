//! AIMRIG Simulation Core
//!
//! Control core персонажа third-person shooter'а на Bevy 0.16 ECS:
//! cursor ray → aim point → camera anchor / bullet direction / rig weights.
//!
//! Ядро НЕ рендерит, НЕ проигрывает анимации и НЕ считает урон. Наружу уходят
//! значения (aim point, camera anchor, rig/IK weights, animator параметры) и
//! events (ProjectileSpawnRequest, AnimatorTriggerFired, RigWeightSettled).
//!
//! Тик (FixedUpdate, 60Hz):
//! ```text
//! Sense    — muzzle pose, cursor ray probe, projectile movement
//! Resolve  — aim point (lock-on / precision)
//! Act      — camera follow, fire, weapon switch/reload + rig ramp, locomotion, aim laser
//! Present  — projectile spawn
//! Cleanup  — сброс key edges
//! ```

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod aim;
pub mod animation;
pub mod camera;
pub mod collision;
pub mod components;
pub mod config;
pub mod equipment;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod rig;
pub mod shooting;
pub mod spawn;

// Re-export базовых типов для удобства
pub use aim::{AimCamera, AimState, RayHit, RayProbe, SceneRaycast};
pub use animation::{AnimatorParameters, AnimatorTrigger, AnimatorTriggerFired};
pub use camera::CameraState;
pub use components::*;
pub use config::{CharacterBlueprint, ConfigError};
pub use equipment::{GrabStyle, GunKind, GunSpec, LeftHandIkTarget, Loadout};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    LogLevel, LogPrinter,
};
pub use movement::LocomotionState;
pub use physics::{HeadlessCollider, HeadlessProbePlugin, RapierProbePlugin};
pub use rig::{
    GrabAnimationComplete, ReloadAnimationComplete, RigBlendState, RigChannel, RigPhase,
    RigWeightSettled,
};
pub use shooting::{AimLaser, MuzzlePose, Projectile, ProjectilePlugin, ProjectileSpawnRequest};
pub use spawn::spawn_player_character;

/// Длительность одного simulation тика (60Hz)
pub const TICK: Duration = Duration::from_nanos(16_666_667);

/// Фазы тика ядра (FixedUpdate, строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AimCoreSet {
    Sense,
    Resolve,
    Act,
    Present,
    Cleanup,
}

/// Главный plugin симуляции (без scene backend'а)
///
/// Backend добавляется отдельно: `HeadlessProbePlugin` или `RapierProbePlugin`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileSpawnRequest>()
            .add_event::<AnimatorTriggerFired>()
            .add_event::<GrabAnimationComplete>()
            .add_event::<ReloadAnimationComplete>()
            .add_event::<RigWeightSettled>()
            .configure_sets(
                FixedUpdate,
                (
                    AimCoreSet::Sense,
                    AimCoreSet::Resolve,
                    AimCoreSet::Act,
                    AimCoreSet::Present,
                    AimCoreSet::Cleanup,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    shooting::update_muzzle_pose.in_set(AimCoreSet::Sense),
                    aim::resolve_player_aim.in_set(AimCoreSet::Resolve),
                    (
                        camera::update_camera_anchor,
                        shooting::fire_player_weapon,
                        rig::update_rig_blend,
                        movement::apply_player_locomotion,
                    )
                        .chain()
                        .in_set(AimCoreSet::Act),
                    components::clear_input_edges.in_set(AimCoreSet::Cleanup),
                ),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Общая часть headless app: время, RNG, ядро, projectile spawner
fn create_core_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK))
        .insert_resource(Time::<Fixed>::from_duration(TICK))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins((SimulationPlugin, ProjectilePlugin));

    app
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` двигает время ровно на один TICK → ровно один
/// FixedUpdate (кроме самого первого update, который только запускает часы).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = create_core_app(seed);
    app.add_plugins(HeadlessProbePlugin);

    app
}

/// То же, но scene queries идут через Rapier
///
/// Коллайдеры сцены — rapier `Collider` + `CollisionGroups`. Rapier синхронизирует
/// их в PostUpdate, поэтому первый hit появляется не раньше второго тика.
pub fn create_rapier_app(seed: u64) -> App {
    use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};

    let mut app = create_core_app(seed);
    app.add_plugins((
        bevy::transform::TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::default(),
        RapierProbePlugin,
    ));

    app
}

/// Прогнать `ticks` тиков симуляции
pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
