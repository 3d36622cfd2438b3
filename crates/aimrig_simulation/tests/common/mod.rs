//! Общие helpers для integration тестов
//!
//! Сцена: top-down камера над origin, земля (y = 0), одна lock-on цель
//! (сфера r = 0.5) и player-персонаж в origin. Backend — headless или Rapier.

#![allow(dead_code)]

use aimrig_simulation::collision::{
    environment_groups, target_groups, COLLISION_LAYER_ENVIRONMENT, COLLISION_LAYER_TARGETS,
};
use aimrig_simulation::*;
use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

pub const TARGET_POSITION: Vec3 = Vec3::new(4.0, 1.0, -4.0);
pub const TARGET_RADIUS: f32 = 0.5;

/// Длительность тика в секундах (как её видит `Time<Fixed>`)
pub fn dt() -> f32 {
    TICK.as_secs_f32()
}

pub struct TestScene {
    pub app: App,
    pub player: Entity,
    pub camera: Entity,
    pub ground: Entity,
    pub target: Entity,
}

impl TestScene {
    pub fn new(seed: u64) -> Self {
        Self::with_blueprint(seed, &CharacterBlueprint::default())
    }

    pub fn with_blueprint(seed: u64, blueprint: &CharacterBlueprint) -> Self {
        let mut app = create_headless_app(seed);

        let ground = app
            .world_mut()
            .spawn((
                Transform::default(),
                HeadlessCollider::ground(COLLISION_LAYER_ENVIRONMENT),
            ))
            .id();
        let target = app
            .world_mut()
            .spawn((
                Transform::from_translation(TARGET_POSITION),
                Targetable,
                HeadlessCollider::sphere(TARGET_RADIUS, COLLISION_LAYER_TARGETS),
            ))
            .id();

        Self::finish(app, blueprint, ground, target)
    }

    /// Та же сцена, но коллайдеры и scene queries через Rapier
    pub fn rapier(seed: u64, blueprint: &CharacterBlueprint) -> Self {
        let mut app = create_rapier_app(seed);

        // Верхняя грань пола на y = 0
        let ground = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, -0.1, 0.0),
                Collider::cuboid(50.0, 0.1, 50.0),
                environment_groups(),
            ))
            .id();
        let target = app
            .world_mut()
            .spawn((
                Transform::from_translation(TARGET_POSITION),
                Targetable,
                Collider::ball(TARGET_RADIUS),
                target_groups(),
            ))
            .id();

        Self::finish(app, blueprint, ground, target)
    }

    /// Top-down камера + player, затем priming update
    fn finish(mut app: App, blueprint: &CharacterBlueprint, ground: Entity, target: Entity) -> Self {
        let camera = app
            .world_mut()
            .spawn((
                AimCamera::default(),
                Transform::from_xyz(0.0, 20.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
            ))
            .id();

        let player = spawn_player_character(app.world_mut(), blueprint, Vec3::ZERO)
            .expect("blueprint must spawn");

        // Первый update только запускает часы (FixedUpdate не бежит)
        app.update();

        Self {
            app,
            player,
            camera,
            ground,
            target,
        }
    }

    pub fn move_target(&mut self, translation: Vec3) {
        self.app
            .world_mut()
            .get_mut::<Transform>(self.target)
            .expect("target transform")
            .translation = translation;
    }

    /// Один simulation тик
    pub fn tick(&mut self) {
        run_ticks(&mut self.app, 1);
    }

    pub fn ticks(&mut self, count: usize) {
        run_ticks(&mut self.app, count);
    }

    pub fn input(&mut self, edit: impl FnOnce(&mut PlayerInput)) {
        let mut input = self
            .app
            .world_mut()
            .get_mut::<PlayerInput>(self.player)
            .expect("player has PlayerInput");
        edit(&mut input);
    }

    /// Курсор в пиксель, под которым лежит `world_point`
    pub fn point_cursor_at(&mut self, world_point: Vec3) {
        let cursor = self.cursor_for(world_point);
        self.input(|input| input.cursor = cursor);
    }

    /// Обратная проекция `AimCamera::screen_point_to_ray`
    pub fn cursor_for(&self, world_point: Vec3) -> Vec2 {
        let world = self.app.world();
        let camera = world.get::<AimCamera>(self.camera).expect("camera");
        let transform = world.get::<Transform>(self.camera).expect("camera transform");

        let local = transform.rotation.inverse() * (world_point - transform.translation);
        let half_height = (camera.fov_y * 0.5).tan();
        let aspect = camera.viewport_size.x / camera.viewport_size.y;
        let depth = -local.z;
        let ndc = Vec2::new(
            local.x / (depth * half_height * aspect),
            local.y / (depth * half_height),
        );

        Vec2::new(
            (ndc.x + 1.0) * 0.5 * camera.viewport_size.x,
            (1.0 - ndc.y) * 0.5 * camera.viewport_size.y,
        )
    }

    pub fn get<T: Component + Clone>(&self, entity: Entity) -> T {
        self.app
            .world()
            .get::<T>(entity)
            .cloned()
            .expect("component present")
    }

    pub fn player_state<T: Component + Clone>(&self) -> T {
        self.get::<T>(self.player)
    }

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    /// Events, записанные в последнем тике
    pub fn events_this_tick<E: Event + Clone>(&self) -> Vec<E> {
        self.app
            .world()
            .resource::<Events<E>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    pub fn count<T: Component>(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query::<&T>().iter(world).count()
    }
}

pub fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    assert!(
        (actual - expected).length() <= tolerance,
        "expected {:?}, got {:?} (tolerance {})",
        expected,
        actual,
        tolerance
    );
}
