//! Headless симуляция AIMRIG
//!
//! Scripted session: курсор гуляет по сцене (seeded RNG), key edges по расписанию,
//! grab/reload анимации "заканчиваются" через фиксированное число тиков.
//!
//! Usage: `aimrig_simulation [--rapier] [blueprint.json]`

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use rand::Rng;

use aimrig_simulation::collision::{
    environment_groups, target_groups, COLLISION_LAYER_ENVIRONMENT, COLLISION_LAYER_TARGETS,
};
use aimrig_simulation::{
    create_headless_app, create_rapier_app, log_error, log_info, spawn_player_character,
    AimCamera, AimState, AnimatorTrigger, AnimatorTriggerFired, CameraState, CharacterBlueprint,
    DeterministicRng, GrabAnimationComplete, HeadlessCollider, PlayerInput,
    ReloadAnimationComplete, RigBlendState, Targetable,
};

const SESSION_TICKS: u32 = 1200;
const GRAB_ANIMATION_TICKS: u32 = 40;
const RELOAD_ANIMATION_TICKS: u32 = 90;

/// One-shot анимация, которую "проигрывает" внешний evaluator
struct PendingAnimation {
    entity: Entity,
    trigger: AnimatorTrigger,
    ticks_left: u32,
}

fn main() {
    let mut use_rapier = false;
    let mut blueprint_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--rapier" => use_rapier = true,
            _ => blueprint_path = Some(arg),
        }
    }

    let seed = 42;
    println!(
        "Starting AIMRIG headless simulation (seed: {}, backend: {})",
        seed,
        if use_rapier { "rapier" } else { "headless" }
    );

    let blueprint = match blueprint_path {
        Some(path) => match CharacterBlueprint::from_json_file(&path) {
            Ok(blueprint) => blueprint,
            Err(error) => {
                log_error(&format!("❌ Blueprint {}: {}", path, error));
                std::process::exit(1);
            }
        },
        None => CharacterBlueprint::default(),
    };

    let mut app = if use_rapier {
        create_rapier_app(seed)
    } else {
        create_headless_app(seed)
    };

    spawn_scene(app.world_mut(), use_rapier);
    let player = match spawn_player_character(app.world_mut(), &blueprint, Vec3::ZERO) {
        Ok(entity) => entity,
        Err(error) => {
            log_error(&format!("❌ Player spawn failed: {}", error));
            std::process::exit(1);
        }
    };

    // Первый update только запускает часы
    app.update();

    let mut pending: Vec<PendingAnimation> = Vec::new();

    for tick in 0..SESSION_TICKS {
        script_input(app.world_mut(), player, tick);
        app.update();

        collect_animations(app.world(), &mut pending);
        finish_animations(app.world_mut(), &mut pending);

        if tick % 100 == 0 {
            report(app.world(), player, tick);
        }
    }

    println!("Simulation complete!");
}

/// Камера, земля и одна lock-on цель
fn spawn_scene(world: &mut World, use_rapier: bool) {
    world.spawn((
        AimCamera::default(),
        Transform::from_xyz(0.0, 12.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let ground = Transform::from_translation(Vec3::ZERO);
    let target = Transform::from_xyz(3.0, 1.0, -4.0);

    if use_rapier {
        world.spawn((
            ground.with_translation(Vec3::new(0.0, -0.1, 0.0)),
            Collider::cuboid(100.0, 0.1, 100.0),
            environment_groups(),
        ));
        world.spawn((
            target,
            Targetable,
            Collider::ball(0.5),
            target_groups(),
        ));
    } else {
        world.spawn((ground, HeadlessCollider::ground(COLLISION_LAYER_ENVIRONMENT)));
        world.spawn((
            target,
            Targetable,
            HeadlessCollider::sphere(0.5, COLLISION_LAYER_TARGETS),
        ));
    }
}

/// Input layer: курсор (seeded random walk) + key edges по расписанию
fn script_input(world: &mut World, player: Entity, tick: u32) {
    let (cursor_step, move_axis, slot) = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        let step = Vec2::new(rng.rng.gen_range(-12.0..12.0), rng.rng.gen_range(-8.0..8.0));
        let axis = Vec2::new(rng.rng.gen_range(-1.0..1.0), rng.rng.gen_range(-1.0..1.0));
        let slot: u8 = rng.rng.gen_range(1..=5);
        (step, axis, slot)
    };

    let Some(mut input) = world.get_mut::<PlayerInput>(player) else {
        return;
    };

    if tick == 0 {
        input.cursor = Vec2::new(640.0, 360.0);
    }
    input.cursor = (input.cursor + cursor_step).clamp(Vec2::ZERO, Vec2::new(1280.0, 720.0));
    input.run = tick % 400 > 200;

    if tick % 60 == 0 {
        input.move_axis = if tick % 180 == 0 { Vec2::ZERO } else { move_axis };
    }
    if tick == 150 || tick == 900 {
        input.toggle_lock_on = true;
    }
    if tick == 450 {
        input.toggle_precision = true;
    }
    if tick % 240 == 120 {
        input.weapon_slot = Some(slot);
    }
    if tick % 300 == 200 {
        input.reload = true;
    }
    if tick % 45 == 0 {
        input.fire = true;
    }
}

/// Animation evaluator: ловит grab/reload triggers этого тика
fn collect_animations(world: &World, pending: &mut Vec<PendingAnimation>) {
    let triggers = world.resource::<Events<AnimatorTriggerFired>>();
    for fired in triggers.iter_current_update_events() {
        let ticks_left = match fired.trigger {
            AnimatorTrigger::WeaponGrab => GRAB_ANIMATION_TICKS,
            AnimatorTrigger::Reload => RELOAD_ANIMATION_TICKS,
            AnimatorTrigger::Fire => continue,
        };
        // Новый grab прерывает reload анимацию
        pending.retain(|animation| animation.entity != fired.entity);
        pending.push(PendingAnimation {
            entity: fired.entity,
            trigger: fired.trigger,
            ticks_left,
        });
    }
}

/// Animation evaluator: completion callbacks
fn finish_animations(world: &mut World, pending: &mut Vec<PendingAnimation>) {
    for animation in pending.iter_mut() {
        animation.ticks_left = animation.ticks_left.saturating_sub(1);
    }

    let (finished, running): (Vec<_>, Vec<_>) = pending
        .drain(..)
        .partition(|animation| animation.ticks_left == 0);
    *pending = running;

    for animation in finished {
        match animation.trigger {
            AnimatorTrigger::WeaponGrab => {
                world.send_event(GrabAnimationComplete {
                    entity: animation.entity,
                });
            }
            AnimatorTrigger::Reload => {
                world.send_event(ReloadAnimationComplete {
                    entity: animation.entity,
                });
            }
            AnimatorTrigger::Fire => {}
        }
    }
}

fn report(world: &World, player: Entity, tick: u32) {
    let (Some(aim), Some(camera), Some(rig)) = (
        world.get::<AimState>(player),
        world.get::<CameraState>(player),
        world.get::<RigBlendState>(player),
    ) else {
        return;
    };

    log_info(&format!(
        "Tick {}: aim={:?} (lock {:?}) camera={:?} rig={:.2}/ik={:.2} gun={} {:?}",
        tick,
        aim.resolved_aim_point(),
        aim.locked_target,
        camera.anchor_position(),
        rig.rig_weight,
        rig.left_hand_ik_weight,
        rig.active_gun_index + 1,
        rig.phase()
    ));
}
