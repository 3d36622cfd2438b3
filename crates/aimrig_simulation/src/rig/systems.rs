//! Rig systems — связка RigBlendState с input, animator и callbacks
//!
//! Порядок внутри тика:
//! 1. Completion callbacks (пришли от evaluator'а между тиками)
//! 2. Weapon switch edge
//! 3. Reload edge (после switch: switch+reload в одном кадре → reload отброшен)
//! 4. Ramp

use bevy::prelude::*;

use crate::animation::{AnimatorParameters, AnimatorTrigger, AnimatorTriggerFired};
use crate::components::{Player, PlayerInput};
use crate::config::RigConfig;
use crate::equipment::{LeftHandIkTarget, Loadout};
use crate::rig::{
    GrabAnimationComplete, ReloadAnimationComplete, RigBlendState, RigChannel, RigWeightSettled,
    SwitchRejected,
};

type RigQueryData = (
    Entity,
    &'static PlayerInput,
    &'static Loadout,
    &'static RigConfig,
    &'static mut RigBlendState,
    &'static mut AnimatorParameters,
    &'static mut LeftHandIkTarget,
);

/// System: RigBlender tick для player
pub fn update_rig_blend(
    mut players: Query<RigQueryData, With<Player>>,
    mut grab_complete: EventReader<GrabAnimationComplete>,
    mut reload_complete: EventReader<ReloadAnimationComplete>,
    mut triggers: EventWriter<AnimatorTriggerFired>,
    mut settled: EventWriter<RigWeightSettled>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let grabs_done: Vec<Entity> = grab_complete.read().map(|event| event.entity).collect();
    let reloads_done: Vec<Entity> = reload_complete.read().map(|event| event.entity).collect();

    for (entity, input, loadout, config, mut rig, mut animator, mut left_hand) in players.iter_mut() {
        // 1. Callbacks (дубликаты — no-op внутри RigBlendState)
        for _ in grabs_done.iter().filter(|&&done| done == entity) {
            if rig.on_grab_animation_complete() {
                animator.is_busy_grabbing_weapon = false;
                crate::log(&format!("✋ Grab complete for {:?} → ramping rig + left hand IK", entity));
            }
        }
        for _ in reloads_done.iter().filter(|&&done| done == entity) {
            if rig.on_reload_animation_complete() {
                crate::log(&format!("🔄 Reload complete for {:?} → ramping rig", entity));
            }
        }

        // 2. Weapon switch (hotkey 1-5 → slot 0-4)
        if let Some(hotkey) = input.weapon_slot {
            // Digit0 → usize::MAX → EmptySlot
            let slot = usize::from(hotkey).wrapping_sub(1);
            match rig.request_weapon_switch(slot, loadout) {
                Ok(grab) => {
                    animator.select_weapon_layer(grab.animation_layer);
                    animator.weapon_grab_type = grab.grab_style.as_parameter();
                    animator.is_busy_grabbing_weapon = true;
                    left_hand.local_position = grab.left_hand_grip;
                    left_hand.local_rotation = grab.left_hand_grip_rotation;

                    triggers.write(AnimatorTriggerFired {
                        entity,
                        trigger: AnimatorTrigger::WeaponGrab,
                    });

                    crate::log_info(&format!(
                        "🔄 Weapon switch {:?} → slot {} ({:?}, layer {}, {:?})",
                        entity, hotkey, grab.kind, grab.animation_layer, grab.grab_style
                    ));
                }
                Err(SwitchRejected::BusyGrabbing) => {
                    crate::log(&format!(
                        "⏳ Weapon switch to slot {} dropped: {:?} is still grabbing",
                        hotkey, entity
                    ));
                }
                Err(SwitchRejected::EmptySlot(_)) => {
                    crate::log_warning(&format!(
                        "⚠️ Weapon switch to slot {} dropped: slot is empty",
                        hotkey
                    ));
                }
            }
        }

        // 3. Reload
        if input.reload {
            if rig.request_reload() {
                triggers.write(AnimatorTriggerFired {
                    entity,
                    trigger: AnimatorTrigger::Reload,
                });
                crate::log_info(&format!("🔄 Reload started for {:?}", entity));
            } else {
                crate::log(&format!("⏳ Reload dropped: {:?} is grabbing a weapon", entity));
            }
        }

        // 4. Ramp
        let completion = rig.tick(config, delta);
        if completion.rig {
            settled.write(RigWeightSettled {
                entity,
                channel: RigChannel::Rig,
            });
        }
        if completion.left_hand_ik {
            settled.write(RigWeightSettled {
                entity,
                channel: RigChannel::LeftHandIk,
            });
            crate::log(&format!("✅ Left hand IK handoff complete for {:?}", entity));
        }
    }
}
