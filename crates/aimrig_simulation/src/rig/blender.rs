//! RigBlender — state machine весов rig и left hand IK
//!
//! ```text
//!            weapon switch                 grab complete
//!   Idle/Ramping ─────────────► Grabbing ─────────────────► Ramping(rig + ik)
//!        │                                                        │
//!        │ reload (не во время grab)      reload complete         │ weight == 1.0
//!        └────────────────────► Reloading ───────────────► Ramping(rig) ──► Idle
//! ```
//!
//! Инварианты:
//! - вход в Grabbing атомарно: ik = 0, rig = 0.15, is_grabbing = true
//! - пока поднят ramp flag, вес только растёт; на 1.0 flag снимается
//! - веса всегда в [0, 1]
//! - completion callbacks идемпотентны: не в том состоянии → no-op
//! - switch во время Grabbing отбрасывается (без очереди)

use bevy::prelude::*;

use crate::config::{RigConfig, REDUCED_RIG_WEIGHT};
use crate::equipment::{GrabStyle, GunKind, Loadout};

/// Rig blend state (владелец — RigBlender)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RigBlendState {
    pub rig_weight: f32,
    pub left_hand_ik_weight: f32,
    pub is_grabbing_weapon: bool,
    pub is_reloading: bool,
    pub active_gun_index: usize,
    pub ramp_rig_weight: bool,
    pub ramp_ik_weight: bool,
}

impl Default for RigBlendState {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Сводное состояние для логов / внешних потребителей
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigPhase {
    Idle,
    Ramping { rig: bool, left_hand_ik: bool },
    Grabbing,
    Reloading,
}

/// Что нужно сделать снаружи после принятого weapon switch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponGrab {
    pub gun_index: usize,
    pub kind: GunKind,
    pub grab_style: GrabStyle,
    pub animation_layer: usize,
    pub left_hand_grip: Vec3,
    pub left_hand_grip_rotation: Quat,
}

/// Почему switch отброшен (только для логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchRejected {
    BusyGrabbing,
    EmptySlot(usize),
}

/// Какие ramp'ы дошли до 1.0 в этом тике
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RampCompletion {
    pub rig: bool,
    pub left_hand_ik: bool,
}

impl RigBlendState {
    /// Стартовое состояние: оружие уже в руках, веса полные
    pub fn new(active_gun_index: usize) -> Self {
        Self {
            rig_weight: 1.0,
            left_hand_ik_weight: 1.0,
            is_grabbing_weapon: false,
            is_reloading: false,
            active_gun_index,
            ramp_rig_weight: false,
            ramp_ik_weight: false,
        }
    }

    pub fn phase(&self) -> RigPhase {
        if self.is_grabbing_weapon {
            RigPhase::Grabbing
        } else if self.is_reloading {
            RigPhase::Reloading
        } else if self.ramp_rig_weight || self.ramp_ik_weight {
            RigPhase::Ramping {
                rig: self.ramp_rig_weight,
                left_hand_ik: self.ramp_ik_weight,
            }
        } else {
            RigPhase::Idle
        }
    }

    /// Weapon switch → Grabbing.
    ///
    /// Во время grab запрос отбрасывается. Reload (если шёл) прерывается grab'ом.
    pub fn request_weapon_switch(
        &mut self,
        slot_index: usize,
        loadout: &Loadout,
    ) -> Result<WeaponGrab, SwitchRejected> {
        if self.is_grabbing_weapon {
            return Err(SwitchRejected::BusyGrabbing);
        }
        let gun = loadout
            .slot(slot_index)
            .ok_or(SwitchRejected::EmptySlot(slot_index))?;

        self.left_hand_ik_weight = 0.0;
        self.rig_weight = REDUCED_RIG_WEIGHT;
        self.is_grabbing_weapon = true;
        self.is_reloading = false;
        self.ramp_rig_weight = false;
        self.ramp_ik_weight = false;
        self.active_gun_index = slot_index;

        Ok(WeaponGrab {
            gun_index: slot_index,
            kind: gun.kind,
            grab_style: gun.grab_style,
            animation_layer: gun.animation_layer,
            left_hand_grip: gun.left_hand_grip(),
            left_hand_grip_rotation: gun.left_hand_grip_rotation(),
        })
    }

    /// Reload → Reloading. Запрещён во время grab.
    pub fn request_reload(&mut self) -> bool {
        if self.is_grabbing_weapon {
            return false;
        }

        self.rig_weight = REDUCED_RIG_WEIGHT;
        self.is_reloading = true;
        // rig держим низко до reload complete
        self.ramp_rig_weight = false;
        true
    }

    /// Callback: grab animation закончилась → оба ramp'а
    pub fn on_grab_animation_complete(&mut self) -> bool {
        if !self.is_grabbing_weapon {
            return false;
        }

        self.is_grabbing_weapon = false;
        self.ramp_rig_weight = true;
        self.ramp_ik_weight = true;
        true
    }

    /// Callback: reload animation закончилась → ramp rig
    pub fn on_reload_animation_complete(&mut self) -> bool {
        if !self.is_reloading {
            return false;
        }

        self.is_reloading = false;
        self.ramp_rig_weight = true;
        true
    }

    /// Per-frame ramp. Веса растут независимо друг от друга.
    pub fn tick(&mut self, config: &RigConfig, delta: f32) -> RampCompletion {
        let delta = delta.max(0.0);
        let mut completion = RampCompletion::default();

        if self.ramp_rig_weight {
            self.rig_weight = ramp(self.rig_weight, config.rig_weight_increase_rate, delta);
            if self.rig_weight >= 1.0 {
                self.ramp_rig_weight = false;
                completion.rig = true;
            }
        }

        if self.ramp_ik_weight {
            self.left_hand_ik_weight = ramp(
                self.left_hand_ik_weight,
                config.left_hand_ik_weight_increase_rate,
                delta,
            );
            if self.left_hand_ik_weight >= 1.0 {
                self.ramp_ik_weight = false;
                completion.left_hand_ik = true;
            }
        }

        completion
    }
}

fn ramp(weight: f32, rate: f32, delta: f32) -> f32 {
    (weight + rate * delta).clamp(0.0, 1.0)
}
