//! Animation evaluator interface
//!
//! Ядро НЕ проигрывает клипы. Оно пишет параметры (этот component) и one-shot
//! triggers (event), внешний evaluator их читает. Обратно evaluator шлёт
//! completion callbacks (`rig::GrabAnimationComplete`, `rig::ReloadAnimationComplete`).

use bevy::prelude::*;

/// Layer 0 = base locomotion, 1..=3 = weapon layers
pub const ANIMATION_LAYER_COUNT: usize = 4;

/// Стартовый weapon layer (pistol/revolver/auto rifle)
pub const DEFAULT_WEAPON_LAYER: usize = 1;

/// Параметры animator'а, которые пишет ядро
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AnimatorParameters {
    pub x_velocity: f32,
    pub z_velocity: f32,
    pub is_running: bool,
    /// `GrabStyle::as_parameter` последнего switch
    pub weapon_grab_type: f32,
    pub is_busy_grabbing_weapon: bool,
    pub layer_weights: [f32; ANIMATION_LAYER_COUNT],
}

impl Default for AnimatorParameters {
    fn default() -> Self {
        let mut parameters = Self {
            x_velocity: 0.0,
            z_velocity: 0.0,
            is_running: false,
            weapon_grab_type: 0.0,
            is_busy_grabbing_weapon: false,
            layer_weights: [0.0; ANIMATION_LAYER_COUNT],
        };
        parameters.layer_weights[0] = 1.0;
        parameters.select_weapon_layer(DEFAULT_WEAPON_LAYER);
        parameters
    }
}

impl AnimatorParameters {
    /// Только один weapon layer активен; base layer (0) не трогаем
    pub fn select_weapon_layer(&mut self, layer: usize) {
        for weight in self.layer_weights.iter_mut().skip(1) {
            *weight = 0.0;
        }
        if let Some(weight) = self.layer_weights.get_mut(layer) {
            *weight = 1.0;
        }
    }

    /// Активный weapon layer (первый с весом > 0)
    pub fn active_weapon_layer(&self) -> Option<usize> {
        (1..ANIMATION_LAYER_COUNT).find(|&layer| self.layer_weights[layer] > 0.0)
    }
}

/// One-shot triggers animator'а
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorTrigger {
    Fire,
    Reload,
    WeaponGrab,
}

impl AnimatorTrigger {
    pub fn parameter_name(self) -> &'static str {
        match self {
            AnimatorTrigger::Fire => "Fire",
            AnimatorTrigger::Reload => "Reload",
            AnimatorTrigger::WeaponGrab => "WeaponGrab",
        }
    }
}

/// Event: ядро дёрнуло trigger (ECS → animation evaluator)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimatorTriggerFired {
    pub entity: Entity,
    pub trigger: AnimatorTrigger,
}

/// Damped float parameter (аналог `SetFloat(name, value, dampTime, dt)`)
///
/// Экспоненциальное приближение к target с постоянной времени `damp_time`.
pub fn damp_parameter(current: f32, target: f32, damp_time: f32, delta: f32) -> f32 {
    if damp_time <= 0.0 {
        return target;
    }
    let alpha = 1.0 - (-delta / damp_time).exp();
    current + (target - current) * alpha
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layers() {
        let parameters = AnimatorParameters::default();
        assert_eq!(parameters.layer_weights, [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(parameters.active_weapon_layer(), Some(1));
    }

    #[test]
    fn test_select_weapon_layer_is_exclusive() {
        let mut parameters = AnimatorParameters::default();
        parameters.select_weapon_layer(3);

        assert_eq!(parameters.layer_weights, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(parameters.active_weapon_layer(), Some(3));
    }

    #[test]
    fn test_damp_parameter_converges_without_overshoot() {
        let mut value = 0.0;
        for _ in 0..120 {
            value = damp_parameter(value, 1.0, 0.1, 1.0 / 60.0);
            assert!(value <= 1.0);
        }
        assert!((value - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_trigger_names() {
        assert_eq!(AnimatorTrigger::WeaponGrab.parameter_name(), "WeaponGrab");
        assert_eq!(AnimatorTrigger::Reload.parameter_name(), "Reload");
    }
}
