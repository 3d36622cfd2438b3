//! Player input state
//!
//! Один owned struct на персонажа. Input layer (device polling, bindings) пишет
//! его снаружи перед тиком, системы ядра только читают.
//!
//! # Edges vs held state
//! - Axes (`move_axis`, `cursor`) и `run` — held state, живут пока их не перезапишут.
//! - Key edges (`toggle_*`, `weapon_slot`, `reload`, `fire`) — just_pressed, сбрасываются
//!   в конце тика (`clear_input_edges`), чтобы одно нажатие = одно действие.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// WASD axis: `x` = right, `y` = up/forward, оба в [-1, 1]
    pub move_axis: Vec2,

    /// Курсор в пикселях viewport (origin = top-left)
    pub cursor: Vec2,

    /// Shift held
    pub run: bool,

    /// [P] edge
    pub toggle_precision: bool,

    /// [L] edge
    pub toggle_lock_on: bool,

    /// Digit1-5 edge, хранится как hotkey номер (1-based)
    pub weapon_slot: Option<u8>,

    /// [R] edge
    pub reload: bool,

    /// LMB edge
    pub fire: bool,
}

impl PlayerInput {
    /// Сбросить just_pressed поля (held state не трогаем)
    pub fn clear_edges(&mut self) {
        self.toggle_precision = false;
        self.toggle_lock_on = false;
        self.weapon_slot = None;
        self.reload = false;
        self.fire = false;
    }

    /// Вертикальная ось движения (для camera pull-in)
    pub fn vertical_axis(&self) -> f32 {
        self.move_axis.y
    }
}

/// System: конец тика — edges потреблены всеми системами
pub fn clear_input_edges(mut inputs: Query<&mut PlayerInput>) {
    for mut input in inputs.iter_mut() {
        input.clear_edges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_edges_keeps_held_state() {
        let mut input = PlayerInput {
            move_axis: Vec2::new(0.0, -0.8),
            cursor: Vec2::new(640.0, 360.0),
            run: true,
            toggle_precision: true,
            toggle_lock_on: true,
            weapon_slot: Some(3),
            reload: true,
            fire: true,
        };

        input.clear_edges();

        assert_eq!(input.move_axis, Vec2::new(0.0, -0.8));
        assert_eq!(input.cursor, Vec2::new(640.0, 360.0));
        assert!(input.run);
        assert!(!input.toggle_precision);
        assert!(!input.toggle_lock_on);
        assert_eq!(input.weapon_slot, None);
        assert!(!input.reload);
        assert!(!input.fire);
    }
}
