//! Equipment domain — loadout слоты и точки крепления на модели оружия
//!
//! Сам switch (state machine, веса rig) живёт в `rig`; здесь только данные.

pub mod loadout;

pub use loadout::*;
