//! Physics backends для scene queries
//!
//! Два backend'а одного `SceneRaycast` контракта:
//! - headless: аналитические plane/sphere коллайдеры (симуляция, тесты)
//! - rapier: production сцена через `RapierContext`
//!
//! В app добавляется ровно один из plugin'ов.

pub mod headless;
pub mod rapier_probe;

pub use headless::{HeadlessCollider, HeadlessProbePlugin, HeadlessScene, HeadlessShape};
pub use rapier_probe::{RapierProbePlugin, RapierSceneQuery};
