//! Configuration errors — единственные ошибки, которые ядро отдаёт наружу.
//!
//! Всё остальное (промах луча, запрос switch во время grab, overshoot весов)
//! поглощается внутри систем.

use crate::equipment::GunKind;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("aim collision mask is empty, the ray probe could never hit anything")]
    EmptyAimMask,

    #[error("no AimCamera entity in the world, cursor rays cannot be built")]
    MissingAimCamera,

    #[error("{count} AimCamera entities in the world, cursor rays need exactly one")]
    AmbiguousAimCamera { count: usize },

    #[error("loadout must hold 1..={max} guns, got {count}")]
    InvalidLoadoutSize { count: usize, max: usize },

    #[error("gun slot {slot} ({kind:?}) has no muzzle point")]
    MissingMuzzle { slot: usize, kind: GunKind },

    #[error("gun slot {slot} ({kind:?}) has no left-hand IK target")]
    MissingLeftHandTarget { slot: usize, kind: GunKind },

    #[error("gun slot {slot} ({kind:?}) has a degenerate left-hand grip rotation {rotation:?}")]
    InvalidLeftHandRotation {
        slot: usize,
        kind: GunKind,
        rotation: [f32; 4],
    },

    #[error("gun slot {slot} ({kind:?}) uses animation layer {layer}, expected 1..{layer_count}")]
    InvalidAnimationLayer {
        slot: usize,
        kind: GunKind,
        layer: usize,
        layer_count: usize,
    },

    #[error("camera distance range is invalid: min {min} / max {max}")]
    InvalidCameraRange { min: f32, max: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("failed to parse character blueprint: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read character blueprint: {0}")]
    Io(#[from] std::io::Error),
}
