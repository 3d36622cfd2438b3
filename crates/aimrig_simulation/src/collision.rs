//! Collision layers — centralised constants для всего проекта.
//!
//! ## Архитектура:
//! - **Layers (битовая маска):** На каком слое находится объект
//! - **Mask (битовая маска):** Какие слои видит ray query
//!
//! ## Layers:
//! - Layer 1 (0b1 = 1): Environment (terrain, стены, пол)
//! - Layer 2 (0b10 = 2): Actors (тело игрока / NPC)
//! - Layer 3 (0b100 = 4): Targets (hurtbox'ы, доступные для lock-on)
//!
//! Те же биты уходят в rapier `CollisionGroups` (см. `physics::rapier_probe`)
//! и в `HeadlessCollider::layers`.

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Layer 1: Environment (ground, walls, obstacles)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b1;

/// Layer 2: Actors (player/NPC bodies)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10;

/// Layer 3: Targets (lock-on hurtboxes)
pub const COLLISION_LAYER_TARGETS: u32 = 0b100;

/// Mask: cursor ray (ground + lock-on targets).
///
/// Тело игрока НЕ входит в маску — курсор над своим персонажем не должен
/// тянуть aim point на себя.
pub const COLLISION_MASK_AIM: u32 = COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_TARGETS;

/// Mask: aim laser (все слои сцены)
pub const COLLISION_MASK_LASER: u32 =
    COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_ACTORS | COLLISION_LAYER_TARGETS;

/// Rapier groups для тела персонажа
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_ACTORS),
        Group::from_bits_truncate(COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_ACTORS),
    )
}

/// Rapier groups для статической геометрии (пол, стены)
pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(COLLISION_LAYER_ENVIRONMENT), Group::ALL)
}

/// Rapier groups для lock-on целей
pub fn target_groups() -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(COLLISION_LAYER_TARGETS), Group::ALL)
}

/// Rapier groups для ray query с заданной маской
pub fn query_groups(mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_mask_excludes_actor_bodies() {
        assert_eq!(COLLISION_MASK_AIM & COLLISION_LAYER_ACTORS, 0);
        assert_ne!(COLLISION_MASK_AIM & COLLISION_LAYER_TARGETS, 0);
    }

    #[test]
    fn test_laser_mask_sees_actor_bodies() {
        assert_ne!(COLLISION_MASK_LASER & COLLISION_LAYER_ACTORS, 0);
        assert_eq!(COLLISION_MASK_LASER & COLLISION_MASK_AIM, COLLISION_MASK_AIM);
    }

    #[test]
    fn test_query_groups_filter_by_mask() {
        let groups = query_groups(COLLISION_MASK_AIM);
        assert_eq!(groups.memberships, Group::ALL);
        assert_eq!(groups.filters.bits(), COLLISION_MASK_AIM);

        // Тело персонажа не проходит aim фильтр
        assert!(!actor_groups().memberships.intersects(groups.filters));
    }
}
