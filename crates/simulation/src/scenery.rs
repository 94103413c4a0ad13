//! Roadside decoration: trees, bushes, rocks and buildings.
//!
//! Scenery has no behaviour. A batch is rolled per side of the road with
//! fixed probabilities per category; offsets are measured from the curve
//! centre so decoration follows the bends.

use bevy::prelude::*;
use rand::Rng;

use crate::curve::curve_offset;
use crate::visual::{Pose, Visual, VisualKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneryCategory {
    Tree,
    Bush,
    Rock,
    Building,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenery {
    pub category: SceneryCategory,
}

/// Placement rule for one category on one side of the road.
struct SceneryRule {
    category: SceneryCategory,
    chance: f64,
    /// Lateral distance from the curve centre.
    offset: (f32, f32),
    /// Longitudinal jitter added to the batch Z.
    jitter: f32,
}

const RULES: [SceneryRule; 4] = [
    SceneryRule { category: SceneryCategory::Tree, chance: 0.7, offset: (10.0, 13.0), jitter: 0.0 },
    SceneryRule { category: SceneryCategory::Bush, chance: 0.5, offset: (9.0, 11.0), jitter: 2.0 },
    SceneryRule { category: SceneryCategory::Rock, chance: 0.3, offset: (9.5, 11.5), jitter: 2.0 },
    SceneryRule { category: SceneryCategory::Building, chance: 0.15, offset: (16.0, 24.0), jitter: 0.0 },
];

/// Pick the concrete visual for a category.
pub fn pick_kind(category: SceneryCategory, rng: &mut impl Rng) -> VisualKind {
    let roll: f32 = rng.gen();
    match category {
        SceneryCategory::Tree => match roll {
            r if r < 0.35 => VisualKind::PineTree,
            r if r < 0.60 => VisualKind::OakTree,
            r if r < 0.85 => VisualKind::BirchTree,
            _ => VisualKind::PalmTree,
        },
        SceneryCategory::Bush => VisualKind::Bush,
        SceneryCategory::Rock => VisualKind::Rock,
        SceneryCategory::Building => match roll {
            r if r < 0.35 => VisualKind::House,
            r if r < 0.55 => VisualKind::TallBuilding,
            r if r < 0.75 => VisualKind::Barn,
            _ => VisualKind::Shop,
        },
    }
}

/// Roll one scenery batch at `z`. Returns the number of entities spawned.
pub fn spawn_scenery_batch(commands: &mut Commands, rng: &mut impl Rng, z: f32) -> usize {
    let center = curve_offset(z);
    let mut spawned = 0;
    for rule in &RULES {
        for side in [-1.0f32, 1.0] {
            if !rng.gen_bool(rule.chance) {
                continue;
            }
            let lateral = rng.gen_range(rule.offset.0..rule.offset.1);
            let dz = if rule.jitter > 0.0 {
                rng.gen_range(0.0..rule.jitter)
            } else {
                0.0
            };
            let kind = pick_kind(rule.category, rng);
            let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
            commands.spawn((
                Scenery {
                    category: rule.category,
                },
                Visual::new(kind, rng.gen()),
                Pose::ground(center + side * lateral, z + dz, yaw),
            ));
            spawned += 1;
        }
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim_rng::SimRng;

    #[test]
    fn test_tree_mix_covers_all_species() {
        let mut rng = SimRng::from_seed_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(pick_kind(SceneryCategory::Tree, &mut rng.0));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_buildings_never_pick_trees() {
        let mut rng = SimRng::from_seed_u64(9);
        for _ in 0..200 {
            let kind = pick_kind(SceneryCategory::Building, &mut rng.0);
            assert!(matches!(
                kind,
                VisualKind::House | VisualKind::TallBuilding | VisualKind::Barn | VisualKind::Shop
            ));
        }
    }

    #[test]
    fn test_scenery_stays_off_the_road() {
        for rule in &RULES {
            assert!(rule.offset.0 > crate::config::SIDEWALK_OUTER);
        }
    }
}
