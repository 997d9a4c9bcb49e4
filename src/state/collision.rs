//! Player-versus-entity overlap tests and their effects.
//!
//! Every live entity is tested every frame. Each category carries a flag that
//! makes its effect fire once per instance, however many frames the player
//! keeps overlapping it.

use crate::config::{GameConfig, Point};
use crate::model::{GameEvent, Player};
use crate::state::entities::EntityRegistry;

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub fn square(at: Point, side: f64) -> Self {
        Self {
            left: at.x,
            top: at.y,
            width: side,
            height: side,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }
}

/// Runs one collision pass and applies category effects.
///
/// Hazard damage is not clamped here; a resulting energy of 0 or less is
/// reported as `PlayerDefeated` and the caller decides what that means.
pub fn check_collisions(
    player: &mut Player,
    entities: &mut EntityRegistry,
    collected_trees: &mut u32,
    cfg: &GameConfig,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let body = Aabb::square(player.pos(), cfg.player_box);

    for (index, orb) in entities.energy_orbs.iter_mut().enumerate() {
        if orb.collected || !body.overlaps(&Aabb::square(orb.pos, cfg.item_box)) {
            continue;
        }
        // A full player leaves the orb for later.
        if player.energy < cfg.max_energy {
            player.energy = (player.energy + cfg.orb_energy).min(cfg.max_energy);
            orb.collected = true;
            events.push(GameEvent::EnergyCollected {
                index,
                energy: player.energy,
            });
        }
    }

    for (index, hazard) in entities.hazards.iter_mut().enumerate() {
        if hazard.hit || !body.overlaps(&Aabb::square(hazard.pos, cfg.hazard_box)) {
            continue;
        }
        player.energy -= cfg.hazard_damage;
        hazard.hit = true;
        events.push(GameEvent::Damaged {
            index,
            energy: player.energy,
        });
        if player.energy <= 0 {
            events.push(GameEvent::PlayerDefeated);
        }
    }

    for (index, tree) in entities.trees.iter_mut().enumerate() {
        if tree.collected || !body.overlaps(&Aabb::square(tree.pos, cfg.item_box)) {
            continue;
        }
        *collected_trees += 1;
        tree.collected = true;
        events.push(GameEvent::TreeCollected {
            index,
            collected: *collected_trees,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::entities::{Collectible, Hazard};

    fn at(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    fn player_at(x: f64, y: f64, energy: i32) -> Player {
        Player {
            x,
            y,
            energy,
            ..Player::default()
        }
    }

    fn one_of_each() -> EntityRegistry {
        EntityRegistry {
            energy_orbs: vec![Collectible {
                pos: at(100.0, 100.0),
                collected: false,
            }],
            hazards: vec![Hazard {
                pos: at(400.0, 400.0),
                hit: false,
            }],
            trees: vec![Collectible {
                pos: at(700.0, 700.0),
                collected: false,
            }],
        }
    }

    #[test]
    fn overlap_is_strict_on_edges() {
        let a = Aabb::square(at(0.0, 0.0), 10.0);
        assert!(a.overlaps(&Aabb::square(at(9.9, 9.9), 10.0)));
        assert!(!a.overlaps(&Aabb::square(at(10.0, 0.0), 10.0)));
        assert!(!a.overlaps(&Aabb::square(at(0.0, 10.0), 10.0)));
        assert!(a.overlaps(&Aabb::square(at(-5.0, -5.0), 6.0)));
    }

    #[test]
    fn orb_at_ninety_fills_to_cap_once() {
        let cfg = GameConfig::default();
        let mut reg = one_of_each();
        let mut player = player_at(90.0, 90.0, 90);
        let mut trees = 0;

        let events = check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert_eq!(events, vec![GameEvent::EnergyCollected { index: 0, energy: 100 }]);
        assert_eq!(player.energy, 100);
        assert!(reg.energy_orbs[0].collected);

        player.energy = 50;
        for _ in 0..10 {
            assert!(check_collisions(&mut player, &mut reg, &mut trees, &cfg).is_empty());
        }
        assert_eq!(player.energy, 50);
    }

    #[test]
    fn orb_gain_is_clamped_to_max() {
        let cfg = GameConfig::default();
        let mut reg = one_of_each();
        let mut player = player_at(90.0, 90.0, 95);
        let mut trees = 0;
        check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert_eq!(player.energy, 100);
    }

    #[test]
    fn orb_is_left_alone_at_full_energy() {
        let cfg = GameConfig::default();
        let mut reg = one_of_each();
        let mut player = player_at(90.0, 90.0, 100);
        let mut trees = 0;

        assert!(check_collisions(&mut player, &mut reg, &mut trees, &cfg).is_empty());
        assert!(!reg.energy_orbs[0].collected);

        player.energy = 70;
        let events = check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert_eq!(events.len(), 1);
        assert_eq!(player.energy, 80);
    }

    #[test]
    fn hazard_damages_once_and_goes_inert() {
        let cfg = GameConfig::default();
        let mut reg = one_of_each();
        let mut player = player_at(380.0, 380.0, 100);
        let mut trees = 0;

        let events = check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert_eq!(events, vec![GameEvent::Damaged { index: 0, energy: 80 }]);
        for _ in 0..30 {
            check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        }
        assert_eq!(player.energy, 80);
        assert!(reg.hazards[0].hit);
    }

    #[test]
    fn hazard_at_fifteen_goes_negative_and_signals_defeat() {
        let cfg = GameConfig::default();
        let mut reg = one_of_each();
        let mut player = player_at(380.0, 380.0, 15);
        let mut trees = 0;

        let events = check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert_eq!(
            events,
            vec![
                GameEvent::Damaged { index: 0, energy: -5 },
                GameEvent::PlayerDefeated
            ]
        );
        assert_eq!(player.energy, -5);
    }

    #[test]
    fn hazard_landing_exactly_on_zero_defeats() {
        let cfg = GameConfig::default();
        let mut reg = one_of_each();
        let mut player = player_at(380.0, 380.0, 20);
        let mut trees = 0;
        let events = check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert!(events.contains(&GameEvent::PlayerDefeated));
        assert_eq!(player.energy, 0);
    }

    #[test]
    fn hazard_test_box_is_smaller_than_item_box() {
        let cfg = GameConfig::default();
        // Player's left edge sits 25px right of each entity's origin: inside a
        // 30px box, outside a 20px one.
        let mut reg = EntityRegistry {
            energy_orbs: vec![Collectible {
                pos: at(100.0, 100.0),
                collected: false,
            }],
            hazards: vec![Hazard {
                pos: at(100.0, 100.0),
                hit: false,
            }],
            trees: vec![],
        };
        let mut player = player_at(125.0, 100.0, 50);
        let mut trees = 0;
        let events = check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert_eq!(events, vec![GameEvent::EnergyCollected { index: 0, energy: 60 }]);
        assert!(!reg.hazards[0].hit);
    }

    #[test]
    fn tree_counts_once() {
        let cfg = GameConfig::default();
        let mut reg = one_of_each();
        let mut player = player_at(690.0, 690.0, 100);
        let mut trees = 2;

        let events = check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert_eq!(events, vec![GameEvent::TreeCollected { index: 0, collected: 3 }]);
        check_collisions(&mut player, &mut reg, &mut trees, &cfg);
        assert_eq!(trees, 3);
    }

    #[test]
    fn nothing_nearby_means_no_events() {
        let cfg = GameConfig::default();
        let mut reg = one_of_each();
        let mut player = player_at(1000.0, 20.0, 100);
        let mut trees = 0;
        assert!(check_collisions(&mut player, &mut reg, &mut trees, &cfg).is_empty());
        assert_eq!(reg, one_of_each());
    }
}
