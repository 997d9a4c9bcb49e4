use crate::config::{LevelData, Point};

/// Energy orb or tree-energy item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collectible {
    pub pos: Point,
    pub collected: bool,
}

/// Single-use trap: damages once, then goes inert.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hazard {
    pub pos: Point,
    pub hit: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityRegistry {
    pub energy_orbs: Vec<Collectible>,
    pub hazards: Vec<Hazard>,
    pub trees: Vec<Collectible>,
}

impl EntityRegistry {
    pub fn from_level(level: &LevelData) -> Self {
        let collectible = |pos: &Point| Collectible {
            pos: *pos,
            collected: false,
        };
        Self {
            energy_orbs: level.energy_orbs.iter().map(collectible).collect(),
            hazards: level
                .hazards
                .iter()
                .map(|pos| Hazard {
                    pos: *pos,
                    hit: false,
                })
                .collect(),
            trees: level.trees.iter().map(collectible).collect(),
        }
    }

    /// Marks the first `count` trees (registry order) collected and the rest
    /// live. Used when a saved tree count is restored.
    pub fn reconcile_trees(&mut self, count: u32) {
        for (i, tree) in self.trees.iter_mut().enumerate() {
            tree.collected = (i as u32) < count;
        }
    }

    pub fn live_orbs(&self) -> impl Iterator<Item = &Collectible> {
        self.energy_orbs.iter().filter(|o| !o.collected)
    }

    pub fn live_hazards(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter().filter(|h| !h.hit)
    }

    pub fn live_trees(&self) -> impl Iterator<Item = &Collectible> {
        self.trees.iter().filter(|t| !t.collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn registry() -> EntityRegistry {
        let level = LevelData::bundled(&GameConfig::default()).unwrap();
        EntityRegistry::from_level(&level)
    }

    #[test]
    fn starts_with_everything_live() {
        let reg = registry();
        assert_eq!(reg.live_orbs().count(), 5);
        assert_eq!(reg.live_hazards().count(), 7);
        assert_eq!(reg.live_trees().count(), 5);
    }

    #[test]
    fn reconcile_marks_leading_trees_in_order() {
        let mut reg = registry();
        reg.reconcile_trees(3);
        let flags: Vec<bool> = reg.trees.iter().map(|t| t.collected).collect();
        assert_eq!(flags, vec![true, true, true, false, false]);

        reg.reconcile_trees(0);
        assert!(reg.trees.iter().all(|t| !t.collected));
    }

    #[test]
    fn reconcile_beyond_total_collects_all() {
        let mut reg = registry();
        reg.reconcile_trees(42);
        assert_eq!(reg.live_trees().count(), 0);
    }
}
