use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

/// Price of spawning a node, in each raw resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceCost {
    pub gold: u32,
    pub iron: u32,
    pub wood: u32,
    pub stone: u32,
}

impl ResourceCost {
    pub const FREE: ResourceCost = ResourceCost {
        gold: 0,
        iron: 0,
        wood: 0,
        stone: 0,
    };

    pub fn is_free(&self) -> bool {
        *self == Self::FREE
    }
}

/// Raw resources held by a faction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceStockpile {
    pub gold: u32,
    pub iron: u32,
    pub wood: u32,
    pub stone: u32,
}

/// Returned when a stockpile cannot cover a cost. Nothing was deducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub gold: u32,
    pub iron: u32,
    pub wood: u32,
    pub stone: u32,
}

impl ResourceStockpile {
    pub fn new(gold: u32, iron: u32, wood: u32, stone: u32) -> Self {
        Self {
            gold,
            iron,
            wood,
            stone,
        }
    }

    pub fn can_afford(&self, cost: &ResourceCost) -> bool {
        self.gold >= cost.gold
            && self.iron >= cost.iron
            && self.wood >= cost.wood
            && self.stone >= cost.stone
    }

    /// Deduct `cost` in full, or nothing at all.
    pub fn spend(&mut self, cost: &ResourceCost) -> Result<(), Shortfall> {
        if !self.can_afford(cost) {
            return Err(Shortfall {
                gold: cost.gold.saturating_sub(self.gold),
                iron: cost.iron.saturating_sub(self.iron),
                wood: cost.wood.saturating_sub(self.wood),
                stone: cost.stone.saturating_sub(self.stone),
            });
        }
        self.gold -= cost.gold;
        self.iron -= cost.iron;
        self.wood -= cost.wood;
        self.stone -= cost.stone;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_amount_is_affordable() {
        let stock = ResourceStockpile::new(10, 5, 0, 0);
        let cost = ResourceCost {
            gold: 10,
            iron: 5,
            ..ResourceCost::default()
        };
        assert!(stock.can_afford(&cost));
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut stock = ResourceStockpile::new(50, 2, 10, 10);
        let cost = ResourceCost {
            gold: 20,
            iron: 5,
            wood: 5,
            stone: 0,
        };
        let err = stock.spend(&cost).unwrap_err();
        assert_eq!(err.iron, 3);
        assert_eq!(err.gold, 0);
        assert_eq!(stock, ResourceStockpile::new(50, 2, 10, 10));

        stock.iron = 5;
        stock.spend(&cost).unwrap();
        assert_eq!(stock, ResourceStockpile::new(30, 0, 5, 10));
    }

    #[test]
    fn free_cost_always_affordable() {
        let mut stock = ResourceStockpile::default();
        assert!(ResourceCost::FREE.is_free());
        assert!(stock.spend(&ResourceCost::FREE).is_ok());
    }
}
