//src/world/src/lib.rs
//! 世界：一组地点，每个地点持有敌人和可拾取物品
use bincode::{Decode, Encode};
use error::GameError;
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod location;
pub mod starter;

pub use crate::location::Location;
pub use crate::starter::{starter_quests, starter_world};

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct World {
    pub locations: Vec<Location>,
    current: usize, // 当前所在地点
}

impl World {
    /// 由地点列表创建世界，从第一个地点出发；至少需要一个地点
    pub fn new(locations: Vec<Location>) -> Result<Self, GameError> {
        if locations.is_empty() {
            return Err(GameError::EmptyCollection);
        }
        Ok(Self {
            locations,
            current: 0,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Location {
        &self.locations[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Location {
        &mut self.locations[self.current]
    }

    /// 前往指定地点
    pub fn travel(&mut self, index: usize) -> Result<&Location, GameError> {
        if index >= self.locations.len() {
            return Err(GameError::out_of_range(index, self.locations.len()));
        }
        self.current = index;
        info!(location = %self.locations[index].name, "travelled");
        Ok(&self.locations[index])
    }

    /// 从当前地点拾起物品（物品移出地点）
    pub fn take_item(&mut self, index: usize) -> Result<items::Item, GameError> {
        self.current_mut().take_item(index)
    }

    /// 存档恢复后校验当前地点索引
    pub fn validate(&self) -> Result<(), GameError> {
        if self.locations.is_empty() {
            return Err(GameError::CorruptedSave("world has no locations".into()));
        }
        if self.current >= self.locations.len() {
            return Err(GameError::CorruptedSave(format!(
                "current location {} outside {} locations",
                self.current,
                self.locations.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat::Enemy;
    use items::{Item, Rarity};

    fn two_places() -> World {
        World::new(vec![
            Location::new("Village", "Quiet houses").with_items([Item::potion(
                "Health Potion",
                Rarity::Common,
                20,
                30,
            )]),
            Location::new("Cave", "Dripping water").with_enemies([Enemy::new("Bat", 10, 2)]),
        ])
        .unwrap()
    }

    #[test]
    fn starts_at_first_location() {
        let world = two_places();
        assert_eq!(world.current().name, "Village");
        assert!(World::new(Vec::new()).is_err());
    }

    #[test]
    fn travel_checks_the_index() {
        let mut world = two_places();
        assert_eq!(world.travel(1).unwrap().name, "Cave");
        assert_eq!(world.current().enemies.len(), 1);
        assert!(matches!(
            world.travel(2),
            Err(GameError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(world.current_index(), 1);
    }

    #[test]
    fn take_item_moves_it_out() {
        let mut world = two_places();
        let item = world.take_item(0).unwrap();
        assert_eq!(item.name, "Health Potion");
        assert!(world.current().items.is_empty());
        assert!(world.take_item(0).is_err());
    }

    #[test]
    fn corrupt_index_fails_validation() {
        let mut world = two_places();
        world.current = 7;
        assert!(matches!(world.validate(), Err(GameError::CorruptedSave(_))));
    }
}
