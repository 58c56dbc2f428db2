// src/world/src/location.rs
use bincode::{Decode, Encode};
use combat::Enemy;
use error::GameError;
use items::Item;
use serde::{Deserialize, Serialize};

/// 地点：敌人列表和地上的物品
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub description: String,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
}

impl Location {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            enemies: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn with_enemies(mut self, enemies: impl IntoIterator<Item = Enemy>) -> Self {
        self.enemies.extend(enemies);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// 移除并返回地上的物品
    pub fn take_item(&mut self, index: usize) -> Result<Item, GameError> {
        if index >= self.items.len() {
            return Err(GameError::out_of_range(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({} enemies, {} items)",
            self.name,
            self.description,
            self.enemies.len(),
            self.items.len()
        )
    }
}
