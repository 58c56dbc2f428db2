//src/items/src/potion.rs
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 药水：使用后立即为角色恢复生命
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy, Encode, Decode, Serialize, Deserialize)]
pub struct Potion {
    pub heal_amount: i32,
}

impl Potion {
    pub fn new(heal_amount: i32) -> Self {
        Potion {
            heal_amount: heal_amount.max(0),
        }
    }
}

impl fmt::Display for Potion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heals: {}", self.heal_amount)
    }
}
