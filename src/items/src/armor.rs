//src/items/src/armor.rs
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 护甲数据：装备后叠加到角色的基础防御力上
#[derive(PartialEq, Eq, Debug, Clone, Copy, Encode, Decode, Serialize, Deserialize)]
pub struct Armor {
    pub defense: i32, // 防御加成
}

impl Armor {
    /// 创建新护甲，负数加成按 0 处理
    pub fn new(defense: i32) -> Self {
        Armor {
            defense: defense.max(0),
        }
    }
}

impl fmt::Display for Armor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Defense: {}", self.defense)
    }
}
