//src/items/src/weapon.rs
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 武器数据：装备后叠加到角色的基础攻击力上
#[derive(PartialEq, Eq, Debug, Clone, Copy, Encode, Decode, Serialize, Deserialize)]
pub struct Weapon {
    pub attack_power: i32, // 攻击加成
}

impl Weapon {
    /// 创建新武器，负数加成按 0 处理
    pub fn new(attack_power: i32) -> Self {
        Self {
            attack_power: attack_power.max(0),
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attack Power: {}", self.attack_power)
    }
}
