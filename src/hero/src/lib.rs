// src/hero/src/lib.rs

// 核心模块
mod bag;
mod combat;
mod core;

// 重新导出主要类型
pub use self::{
    bag::{
        equipment::Equipment,
        inventory::{Inventory, InventoryPage, PAGE_SIZE},
    },
    core::{Character, CharacterStats, ItemEffect, LevelUp},
};

/// 角色成长常量
pub mod constants {
    /// 默认初始生命
    pub const START_HEALTH: i32 = 100;
    /// 默认初始攻击
    pub const START_ATTACK: i32 = 20;
    /// 默认初始防御
    pub const START_DEFENSE: i32 = 5;
    /// 每级所需经验
    pub const EXP_PER_LEVEL: u32 = 100;
    /// 每次升级增加的最大生命
    pub const HEALTH_PER_LEVEL: i32 = 20;
    /// 每次升级增加的攻击
    pub const ATTACK_PER_LEVEL: i32 = 5;
    /// 每次升级增加的防御
    pub const DEFENSE_PER_LEVEL: i32 = 3;
}
