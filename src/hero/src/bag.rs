// src/hero/src/bag.rs

// 子模块定义
pub mod equipment; // 装备管理
pub mod inventory; // 物品库存管理
