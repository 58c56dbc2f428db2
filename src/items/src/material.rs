// src/items/src/material.rs

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter};

/// 材料子类型
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum MaterialKind {
    /// 制作材料
    Crafting,
    /// 陷阱部件
    Trap,
    /// 神器，仅有收藏价值
    Artifact,
}

/// 材料类物品：不可装备，使用无效果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Material {
    pub kind: MaterialKind,
}

impl Material {
    pub fn new(kind: MaterialKind) -> Self {
        Material { kind }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
