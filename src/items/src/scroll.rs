//src/items/src/scroll.rs
//! 卷轴与技能
//!
//! 卷轴只携带技能标签，技能的实际效果在战斗模块里结算。

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter};

/// 技能卷轴
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy, Encode, Decode, Serialize, Deserialize)]
pub struct Scroll {
    pub skill: Skill,
}

impl Scroll {
    pub fn new(skill: Skill) -> Self {
        Self { skill }
    }
}

impl fmt::Display for Scroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skill: {}", self.skill)
    }
}

/// 技能标签（角色装备的卷轴技能、敌人的特殊能力共用）
#[derive(
    Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize,
)]
pub enum Skill {
    /// 火球：固定 50 点伤害，无视防御
    Fireball,
    /// 闪电：固定 30 点伤害，无视防御
    Lightning,
    /// 回春：施法者恢复 25 点生命
    Rejuvenate,
}

impl Skill {
    /// 技能的固定数值
    pub fn power(self) -> i32 {
        match self {
            Skill::Fireball => 50,
            Skill::Lightning => 30,
            Skill::Rejuvenate => 25,
        }
    }

    /// 是否作用于对手（否则作用于施法者自身）
    pub fn is_offensive(self) -> bool {
        match self {
            Skill::Fireball | Skill::Lightning => true,
            Skill::Rejuvenate => false,
        }
    }
}
