// src/combat/src/lib.rs
//! 战斗系统
//!
//! 回合制、完全确定性：没有命中率、暴击或随机伤害浮动，同样的输入总是得到同样的战斗结果。

pub mod battle;
pub mod combatant;
pub mod enemy;
pub mod skill;


pub use crate::battle::{BattleEngine, BattleEvent, BattleReport, BattleState, RoundReport, Side};
pub use crate::combatant::{Combatant, Looter};
pub use crate::enemy::Enemy;
pub use crate::skill::SkillOutcome;

/// 战斗配置常量
pub mod constants {
    /// 技能只在各自第一回合触发
    pub const SKILL_ROUND: u32 = 1;
}

/// 防御减伤：实际伤害 = max(0, 原始伤害 - 防御)
pub fn mitigate(raw_damage: i32, defense: i32) -> i32 {
    raw_damage.saturating_sub(defense).max(0)
}
