// src/combat/src/skill.rs
//! 技能结算：卷轴技能与敌人特殊能力走同一套规则

use bincode::{Decode, Encode};
use error::GameError;
use items::Skill;
use serde::{Deserialize, Serialize};

use crate::Combatant;

/// 一次技能施放的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub enum SkillOutcome {
    /// 对目标造成的伤害（无视防御）
    Damage { skill: Skill, amount: i32 },
    /// 施法者恢复的生命
    Healed { skill: Skill, amount: i32 },
}

/// 施放技能。攻击技能直接扣除目标生命，绕过防御减免；这是技能的设计效果而非漏洞
pub fn cast<C, T>(skill: Skill, caster: &mut C, target: &mut T) -> Result<SkillOutcome, GameError>
where
    C: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    if skill.is_offensive() {
        let amount = target.take_true_damage(skill.power())?;
        Ok(SkillOutcome::Damage { skill, amount })
    } else {
        cast_on_self(skill, caster)
    }
}

/// 施放只作用于自身的技能；攻击技能没有目标，返回参数错误
pub fn cast_on_self<C>(skill: Skill, caster: &mut C) -> Result<SkillOutcome, GameError>
where
    C: Combatant + ?Sized,
{
    if skill.is_offensive() {
        return Err(GameError::InvalidArgument(format!("{skill} needs a target")));
    }
    let amount = caster.heal(skill.power())?;
    Ok(SkillOutcome::Healed { skill, amount })
}
