// src/combat/src/combatant.rs

use error::GameError;
use items::{Item, Skill};

/// 表示可以参加战斗的活体（角色与敌人共用）
pub trait Combatant {
    /// 获取名称
    fn name(&self) -> &str;

    /// 获取当前生命值
    fn hp(&self) -> i32;

    /// 获取最大生命值
    fn max_hp(&self) -> i32;

    /// 有效攻击力（含装备加成）
    fn attack_power(&self) -> i32;

    /// 有效防御力（含装备加成）
    fn defense(&self) -> i32;

    /// 承受经过防御减免的伤害，返回减免后的伤害值（生命最低为 0）
    fn take_damage(&mut self, raw_damage: i32) -> Result<i32, GameError>;

    /// 承受无视防御的伤害（技能），返回伤害值
    fn take_true_damage(&mut self, amount: i32) -> Result<i32, GameError>;

    /// 治疗，返回实际恢复的生命值
    fn heal(&mut self, amount: i32) -> Result<i32, GameError>;

    /// 是否存活
    fn is_alive(&self) -> bool {
        self.hp() > 0
    }
}

/// 可以拾取战利品、携带技能的战斗者（玩家一方）
pub trait Looter: Combatant {
    /// 战利品的去处，通常就是背包
    type Bag: Extend<Item>;

    fn loot_bag(&mut self) -> &mut Self::Bag;

    /// 当前装备的技能
    fn active_skill(&self) -> Option<Skill>;
}

// 为Enemy实现Combatant
impl Combatant for crate::enemy::Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> i32 {
        self.hp
    }

    fn max_hp(&self) -> i32 {
        self.max_hp
    }

    fn attack_power(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn take_damage(&mut self, raw_damage: i32) -> Result<i32, GameError> {
        let raw_damage = GameError::ensure_non_negative("damage", raw_damage)?;
        let actual = crate::mitigate(raw_damage, self.defense);
        self.hp = (self.hp - actual).max(0);
        Ok(actual)
    }

    fn take_true_damage(&mut self, amount: i32) -> Result<i32, GameError> {
        let amount = GameError::ensure_non_negative("damage", amount)?;
        self.hp = (self.hp - amount).max(0);
        Ok(amount)
    }

    fn heal(&mut self, amount: i32) -> Result<i32, GameError> {
        let amount = GameError::ensure_non_negative("heal amount", amount)?;
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        Ok(restored)
    }
}
