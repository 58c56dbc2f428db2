// src/combat/src/enemy.rs

use bincode::{Decode, Encode};
use error::GameError;
use items::{Item, Skill};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Combatant;
use crate::skill::{self, SkillOutcome};

/// 敌人实体：与角色对称的属性持有者，但没有背包和等级，带一张战利品表
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Enemy {
    pub(crate) name: String,
    pub(crate) hp: i32,
    pub(crate) max_hp: i32,
    pub(crate) attack: i32,
    pub(crate) defense: i32,
    abilities: Vec<Skill>,
    loot: Vec<Item>,
    exp_reward: u32,
}

impl Enemy {
    /// 创建新敌人；基础模型中敌人没有防御，原始伤害全额生效
    pub fn new(name: impl Into<String>, hp: i32, attack: i32) -> Self {
        let hp = hp.max(0);
        Self {
            name: name.into(),
            hp,
            max_hp: hp,
            attack: attack.max(0),
            defense: 0,
            abilities: Vec::new(),
            loot: Vec::new(),
            exp_reward: 0,
        }
    }

    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = defense.max(0);
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = Skill>) -> Self {
        self.abilities.extend(abilities);
        self
    }

    pub fn with_loot(mut self, loot: impl IntoIterator<Item = Item>) -> Self {
        self.loot.extend(loot);
        self
    }

    pub fn with_exp_reward(mut self, exp: u32) -> Self {
        self.exp_reward = exp;
        self
    }

    pub fn abilities(&self) -> &[Skill] {
        &self.abilities
    }

    /// 尚未掉落的战利品
    pub fn loot(&self) -> &[Item] {
        &self.loot
    }

    /// 击败后可获得的经验（不会自动发放）
    pub fn exp_reward(&self) -> u32 {
        self.exp_reward
    }

    /// 普通攻击，返回目标实际受到的伤害
    pub fn attack<T: Combatant + ?Sized>(&self, target: &mut T) -> Result<i32, GameError> {
        target.take_damage(self.attack)
    }

    /// 依次施放所有特殊能力
    pub fn use_ability<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
    ) -> Result<Vec<SkillOutcome>, GameError> {
        let abilities = self.abilities.clone();
        let mut outcomes = Vec::with_capacity(abilities.len());
        for ability in abilities {
            let outcome = skill::cast(ability, self, target)?;
            debug!(enemy = %self.name, ?outcome, "ability used");
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// 把全部战利品移交给胜利者；战利品表随即清空，因此最多掉落一次
    pub fn drop_loot<E: Extend<Item>>(&mut self, into: &mut E) -> Vec<String> {
        let names = self.loot.iter().map(|item| item.name.clone()).collect();
        into.extend(self.loot.drain(..));
        names
    }
}
