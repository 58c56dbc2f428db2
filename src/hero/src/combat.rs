// src/hero/src/combat.rs
use combat::{Combatant, Looter};
use error::GameError;
use items::Skill;

use crate::bag::inventory::Inventory;
use crate::core::Character;

/// 战斗系统实现：全部委托给角色自身的规则
impl Combatant for Character {
    fn name(&self) -> &str {
        Character::name(self)
    }

    fn hp(&self) -> i32 {
        self.health()
    }

    fn max_hp(&self) -> i32 {
        self.max_health()
    }

    /// 计算攻击力（包含武器加成）
    fn attack_power(&self) -> i32 {
        self.effective_attack()
    }

    /// 计算防御力（包含护甲加成）
    fn defense(&self) -> i32 {
        self.effective_defense()
    }

    fn take_damage(&mut self, raw_damage: i32) -> Result<i32, GameError> {
        Character::take_damage(self, raw_damage)
    }

    fn take_true_damage(&mut self, amount: i32) -> Result<i32, GameError> {
        Character::take_true_damage(self, amount)
    }

    fn heal(&mut self, amount: i32) -> Result<i32, GameError> {
        Character::heal(self, amount)
    }

    fn is_alive(&self) -> bool {
        Character::is_alive(self)
    }
}

/// 战利品直接进入背包
impl Looter for Character {
    type Bag = Inventory;

    fn loot_bag(&mut self) -> &mut Inventory {
        self.inventory_mut()
    }

    fn active_skill(&self) -> Option<Skill> {
        Character::active_skill(self)
    }
}
