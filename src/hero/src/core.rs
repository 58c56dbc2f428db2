// src/hero/src/core.rs
use bincode::{Decode, Encode};
use combat::SkillOutcome;
use error::GameError;
use items::{EquipSlot, Item, ItemKind, Skill};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bag::{equipment::Equipment, inventory::Inventory};
use crate::constants::*;

/// 角色核心数据结构
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Character {
    // 基础属性
    name: String,
    hp: i32,
    max_hp: i32,
    base_attack: i32,
    base_defense: i32,

    // 成长系统
    level: u32,
    experience: u32,

    // 子系统
    inventory: Inventory,
    equipment: Equipment,
}

/// 角色属性快照（供菜单层显示）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub level: u32,
    pub experience: u32,
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub skill: Option<Skill>,
    pub inventory_size: usize,
}

/// 获得经验后的升级报告
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub levels_gained: u32,
    pub level: u32,
    pub experience: u32,
}

/// 使用物品产生的效果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// 药水恢复了生命
    Healed { item: String, amount: i32 },
    /// 卷轴技能作用于自身
    SkillCast { item: String, outcome: SkillOutcome },
    /// 物品被装备（武器、护甲、攻击类卷轴）
    Equipped {
        item: String,
        slot: EquipSlot,
        replaced: Option<String>,
    },
    /// 材料类物品没有使用效果
    NoEffect { item: String },
}

impl Character {
    /// 以指定基础属性创建 1 级角色
    pub fn new(name: impl Into<String>, health: i32, attack: i32, defense: i32) -> Self {
        let health = health.max(1);
        Self {
            name: name.into(),
            hp: health,
            max_hp: health,
            base_attack: attack.max(0),
            base_defense: defense.max(0),
            level: 1,
            experience: 0,
            inventory: Inventory::new(),
            equipment: Equipment::new(),
        }
    }

    /// 以默认属性创建角色（生命100，攻击20，防御5）
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, START_HEALTH, START_ATTACK, START_DEFENSE)
    }

    /// 从存档恢复进度，校验所有不变量
    pub fn restore(
        name: impl Into<String>,
        health: i32,
        max_health: i32,
        base_attack: i32,
        base_defense: i32,
        level: u32,
        experience: u32,
    ) -> Result<Self, GameError> {
        if max_health <= 0 || health < 0 || health > max_health {
            return Err(GameError::InvalidArgument(format!(
                "health {health} outside 0..={max_health}"
            )));
        }
        if level == 0 || experience >= EXP_PER_LEVEL {
            return Err(GameError::InvalidArgument(format!(
                "level {level} / experience {experience} is not a valid progression"
            )));
        }
        GameError::ensure_non_negative("attack", base_attack)?;
        GameError::ensure_non_negative("defense", base_defense)?;

        let mut character = Self::new(name, max_health, base_attack, base_defense);
        character.hp = health;
        character.level = level;
        character.experience = experience;
        Ok(character)
    }

    /// 恢复背包和装备（完整存档使用）
    pub fn with_gear(mut self, inventory: Inventory, equipment: Equipment) -> Self {
        self.inventory = inventory;
        self.equipment = equipment;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.hp
    }

    pub fn max_health(&self) -> i32 {
        self.max_hp
    }

    pub fn base_attack(&self) -> i32 {
        self.base_attack
    }

    pub fn base_defense(&self) -> i32 {
        self.base_defense
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// 有效攻击力 = 基础攻击 + 武器加成
    pub fn effective_attack(&self) -> i32 {
        self.base_attack.saturating_add(self.equipment.attack_bonus())
    }

    /// 有效防御力 = 基础防御 + 护甲加成
    pub fn effective_defense(&self) -> i32 {
        self.base_defense.saturating_add(self.equipment.defense_bonus())
    }

    pub fn active_skill(&self) -> Option<Skill> {
        self.equipment.active_skill()
    }

    /// 是否存活
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// 治疗，不会超过最大生命；返回实际恢复量
    pub fn heal(&mut self, amount: i32) -> Result<i32, GameError> {
        let amount = GameError::ensure_non_negative("heal amount", amount)?;
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        Ok(restored)
    }

    /// 受到伤害：先经防御减免，生命不会低于 0；返回实际伤害
    pub fn take_damage(&mut self, raw_damage: i32) -> Result<i32, GameError> {
        let raw_damage = GameError::ensure_non_negative("damage", raw_damage)?;
        let actual = combat::mitigate(raw_damage, self.effective_defense());
        self.hp = (self.hp - actual).max(0);
        Ok(actual)
    }

    /// 受到无视防御的伤害（技能）
    pub fn take_true_damage(&mut self, amount: i32) -> Result<i32, GameError> {
        let amount = GameError::ensure_non_negative("damage", amount)?;
        self.hp = (self.hp - amount).max(0);
        Ok(amount)
    }

    /// 拾取物品
    pub fn add_item(&mut self, item: Item) {
        debug!(character = %self.name, item = %item.name, "item picked up");
        self.inventory.add(item);
    }

    pub(crate) fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// 装备物品，返回被替换下来的旧装备。
    ///
    /// 不可装备的物品会被放进背包，并返回 `NotEquippable`。
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, GameError> {
        if item.equip_slot().is_none() {
            let name = item.name.clone();
            self.inventory.add(item);
            return Err(GameError::NotEquippable { name });
        }
        debug!(character = %self.name, item = %item.name, "equipped");
        self.equipment.equip(item)
    }

    /// 从背包装备物品；旧装备回到背包末尾。失败时背包保持不变
    pub fn equip_item(&mut self, index: usize) -> Result<ItemEffect, GameError> {
        let candidate = self.inventory.get(index)?;
        let slot = candidate
            .equip_slot()
            .ok_or_else(|| GameError::NotEquippable {
                name: candidate.name.clone(),
            })?;

        let item = self.inventory.remove(index)?;
        let name = item.name.clone();
        let replaced = self.equipment.equip(item)?;
        let replaced_name = replaced.as_ref().map(|old| old.name.clone());
        if let Some(old) = replaced {
            self.inventory.add(old);
        }
        debug!(character = %self.name, item = %name, %slot, "equipped from inventory");
        Ok(ItemEffect::Equipped {
            item: name,
            slot,
            replaced: replaced_name,
        })
    }

    /// 使用背包中的物品，按类别触发各自效果
    pub fn use_item(&mut self, index: usize) -> Result<ItemEffect, GameError> {
        let item = self.inventory.get(index)?;
        let name = item.name.clone();
        match &item.kind {
            ItemKind::Potion(potion) => {
                let heal_amount = potion.heal_amount;
                self.inventory.remove(index)?;
                let amount = self.heal(heal_amount)?;
                debug!(character = %self.name, item = %name, amount, "potion used");
                Ok(ItemEffect::Healed { item: name, amount })
            }
            ItemKind::Scroll(scroll) if !scroll.skill.is_offensive() => {
                let skill = scroll.skill;
                self.inventory.remove(index)?;
                let outcome = combat::skill::cast_on_self(skill, self)?;
                debug!(character = %self.name, item = %name, ?outcome, "scroll read");
                Ok(ItemEffect::SkillCast { item: name, outcome })
            }
            // 攻击类卷轴在战斗外没有目标，等同于装备
            ItemKind::Weapon(_) | ItemKind::Armor(_) | ItemKind::Scroll(_) => {
                self.equip_item(index)
            }
            ItemKind::Material(_) => Ok(ItemEffect::NoEffect { item: name }),
        }
    }

    /// 获取经验；一次可以连升多级，每级扣除 100 经验
    pub fn gain_experience(&mut self, exp: i32) -> Result<LevelUp, GameError> {
        let exp = GameError::ensure_non_negative("experience", exp)? as u32;
        // experience < 100 且 exp <= i32::MAX，相加不会溢出 u32
        let total = self.experience + exp;
        let levels_gained = total / EXP_PER_LEVEL;
        self.experience = total % EXP_PER_LEVEL;
        if levels_gained > 0 {
            self.level_up(levels_gained);
        }
        Ok(LevelUp {
            levels_gained,
            level: self.level,
            experience: self.experience,
        })
    }

    /// 升级系统：一次结算多级，属性饱和而不溢出；当前生命不回满
    fn level_up(&mut self, levels: u32) {
        let steps = i32::try_from(levels).unwrap_or(i32::MAX);
        self.level = self.level.saturating_add(levels);
        self.max_hp = self.max_hp.saturating_add(HEALTH_PER_LEVEL.saturating_mul(steps));
        self.base_attack = self
            .base_attack
            .saturating_add(ATTACK_PER_LEVEL.saturating_mul(steps));
        self.base_defense = self
            .base_defense
            .saturating_add(DEFENSE_PER_LEVEL.saturating_mul(steps));
        info!(character = %self.name, level = self.level, levels, "level up");
    }

    /// 属性快照
    pub fn stats(&self) -> CharacterStats {
        CharacterStats {
            name: self.name.clone(),
            health: self.hp,
            max_health: self.max_hp,
            attack: self.effective_attack(),
            defense: self.effective_defense(),
            level: self.level,
            experience: self.experience,
            weapon: self.equipment.get(EquipSlot::Weapon).map(|i| i.name.clone()),
            armor: self.equipment.get(EquipSlot::Armor).map(|i| i.name.clone()),
            skill: self.active_skill(),
            inventory_size: self.inventory.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::{MaterialKind, Rarity};
    use proptest::prelude::*;

    fn hero() -> Character {
        Character::with_defaults("Aria")
    }

    #[test]
    fn starts_with_default_stats() {
        let c = hero();
        assert_eq!(c.health(), 100);
        assert_eq!(c.max_health(), 100);
        assert_eq!(c.effective_attack(), 20);
        assert_eq!(c.effective_defense(), 5);
        assert_eq!(c.level(), 1);
        assert_eq!(c.experience(), 0);
        assert!(c.is_alive());
    }

    #[test]
    fn heal_is_capped_and_rejects_negative() {
        let mut c = hero();
        c.take_damage(45).unwrap();
        assert_eq!(c.health(), 60);
        assert_eq!(c.heal(30).unwrap(), 30);
        assert_eq!(c.heal(30).unwrap(), 10);
        assert_eq!(c.health(), 100);
        assert!(matches!(c.heal(-1), Err(GameError::InvalidArgument(_))));
    }

    #[test]
    fn defense_absorbs_weak_hits() {
        let mut c = Character::new("Tank", 100, 10, 15);
        assert_eq!(c.take_damage(10).unwrap(), 0);
        assert_eq!(c.health(), 100);
        assert!(matches!(c.take_damage(-3), Err(GameError::InvalidArgument(_))));
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut c = hero();
        assert_eq!(c.take_damage(500).unwrap(), 495);
        assert_eq!(c.health(), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn experience_overflow_levels_up_repeatedly() {
        let mut c = hero();
        let report = c.gain_experience(250).unwrap();
        assert_eq!(
            report,
            LevelUp {
                levels_gained: 2,
                level: 3,
                experience: 50
            }
        );
        assert_eq!(c.max_health(), 140);
        assert_eq!(c.base_attack(), 30);
        assert_eq!(c.base_defense(), 11);
        // 升级不回血
        assert_eq!(c.health(), 100);
        assert!(matches!(
            c.gain_experience(-10),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn equipping_a_second_weapon_replaces_the_bonus() {
        let mut c = hero();
        c.add_item(Item::weapon("Dagger", Rarity::Common, 10, 2));
        c.add_item(Item::weapon("Longsword", Rarity::Uncommon, 60, 7));

        c.equip_item(0).unwrap();
        assert_eq!(c.effective_attack(), 22);

        // Longsword 现在位于索引 0
        let effect = c.equip_item(0).unwrap();
        assert_eq!(
            effect,
            ItemEffect::Equipped {
                item: "Longsword".to_string(),
                slot: EquipSlot::Weapon,
                replaced: Some("Dagger".to_string()),
            }
        );
        assert_eq!(c.effective_attack(), 27);
        assert_eq!(c.inventory().items()[0].name, "Dagger");
    }

    #[test]
    fn armor_folds_into_defense() {
        let mut c = hero();
        c.equip(Item::armor("Chain Mail", Rarity::Common, 80, 4))
            .unwrap();
        assert_eq!(c.effective_defense(), 9);
        assert_eq!(c.take_damage(10).unwrap(), 1);
    }

    #[test]
    fn equip_rejects_potions_without_losing_them() {
        let mut c = hero();
        c.add_item(Item::potion("Health Potion", Rarity::Common, 20, 30));
        assert!(matches!(
            c.equip_item(0),
            Err(GameError::NotEquippable { .. })
        ));
        assert_eq!(c.inventory().len(), 1);

        let err = c
            .equip(Item::material("Iron Ore", Rarity::Common, 5, MaterialKind::Crafting))
            .unwrap_err();
        assert!(matches!(err, GameError::NotEquippable { .. }));
        assert_eq!(c.inventory().len(), 2);
    }

    #[test]
    fn potion_use_heals_and_consumes() {
        let mut c = hero();
        c.take_damage(55).unwrap();
        c.add_item(Item::potion("Health Potion", Rarity::Common, 20, 30));

        let effect = c.use_item(0).unwrap();
        assert_eq!(
            effect,
            ItemEffect::Healed {
                item: "Health Potion".to_string(),
                amount: 30
            }
        );
        assert_eq!(c.health(), 80);
        assert!(c.inventory().is_empty());
        assert!(matches!(
            c.use_item(0),
            Err(GameError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn scrolls_heal_or_arm_a_skill() {
        let mut c = hero();
        c.take_damage(65).unwrap();
        c.add_item(Item::scroll("Scroll of Renewal", Rarity::Uncommon, 60, Skill::Rejuvenate));
        c.add_item(Item::scroll("Scroll of Fireball", Rarity::Rare, 120, Skill::Fireball));

        let effect = c.use_item(0).unwrap();
        assert!(matches!(
            effect,
            ItemEffect::SkillCast {
                outcome: SkillOutcome::Healed { amount: 25, .. },
                ..
            }
        ));
        assert_eq!(c.health(), 65);

        let effect = c.use_item(0).unwrap();
        assert!(matches!(effect, ItemEffect::Equipped { slot: EquipSlot::Skill, .. }));
        assert_eq!(c.active_skill(), Some(Skill::Fireball));
        assert!(c.inventory().is_empty());
    }

    #[test]
    fn materials_stay_in_the_bag() {
        let mut c = hero();
        c.add_item(Item::material("Old Amulet", Rarity::Legendary, 500, MaterialKind::Artifact));
        assert_eq!(
            c.use_item(0).unwrap(),
            ItemEffect::NoEffect {
                item: "Old Amulet".to_string()
            }
        );
        assert_eq!(c.inventory().len(), 1);
    }

    #[test]
    fn restore_validates_invariants() {
        assert!(Character::restore("Aria", 120, 100, 20, 5, 1, 0).is_err());
        assert!(Character::restore("Aria", 50, 100, 20, 5, 0, 0).is_err());
        assert!(Character::restore("Aria", 50, 100, 20, 5, 2, 100).is_err());
        let c = Character::restore("Aria", 50, 120, 25, 8, 2, 40).unwrap();
        assert_eq!(c.stats().health, 50);
        assert_eq!(c.stats().level, 2);
    }

    #[test]
    fn huge_experience_gains_never_overflow() {
        let mut c = hero();
        let first = c.gain_experience(i32::MAX).unwrap();
        assert_eq!(first.levels_gained, i32::MAX as u32 / 100);
        assert_eq!(c.experience(), i32::MAX as u32 % 100);

        for _ in 0..200 {
            c.gain_experience(i32::MAX).unwrap();
        }
        assert_eq!(c.max_health(), i32::MAX);
        assert_eq!(c.base_attack(), i32::MAX);
        assert_eq!(c.effective_attack(), i32::MAX);
        assert!(c.experience() < EXP_PER_LEVEL);
        assert_eq!(c.health(), 100);
    }

    #[test]
    fn character_with_gear_survives_json() {
        let mut c = hero();
        c.add_item(Item::potion("Health Potion", Rarity::Common, 20, 30));
        c.equip(Item::armor("Chain Mail", Rarity::Common, 80, 4))
            .unwrap();

        let json = serde_json::to_string(&c).expect("serialize character");
        let back: Character = serde_json::from_str(&json).expect("deserialize character");
        assert_eq!(back, c);
        assert_eq!(back.effective_defense(), 9);
    }

    proptest! {
        #[test]
        fn heal_never_exceeds_max(damage in 0i32..300, amount in 0i32..10_000) {
            let mut c = hero();
            c.take_damage(damage).unwrap();
            c.heal(amount).unwrap();
            prop_assert!(c.health() <= c.max_health());
            prop_assert!(c.health() >= 0);
        }

        #[test]
        fn damage_never_goes_below_zero(hits in proptest::collection::vec(0i32..500, 1..20)) {
            let mut c = hero();
            for raw in hits {
                let before = c.health();
                let actual = c.take_damage(raw).unwrap();
                prop_assert_eq!(actual, (raw - c.effective_defense()).max(0));
                prop_assert!(c.health() >= 0);
                prop_assert!(c.health() <= before);
            }
        }

        #[test]
        fn experience_stays_below_threshold(gains in proptest::collection::vec(0i32..400, 1..10)) {
            let mut c = hero();
            let mut total = 0u32;
            for exp in gains {
                total += exp as u32;
                c.gain_experience(exp).unwrap();
                prop_assert!(c.experience() < EXP_PER_LEVEL);
            }
            prop_assert_eq!(c.level(), 1 + total / EXP_PER_LEVEL);
            prop_assert_eq!(c.max_health(), 100 + 20 * (c.level() as i32 - 1));
        }
    }
}
