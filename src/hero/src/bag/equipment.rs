// src/hero/src/bag/equipment.rs
use bincode::{Decode, Encode};
use error::GameError;
use items::{EquipSlot, Item, Skill};
use serde::{Deserialize, Serialize};

/// 装备栏：每个槽位最多一件。重复装备同一槽位会替换旧装备，加成不会叠加
#[derive(Clone, Debug, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Equipment {
    weapon: Option<Item>,
    armor: Option<Item>,
    skill: Option<Item>,
}

impl Equipment {
    /// 创建空装备栏
    pub fn new() -> Self {
        Self::default()
    }

    /// 装备物品，返回被替换下来的旧装备
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, GameError> {
        let slot = item.equip_slot().ok_or_else(|| GameError::NotEquippable {
            name: item.name.clone(),
        })?;
        Ok(self.slot_mut(slot).replace(item))
    }

    /// 卸下指定槽位
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Skill => self.skill.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Skill => &mut self.skill,
        }
    }

    /// 武器提供的攻击加成
    pub fn attack_bonus(&self) -> i32 {
        self.weapon.as_ref().map_or(0, Item::attack_bonus)
    }

    /// 护甲提供的防御加成
    pub fn defense_bonus(&self) -> i32 {
        self.armor.as_ref().map_or(0, Item::defense_bonus)
    }

    /// 当前技能（最后装备的卷轴）
    pub fn active_skill(&self) -> Option<Skill> {
        self.skill.as_ref().and_then(Item::skill)
    }

    /// 获取当前装备（供UI渲染）
    pub fn slots(&self) -> [(EquipSlot, Option<&Item>); 3] {
        [
            (EquipSlot::Weapon, self.weapon.as_ref()),
            (EquipSlot::Armor, self.armor.as_ref()),
            (EquipSlot::Skill, self.skill.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::Rarity;

    #[test]
    fn second_weapon_replaces_the_first() {
        let mut eq = Equipment::new();
        let old = eq
            .equip(Item::weapon("Dagger", Rarity::Common, 10, 2))
            .unwrap();
        assert!(old.is_none());

        let old = eq
            .equip(Item::weapon("Longsword", Rarity::Uncommon, 60, 7))
            .unwrap();
        assert_eq!(old.map(|i| i.name), Some("Dagger".to_string()));
        assert_eq!(eq.attack_bonus(), 7);
    }

    #[test]
    fn last_scroll_wins_the_skill_slot() {
        let mut eq = Equipment::new();
        eq.equip(Item::scroll("Scroll of Fireball", Rarity::Rare, 100, Skill::Fireball))
            .unwrap();
        eq.equip(Item::scroll("Scroll of Lightning", Rarity::Rare, 90, Skill::Lightning))
            .unwrap();
        assert_eq!(eq.active_skill(), Some(Skill::Lightning));
    }

    #[test]
    fn potions_cannot_be_equipped() {
        let mut eq = Equipment::new();
        let err = eq
            .equip(Item::potion("Health Potion", Rarity::Common, 20, 30))
            .unwrap_err();
        assert!(matches!(err, GameError::NotEquippable { name } if name == "Health Potion"));
        assert!(eq.slots().iter().all(|(_, item)| item.is_none()));
    }

    #[test]
    fn unequip_clears_the_bonus() {
        let mut eq = Equipment::new();
        eq.equip(Item::armor("Leather Armor", Rarity::Common, 30, 3))
            .unwrap();
        assert_eq!(eq.defense_bonus(), 3);
        assert!(eq.unequip(EquipSlot::Armor).is_some());
        assert_eq!(eq.defense_bonus(), 0);
        assert!(eq.get(EquipSlot::Armor).is_none());
    }
}
