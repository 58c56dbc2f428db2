//src/items/src/lib.rs
//! 物品目录
//!
//! 物品是纯数据：创建于世界初始化阶段，之后只会在 地点/战利品表 → 背包 → 装备栏
//! 之间整体移动，任何时刻只有一个拥有者。

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter};

pub use crate::armor::Armor;
pub use crate::material::{Material, MaterialKind};
pub use crate::potion::Potion;
pub use crate::scroll::{Scroll, Skill};
pub use crate::weapon::Weapon;

pub mod armor;
pub mod material;
pub mod potion;
pub mod scroll;
pub mod weapon;

/// 基础物品结构
#[derive(PartialEq, Eq, Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub rarity: Rarity,
    pub value: u32, // 基础价值
    pub kind: ItemKind,
}

/// 物品类型枚举，每个类别携带自己的效果数据
#[derive(PartialEq, Eq, Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon(Weapon),     // 武器：攻击加成
    Armor(Armor),       // 护甲：防御加成
    Potion(Potion),     // 药水：治疗量
    Scroll(Scroll),     // 卷轴：技能
    Material(Material), // 材料/陷阱/神器
}

/// 物品分类
#[derive(
    Debug,
    Display,
    EnumIter,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    Serialize,
    Deserialize,
)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Potion,
    Scroll,
    Material,
}

/// 稀有度
#[derive(
    Debug,
    Display,
    EnumIter,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    Serialize,
    Deserialize,
)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// 装备位
#[derive(
    Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize,
)]
pub enum EquipSlot {
    #[strum(serialize = "Weapon")]
    Weapon,
    #[strum(serialize = "Armor")]
    Armor,
    #[strum(serialize = "Skill")]
    Skill,
}

impl Item {
    pub fn new(name: impl Into<String>, rarity: Rarity, value: u32, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            rarity,
            value,
            kind,
        }
    }

    /// 武器
    pub fn weapon(name: impl Into<String>, rarity: Rarity, value: u32, attack_power: i32) -> Self {
        Self::new(name, rarity, value, ItemKind::Weapon(Weapon::new(attack_power)))
    }

    /// 护甲
    pub fn armor(name: impl Into<String>, rarity: Rarity, value: u32, defense: i32) -> Self {
        Self::new(name, rarity, value, ItemKind::Armor(Armor::new(defense)))
    }

    /// 药水
    pub fn potion(name: impl Into<String>, rarity: Rarity, value: u32, heal_amount: i32) -> Self {
        Self::new(name, rarity, value, ItemKind::Potion(Potion::new(heal_amount)))
    }

    /// 卷轴
    pub fn scroll(name: impl Into<String>, rarity: Rarity, value: u32, skill: Skill) -> Self {
        Self::new(name, rarity, value, ItemKind::Scroll(Scroll::new(skill)))
    }

    /// 材料、陷阱、神器
    pub fn material(name: impl Into<String>, rarity: Rarity, value: u32, kind: MaterialKind) -> Self {
        Self::new(name, rarity, value, ItemKind::Material(Material::new(kind)))
    }

    pub fn category(&self) -> ItemCategory {
        match &self.kind {
            ItemKind::Weapon(_) => ItemCategory::Weapon,
            ItemKind::Armor(_) => ItemCategory::Armor,
            ItemKind::Potion(_) => ItemCategory::Potion,
            ItemKind::Scroll(_) => ItemCategory::Scroll,
            ItemKind::Material(_) => ItemCategory::Material,
        }
    }

    /// 该物品能装备到哪个槽位；药水与材料不可装备
    pub fn equip_slot(&self) -> Option<EquipSlot> {
        match &self.kind {
            ItemKind::Weapon(_) => Some(EquipSlot::Weapon),
            ItemKind::Armor(_) => Some(EquipSlot::Armor),
            ItemKind::Scroll(_) => Some(EquipSlot::Skill),
            ItemKind::Potion(_) | ItemKind::Material(_) => None,
        }
    }

    /// 使用后是否被消耗
    pub fn is_consumable(&self) -> bool {
        matches!(&self.kind, ItemKind::Potion(_) | ItemKind::Scroll(_))
    }

    /// 装备后提供的攻击加成
    pub fn attack_bonus(&self) -> i32 {
        match &self.kind {
            ItemKind::Weapon(w) => w.attack_power,
            _ => 0,
        }
    }

    /// 装备后提供的防御加成
    pub fn defense_bonus(&self) -> i32 {
        match &self.kind {
            ItemKind::Armor(a) => a.defense,
            _ => 0,
        }
    }

    /// 卷轴携带的技能
    pub fn skill(&self) -> Option<Skill> {
        match &self.kind {
            ItemKind::Scroll(s) => Some(s.skill),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Value: {}", self.name, self.value)?;
        match &self.kind {
            ItemKind::Weapon(w) => write!(f, ", {w}")?,
            ItemKind::Armor(a) => write!(f, ", {a}")?,
            ItemKind::Potion(p) => write!(f, ", {p}")?,
            ItemKind::Scroll(s) => write!(f, ", {s}")?,
            ItemKind::Material(m) => write!(f, ", {m}")?,
        }
        if self.rarity != Rarity::Common {
            write!(f, ", {}", self.rarity)?;
        }
        write!(f, ")")
    }
}
