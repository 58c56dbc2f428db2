// src/hero/src/bag/inventory.rs
use bincode::{Decode, Encode};
use error::GameError;
use items::{Item, ItemCategory};
use serde::{Deserialize, Serialize};

/// 分页显示时每页的物品数
pub const PAGE_SIZE: usize = 5;

/// 背包：有序物品列表，插入顺序即显示顺序，允许同名物品并存
#[derive(Clone, Debug, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

/// 背包中的一页（用于UI渲染）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryPage<'a> {
    /// 从 0 开始的页码
    pub page: usize,
    pub total_pages: usize,
    /// 本页第一个物品在整个背包中的索引
    pub first_index: usize,
    pub items: &'a [Item],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加物品到末尾
    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Result<&Item, GameError> {
        self.items
            .get(index)
            .ok_or_else(|| GameError::out_of_range(index, self.items.len()))
    }

    /// 取出物品，后面的物品依次前移
    pub fn remove(&mut self, index: usize) -> Result<Item, GameError> {
        if index >= self.items.len() {
            return Err(GameError::out_of_range(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    /// 查找物品索引
    pub fn find<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&Item) -> bool,
    {
        self.items.iter().position(predicate)
    }

    /// 按类别统计数量
    pub fn count_of(&self, category: ItemCategory) -> usize {
        self.items.iter().filter(|i| i.category() == category).count()
    }

    /// 获取所有物品
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// 当前物品数量
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 检查是否为空
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 总页数；空背包也算一页
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// 获取指定页
    pub fn page(&self, page: usize) -> Result<InventoryPage<'_>, GameError> {
        let total_pages = self.page_count();
        if page >= total_pages {
            return Err(GameError::out_of_range(page, total_pages));
        }
        let first_index = page * PAGE_SIZE;
        let end = (first_index + PAGE_SIZE).min(self.items.len());
        Ok(InventoryPage {
            page,
            total_pages,
            first_index,
            items: &self.items[first_index..end],
        })
    }
}

impl Extend<Item> for Inventory {
    fn extend<T: IntoIterator<Item = Item>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::Rarity;

    fn potions(n: usize) -> Inventory {
        (0..n)
            .map(|i| Item::potion(format!("Potion #{i}"), Rarity::Common, 10, 10))
            .collect()
    }

    #[test]
    fn duplicates_are_distinct_entries_in_insertion_order() {
        let mut inv = Inventory::new();
        inv.add(Item::potion("Health Potion", Rarity::Common, 20, 30));
        inv.add(Item::weapon("Dagger", Rarity::Common, 10, 2));
        inv.add(Item::potion("Health Potion", Rarity::Common, 20, 30));

        assert_eq!(inv.len(), 3);
        assert_eq!(inv.get(1).unwrap().name, "Dagger");
        assert_eq!(inv.count_of(ItemCategory::Potion), 2);
        assert_eq!(inv.find(|i| i.name == "Health Potion"), Some(0));
    }

    #[test]
    fn out_of_range_access_is_reported() {
        let mut inv = potions(2);
        assert!(matches!(
            inv.get(2),
            Err(GameError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(inv.remove(5).is_err());
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn pages_hold_five_items() {
        let inv = potions(12);
        assert_eq!(inv.page_count(), 3);

        let first = inv.page(0).unwrap();
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.first_index, 0);

        let last = inv.page(2).unwrap();
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.first_index, 10);
        assert_eq!(last.items[0].name, "Potion #10");

        assert!(matches!(
            inv.page(3),
            Err(GameError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn empty_inventory_has_one_empty_page() {
        let inv = Inventory::new();
        let page = inv.page(0).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
