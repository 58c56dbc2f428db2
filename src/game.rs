// src/game.rs
//! 游戏外观：菜单层调用的全部操作。每个操作返回结构化数据，文本格式化由调用方负责

use std::path::Path;

use combat::{BattleEngine, BattleReport, BattleState, Enemy};
use error::GameError;
use hero::{Character, CharacterStats, InventoryPage, ItemEffect, LevelUp};
use quest::QuestLedger;
use save::{LoadStatus, SaveData, SaveMetadata, SaveSystem, legacy};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use world::{Location, World};

use crate::config::GameConfig;

/// 完成任务后发放的奖励
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestReward {
    pub exp: u32,
    pub level_up: LevelUp,
}

/// 一局游戏的全部状态
pub struct Game {
    config: GameConfig,
    character: Character,
    quests: QuestLedger,
    world: World,
    engine: BattleEngine,
    saves: SaveSystem,
}

impl Game {
    /// 按配置开始新游戏（默认开局世界与任务）
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let character = Character::new(
            config.player_name.clone(),
            config.start_health,
            config.start_attack,
            config.start_defense,
        );
        Self::with_state(config, character, world::starter_quests(), world::starter_world())
    }

    /// 以指定状态开始（测试与自定义开局）
    pub fn with_state(
        config: GameConfig,
        character: Character,
        quests: QuestLedger,
        world: World,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let saves = SaveSystem::new(&config.save_directory, config.save_slots)?;
        Ok(Self {
            config,
            character,
            quests,
            world,
            engine: BattleEngine::new(),
            saves,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn quests(&self) -> &QuestLedger {
        &self.quests
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn battle_state(&self) -> BattleState {
        self.engine.state()
    }

    pub fn is_over(&self) -> bool {
        !self.character.is_alive()
    }

    pub fn display_stats(&self) -> CharacterStats {
        self.character.stats()
    }

    /// 背包分页，页码从 0 开始
    pub fn show_inventory(&self, page: usize) -> Result<InventoryPage<'_>, GameError> {
        self.character.inventory().page(page)
    }

    /// 当前地点的敌人
    pub fn list_enemies(&self) -> &[Enemy] {
        &self.world.current().enemies
    }

    /// 与当前地点的第 `index` 个敌人战斗直到分出胜负
    pub fn select_and_fight(&mut self, index: usize) -> Result<BattleReport, GameError> {
        if self.is_over() {
            return Err(GameError::InvalidState(format!(
                "{} has fallen and cannot fight",
                self.character.name()
            )));
        }
        if self.engine.state().is_finished() {
            self.engine.reset();
        }

        let enemies = &mut self.world.current_mut().enemies;
        let report = self.engine.engage(&mut self.character, enemies, index)?;
        if report.outcome == BattleState::Defeat {
            warn!(player = %self.character.name(), enemy = %report.enemy_name, "player defeated");
        }
        Ok(report)
    }

    /// 休息：恢复配置的生命值，返回实际恢复量
    pub fn heal(&mut self) -> Result<i32, GameError> {
        self.character.heal(self.config.heal_amount)
    }

    pub fn equip_item(&mut self, index: usize) -> Result<ItemEffect, GameError> {
        self.character.equip_item(index)
    }

    pub fn use_item(&mut self, index: usize) -> Result<ItemEffect, GameError> {
        self.character.use_item(index)
    }

    /// 完成任务并把奖励经验加给角色；同一任务只发放一次
    pub fn complete_quest(&mut self, index: usize) -> Result<QuestReward, GameError> {
        // 先校验奖励，失败时任务保持未完成
        let reward = self.quests.reward(index)?;
        let exp = i32::try_from(reward).map_err(|_| {
            GameError::InvalidArgument(format!("quest reward {reward} is too large"))
        })?;

        self.quests.complete(index)?;
        let level_up = self.character.gain_experience(exp)?;
        Ok(QuestReward {
            exp: reward,
            level_up,
        })
    }

    pub fn list_quests(&self) -> &QuestLedger {
        &self.quests
    }

    pub fn list_locations(&self) -> &[Location] {
        &self.world.locations
    }

    pub fn current_location(&self) -> &Location {
        self.world.current()
    }

    pub fn travel(&mut self, index: usize) -> Result<&Location, GameError> {
        self.world.travel(index)
    }

    /// 拾起当前地点的物品，返回物品名
    pub fn pick_up(&mut self, index: usize) -> Result<String, GameError> {
        let item = self.world.take_item(index)?;
        let name = item.name.clone();
        self.character.add_item(item);
        Ok(name)
    }

    /// 保存完整状态到槽位
    pub fn save(&self, slot: usize) -> Result<SaveMetadata, GameError> {
        let data = SaveData::new(
            self.character.clone(),
            self.quests.clone(),
            self.world.clone(),
        );
        self.saves.save_game(slot, &data)?;
        Ok(data.metadata)
    }

    /// 从槽位读取；空槽位返回 `None`，当前游戏保持不变
    pub fn load(&mut self, slot: usize) -> Result<Option<SaveMetadata>, GameError> {
        match self.saves.load_game(slot)? {
            LoadStatus::NoSave => Ok(None),
            LoadStatus::Loaded(data) => {
                let SaveData {
                    metadata,
                    character,
                    quests,
                    world,
                    ..
                } = *data;
                self.character = character;
                self.quests = quests;
                self.world = world;
                self.engine.reset();
                Ok(Some(metadata))
            }
        }
    }

    pub fn list_saves(&self) -> Result<Vec<(usize, SaveMetadata)>, GameError> {
        self.saves.list_saves()
    }

    /// 导出旧格式存档（只有六个角色字段）
    pub fn export_legacy(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        legacy::export_legacy(&self.character, path)
    }

    /// 导入旧格式存档：替换角色，世界与任务保持不变
    pub fn import_legacy(&mut self, path: impl AsRef<Path>) -> Result<CharacterStats, GameError> {
        let character = legacy::import_legacy(path, self.config.start_health)?;
        info!(player = %character.name(), "character replaced from legacy save");
        self.character = character;
        self.engine.reset();
        Ok(self.character.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn game() -> (Game, TempDir) {
        let dir = tempdir().unwrap();
        let config = GameConfig {
            save_directory: dir.path().to_path_buf(),
            ..GameConfig::default()
        };
        (Game::new(config).unwrap(), dir)
    }

    #[test]
    fn new_game_uses_config_stats() {
        let (game, _dir) = game();
        let stats = game.display_stats();
        assert_eq!(stats.name, "Hero");
        assert_eq!((stats.health, stats.attack, stats.defense), (100, 20, 5));
        assert_eq!(game.list_enemies().len(), 2);
        assert_eq!(game.battle_state(), BattleState::Idle);
    }

    #[test]
    fn pick_up_moves_item_into_inventory() {
        let (mut game, _dir) = game();
        assert_eq!(game.pick_up(0).unwrap(), "Iron Sword");
        assert!(game.current_location().items.is_empty());
        assert_eq!(game.show_inventory(0).unwrap().items.len(), 1);
        assert!(game.pick_up(0).is_err());

        game.equip_item(0).unwrap();
        assert_eq!(game.display_stats().attack, 25);
        assert_eq!(game.display_stats().weapon.as_deref(), Some("Iron Sword"));
    }

    #[test]
    fn fallen_character_cannot_fight() {
        let dir = tempdir().unwrap();
        let config = GameConfig {
            save_directory: dir.path().to_path_buf(),
            ..GameConfig::default()
        };
        let weakling = Character::new("Weakling", 10, 1, 0);
        let world = World::new(vec![
            Location::new("Pit", "").with_enemies([
                Enemy::new("Troll", 120, 15),
                Enemy::new("Goblin", 50, 10),
            ]),
        ])
        .unwrap();
        let mut game = Game::with_state(config, weakling, QuestLedger::new(), world).unwrap();

        let report = game.select_and_fight(0).unwrap();
        assert_eq!(report.outcome, BattleState::Defeat);
        assert!(game.is_over());
        assert!(matches!(
            game.select_and_fight(1),
            Err(GameError::InvalidState(_))
        ));
        assert_eq!(game.list_enemies().len(), 2);
    }

    #[test]
    fn oversized_quest_reward_leaves_the_quest_open() {
        let dir = tempdir().unwrap();
        let config = GameConfig {
            save_directory: dir.path().to_path_buf(),
            ..GameConfig::default()
        };
        let quests: QuestLedger = [
            quest::Quest::main("Huge", "", 3_000_000_000),
            quest::Quest::side("Fair", "", 150),
        ]
        .into_iter()
        .collect();
        let hero = Character::with_defaults("Aria");
        let mut game = Game::with_state(config, hero, quests, world::starter_world()).unwrap();

        assert!(matches!(
            game.complete_quest(0),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(!game.list_quests().get(0).unwrap().is_completed());
        assert_eq!(game.display_stats().level, 1);

        let reward = game.complete_quest(1).unwrap();
        assert_eq!(reward.exp, 150);
        assert_eq!(reward.level_up.level, 2);
        assert!(matches!(
            game.complete_quest(1),
            Err(GameError::AlreadyCompleted { .. })
        ));
        assert_eq!(game.display_stats().experience, 50);
    }

    #[test]
    fn heal_uses_configured_amount() {
        let (mut game, _dir) = game();
        game.character.take_damage(45).unwrap();
        assert_eq!(game.heal().unwrap(), 30);
        assert_eq!(game.heal().unwrap(), 10);
        assert_eq!(game.display_stats().health, 100);
    }

    #[test]
    fn potion_from_loot_can_be_used() {
        let (mut game, _dir) = game();
        let report = game.select_and_fight(0).unwrap();
        assert_eq!(report.outcome, BattleState::Victory);
        assert_eq!(report.loot, vec!["Health Potion"]);

        let index = game
            .character()
            .inventory()
            .find(|i| i.name == "Health Potion")
            .unwrap();
        assert!(matches!(
            game.use_item(index).unwrap(),
            ItemEffect::Healed { .. }
        ));
    }
}
