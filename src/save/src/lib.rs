// src/save/src/lib.rs

use anyhow::Context;
use bincode::{Decode, Encode, config};
use error::GameError;
use hero::Character;
use hero::constants::EXP_PER_LEVEL;
use quest::QuestLedger;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::SystemTime,
};
use tracing::{debug, info, warn};
use world::World;

pub mod legacy;

/// 存档元数据
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub timestamp: SystemTime,
    pub player_name: String,
    /// v1 存档没有记录等级（为 0），迁移时从角色数据补上
    #[serde(default)]
    pub level: u32,
    pub location: String,
}

impl SaveMetadata {
    pub fn describe(character: &Character, world: &World) -> Self {
        Self {
            timestamp: SystemTime::now(),
            player_name: character.name().to_string(),
            level: character.level(),
            location: world.current().name.clone(),
        }
    }
}

/// 存档数据(包含游戏完整状态)
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default = "default_version")]
    pub version: u32,
    pub metadata: SaveMetadata,
    /// 角色（包含背包与装备）
    pub character: Character,
    pub quests: QuestLedger,
    pub world: World,
}

/// Current save format version
pub const SAVE_VERSION: u32 = 2;

fn default_version() -> u32 {
    1
}

/// 加载结果：空槽位不是错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded(Box<SaveData>),
    NoSave,
}

impl SaveData {
    pub fn new(character: Character, quests: QuestLedger, world: World) -> Self {
        Self {
            version: SAVE_VERSION,
            metadata: SaveMetadata::describe(&character, &world),
            character,
            quests,
            world,
        }
    }

    /// Migrate older save data to the current version
    pub fn migrate(&mut self) -> Result<(), GameError> {
        match self.version {
            SAVE_VERSION => {}
            1 => {
                self.metadata.level = self.character.level();
                self.version = SAVE_VERSION;
                debug!("save migrated from v1");
            }
            other => return Err(GameError::VersionMismatch(other)),
        }
        Ok(())
    }

    /// Validate save data integrity
    pub fn validate(&self) -> Result<(), GameError> {
        let c = &self.character;
        if c.max_health() <= 0 {
            return Err(GameError::CorruptedSave(format!(
                "max health {} must be positive",
                c.max_health()
            )));
        }
        if c.health() < 0 || c.health() > c.max_health() {
            return Err(GameError::CorruptedSave(format!(
                "health {} outside 0..={}",
                c.health(),
                c.max_health()
            )));
        }
        if c.level() == 0 || c.experience() >= EXP_PER_LEVEL {
            return Err(GameError::CorruptedSave(format!(
                "level {} / experience {} is not a valid progression",
                c.level(),
                c.experience()
            )));
        }
        self.world.validate()
    }
}

/// 存档系统
#[derive(Debug, Clone)]
pub struct SaveSystem {
    save_dir: PathBuf,
    max_slots: usize,
}

impl SaveSystem {
    /// 初始化存档系统
    pub fn new(save_dir: impl AsRef<Path>, max_slots: usize) -> Result<Self, GameError> {
        let save_dir = save_dir.as_ref();

        // 创建存档目录(如果不存在)
        if !save_dir.exists() {
            fs::create_dir_all(save_dir).context("Failed to create save directory")?;
        }

        Ok(Self {
            save_dir: save_dir.to_path_buf(),
            max_slots,
        })
    }

    /// 获取所有存档列表(按时间倒序)；无法读取的文件会被跳过
    pub fn list_saves(&self) -> Result<Vec<(usize, SaveMetadata)>, GameError> {
        let mut saves = Vec::new();

        for slot in 0..self.max_slots {
            let path = self.slot_path(slot);
            if !path.is_file() {
                continue;
            }
            match Self::read_file(&path) {
                Ok(data) => saves.push((slot, data.metadata)),
                Err(e) => warn!(?path, error = %e, "skipping unreadable save"),
            }
        }

        // 按时间戳排序(最新的在前)
        saves.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));

        Ok(saves)
    }

    /// 保存游戏状态
    pub fn save_game(&self, slot: usize, data: &SaveData) -> Result<(), GameError> {
        let path = self.save_path(slot)?;

        // 创建临时文件
        let temp_path = path.with_extension("tmp");
        let mut file =
            fs::File::create(&temp_path).context("Failed to create temporary save file")?;

        // 序列化数据
        bincode::encode_into_std_write(data, &mut file, config::standard())?;

        // 确保数据写入磁盘
        file.flush().context("Failed to flush save data")?;

        // 原子性重命名
        fs::rename(&temp_path, &path).context("Failed to commit save file")?;

        info!(slot, player = %data.metadata.player_name, "game saved");
        Ok(())
    }

    /// 加载游戏状态
    pub fn load_game(&self, slot: usize) -> Result<LoadStatus, GameError> {
        let path = self.save_path(slot)?;
        if !path.exists() {
            debug!(slot, "no save in slot");
            return Ok(LoadStatus::NoSave);
        }

        let mut data = Self::read_file(&path)?;

        // Migrate older saves to current version
        data.migrate()?;

        // Validate save data integrity
        data.validate()?;

        info!(slot, player = %data.metadata.player_name, "game loaded");
        Ok(LoadStatus::Loaded(Box::new(data)))
    }

    fn read_file(path: &Path) -> Result<SaveData, GameError> {
        let mut file = fs::File::open(path)?;
        let data: SaveData = bincode::decode_from_std_read(&mut file, config::standard())?;
        Ok(data)
    }

    /// 删除存档
    pub fn delete_save(&self, slot: usize) -> Result<(), GameError> {
        let path = self.save_path(slot)?;

        if path.exists() {
            fs::remove_file(path).context("Failed to delete save file")?;
        }

        Ok(())
    }

    /// 获取存档目录路径
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// 检查指定槽位是否有存档
    pub fn has_save(&self, slot: usize) -> bool {
        self.save_path(slot).is_ok_and(|path| path.exists())
    }

    /// 获取存档文件路径
    pub fn save_path(&self, slot: usize) -> Result<PathBuf, GameError> {
        if slot >= self.max_slots {
            return Err(GameError::InvalidSlot(slot));
        }
        Ok(self.slot_path(slot))
    }

    fn slot_path(&self, slot: usize) -> PathBuf {
        self.save_dir.join(format!("save_{}.sav", slot))
    }
}
