// src/config.rs
use error::GameError;
use hero::constants::{START_ATTACK, START_DEFENSE, START_HEALTH};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, warn};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "RPG_CONFIG";
/// 未设置环境变量时使用的配置文件
pub const DEFAULT_CONFIG_FILE: &str = "rpg_config.json";

/// 游戏配置；文件中缺失的字段取默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_name: String,
    pub start_health: i32,
    pub start_attack: i32,
    pub start_defense: i32,
    /// 菜单“休息”一次恢复的生命
    pub heal_amount: i32,
    pub save_directory: PathBuf,
    pub save_slots: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: "Hero".to_string(),
            start_health: START_HEALTH,
            start_attack: START_ATTACK,
            start_defense: START_DEFENSE,
            heal_amount: 30,
            save_directory: PathBuf::from("saves"),
            save_slots: 5,
        }
    }
}

impl GameConfig {
    /// 读取 JSON 配置；文件不存在时使用默认配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| GameError::DeserializationError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// 按 `RPG_CONFIG` 指定的路径加载
    pub fn from_env() -> Result<Self, GameError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.start_health <= 0 {
            return Err(GameError::InvalidArgument(format!(
                "start_health must be > 0, got {}",
                self.start_health
            )));
        }
        GameError::ensure_non_negative("start_attack", self.start_attack)?;
        GameError::ensure_non_negative("start_defense", self.start_defense)?;
        GameError::ensure_non_negative("heal_amount", self.heal_amount)?;
        if self.save_slots == 0 {
            return Err(GameError::InvalidArgument("save_slots must be > 0".into()));
        }
        if self.player_name.trim().is_empty() {
            warn!("empty player name in config");
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::SerializationError(e.to_string()))
    }
}
