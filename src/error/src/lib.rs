//! 游戏错误处理模块
//!
//! 核心规则层（角色、战斗、任务）与存档层共用的错误类型。所有错误都是可恢复的：
//! 调用方（菜单层）拿到错误后提示玩家重新输入即可，不会中断整个游戏会话。

use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 参数非法（负数数值等）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 索引越界（背包、敌人、任务、地点选择）
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// 物品类别不能装备
    #[error("{name} cannot be equipped")]
    NotEquippable { name: String },

    /// 任务已经完成过
    #[error("Quest '{title}' already completed")]
    AlreadyCompleted { title: String },

    /// 集合为空（没有敌人可战斗）
    #[error("Nothing to select: collection is empty")]
    EmptyCollection,

    /// 状态机处于不允许该操作的状态
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// 存档系统错误
    #[error("Save system error: {0}")]
    SaveError(#[from] anyhow::Error),

    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 反序列化错误
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// 无效的存档槽位
    #[error("Invalid save slot {0}")]
    InvalidSlot(usize),

    /// 存档数据损坏
    #[error("Corrupted save data: {0}")]
    CorruptedSave(String),

    /// 存档版本不兼容
    #[error("Incompatible save version: {0}")]
    VersionMismatch(u32),
}

impl GameError {
    /// 越界错误的便捷构造
    pub fn out_of_range(index: usize, len: usize) -> Self {
        GameError::IndexOutOfRange { index, len }
    }

    /// 负数数值检查，供各个接受数量参数的操作共用
    pub fn ensure_non_negative(what: &str, value: i32) -> Result<i32, GameError> {
        if value < 0 {
            Err(GameError::InvalidArgument(format!(
                "{what} must be >= 0, got {value}"
            )))
        } else {
            Ok(value)
        }
    }

    /// 是否属于玩家输入类错误（菜单层据此决定是否重新提示）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GameError::InvalidArgument(_)
                | GameError::IndexOutOfRange { .. }
                | GameError::NotEquippable { .. }
                | GameError::AlreadyCompleted { .. }
                | GameError::EmptyCollection
        )
    }
}

impl From<DecodeError> for GameError {
    fn from(err: DecodeError) -> Self {
        // 文本字段解码失败通常意味着存档文件被截断或篡改
        if err.to_string().contains("invalid utf-8 sequence") {
            GameError::CorruptedSave(err.to_string())
        } else {
            GameError::DeserializationError(err.to_string())
        }
    }
}

impl From<EncodeError> for GameError {
    fn from(err: EncodeError) -> Self {
        GameError::SerializationError(err.to_string())
    }
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::IndexOutOfRange { index, len } if *len == 0 => {
            format!("Nothing to choose from (selected #{})", index + 1)
        }
        GameError::IndexOutOfRange { index, len } => {
            format!("Invalid choice #{}: pick 1-{}", index + 1, len)
        }
        GameError::EmptyCollection => "No enemies left to fight.".to_string(),
        GameError::AlreadyCompleted { title } => format!("'{title}' is already completed."),
        GameError::CorruptedSave(_) => "Save data is corrupted and cannot be loaded".to_string(),
        GameError::InvalidSlot(slot) => format!("Save slot {slot} does not exist"),
        GameError::VersionMismatch(v) => format!("Save version {v} is not supported"),
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "No saved game found.".to_string(),
            std::io::ErrorKind::PermissionDenied => {
                "Permission denied while accessing the save file".to_string()
            }
            _ => format!("IO error: {}", e),
        },
        _ => error.to_string(),
    }
}
