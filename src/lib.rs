//! 文字冒险 RPG 引擎
//!
//! 规则层分布在各个子 crate 中；这里提供配置与 `Game` 外观，菜单层只通过它调用核心操作。

pub mod config;
pub mod game;

pub use config::GameConfig;
pub use game::{Game, QuestReward};
