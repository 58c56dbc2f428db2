// src/save/src/legacy.rs
//! 旧版纯文本存档：每行一个字段，顺序固定
//!
//! name / health / attack / defense / level / experience
//!
//! 攻击和防御写入的是有效值（含装备加成）；读回时它们成为基础属性。
//! 背包、装备和任务都不在这个格式里。

use anyhow::Context;
use error::GameError;
use hero::Character;
use std::{fs, path::Path};
use tracing::info;

const FIELD_NAMES: [&str; 6] = ["name", "health", "attack", "defense", "level", "experience"];

/// 序列化为六行文本
pub fn to_legacy_string(character: &Character) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        character.name(),
        character.health(),
        character.effective_attack(),
        character.effective_defense(),
        character.level(),
        character.experience()
    )
}

/// 从六行文本恢复角色。最大生命取读到的生命与 `default_health` 中的较大者
pub fn parse_legacy(text: &str, default_health: i32) -> Result<Character, GameError> {
    let mut lines = text.lines();
    let mut next = |field: usize| {
        lines
            .next()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .ok_or_else(|| GameError::CorruptedSave(format!("missing {} line", FIELD_NAMES[field])))
    };

    let name = next(0)?.to_string();
    if name.is_empty() {
        return Err(GameError::CorruptedSave("empty name".into()));
    }
    let health: i32 = parse_field(next(1)?, 1)?;
    let attack: i32 = parse_field(next(2)?, 2)?;
    let defense: i32 = parse_field(next(3)?, 3)?;
    let level: u32 = parse_field(next(4)?, 4)?;
    let experience: u32 = parse_field(next(5)?, 5)?;

    Character::restore(
        name,
        health,
        health.max(default_health),
        attack,
        defense,
        level,
        experience,
    )
    .map_err(|e| GameError::CorruptedSave(e.to_string()))
}

fn parse_field<T: std::str::FromStr>(raw: &str, field: usize) -> Result<T, GameError> {
    raw.trim().parse().map_err(|_| {
        GameError::CorruptedSave(format!("bad {} value '{}'", FIELD_NAMES[field], raw))
    })
}

/// 导出旧格式存档（先写临时文件再重命名）
pub fn export_legacy(character: &Character, path: impl AsRef<Path>) -> Result<(), GameError> {
    let path = path.as_ref();
    if character.name().contains(['\n', '\r']) {
        return Err(GameError::InvalidArgument(format!(
            "name {:?} cannot be stored one field per line",
            character.name()
        )));
    }
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, to_legacy_string(character))
        .context("Failed to write legacy save")?;
    fs::rename(&temp_path, path).context("Failed to commit legacy save")?;
    info!(?path, player = %character.name(), "legacy save exported");
    Ok(())
}

/// 导入旧格式存档；文件不存在时返回 `IoError(NotFound)`
pub fn import_legacy(path: impl AsRef<Path>, default_health: i32) -> Result<Character, GameError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let character = parse_legacy(&text, default_health)?;
    info!(?path, player = %character.name(), "legacy save imported");
    Ok(character)
}
