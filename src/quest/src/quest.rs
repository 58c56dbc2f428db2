//! Quest definitions

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Story quests versus optional errands
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub enum QuestKind {
    Main,
    Side,
}

/// A single quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Quest {
    pub title: String,
    pub description: String,
    pub kind: QuestKind,
    pub reward_exp: u32,
    /// Only ever flips from false to true, through `QuestLedger::complete`
    completed: bool,
}

impl Quest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        kind: QuestKind,
        reward_exp: u32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
            reward_exp,
            completed: false,
        }
    }

    pub fn main(title: impl Into<String>, description: impl Into<String>, reward_exp: u32) -> Self {
        Self::new(title, description, QuestKind::Main, reward_exp)
    }

    pub fn side(title: impl Into<String>, description: impl Into<String>, reward_exp: u32) -> Self {
        Self::new(title, description, QuestKind::Side, reward_exp)
    }
}

impl Quest {
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
    }
}

impl std::fmt::Display for Quest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(
            f,
            "[{mark}] {} ({}, {} EXP): {}",
            self.title, self.kind, self.reward_exp, self.description
        )
    }
}
