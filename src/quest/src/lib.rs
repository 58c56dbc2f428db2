//! Quest ledger
//!
//! Quests are plain records with a one-way `completed` flag. The ledger only
//! hands back the reward experience; applying it to a character is the
//! caller's job, so this crate does not depend on `hero`.

pub mod quest;


pub use quest::{Quest, QuestKind};

use error::GameError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Ordered list of quests, addressed by position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct QuestLedger {
    quests: Vec<Quest>,
}

impl QuestLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a quest to the end of the ledger
    pub fn add(&mut self, quest: Quest) {
        self.quests.push(quest);
    }

    /// Reward of the quest at `index`, without completing it
    pub fn reward(&self, index: usize) -> Result<u32, GameError> {
        self.get(index).map(|q| q.reward_exp)
    }

    pub fn get(&self, index: usize) -> Result<&Quest, GameError> {
        self.quests
            .get(index)
            .ok_or_else(|| GameError::out_of_range(index, self.quests.len()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quest> {
        self.quests.iter()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Quests still open, with their ledger index
    pub fn pending(&self) -> Vec<(usize, &Quest)> {
        self.quests
            .iter()
            .enumerate()
            .filter(|(_, q)| !q.is_completed())
            .collect()
    }

    /// Quests already turned in, with their ledger index
    pub fn completed(&self) -> Vec<(usize, &Quest)> {
        self.quests
            .iter()
            .enumerate()
            .filter(|(_, q)| q.is_completed())
            .collect()
    }

    /// Mark a quest as completed and return its reward experience.
    ///
    /// A quest pays out once: completing it again is `AlreadyCompleted`
    /// and the flag stays set.
    pub fn complete(&mut self, index: usize) -> Result<u32, GameError> {
        let len = self.quests.len();
        let quest = self
            .quests
            .get_mut(index)
            .ok_or_else(|| GameError::out_of_range(index, len))?;

        if quest.is_completed() {
            return Err(GameError::AlreadyCompleted {
                title: quest.title.clone(),
            });
        }

        quest.mark_completed();
        info!(quest = %quest.title, reward = quest.reward_exp, "quest completed");
        Ok(quest.reward_exp)
    }

    /// Fraction of quests completed (0.0 to 1.0)
    pub fn completion_ratio(&self) -> f32 {
        if self.quests.is_empty() {
            return 0.0;
        }
        self.completed().len() as f32 / self.quests.len() as f32
    }
}

impl FromIterator<Quest> for QuestLedger {
    fn from_iter<T: IntoIterator<Item = Quest>>(iter: T) -> Self {
        Self {
            quests: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a QuestLedger {
    type Item = &'a Quest;
    type IntoIter = std::slice::Iter<'a, Quest>;

    fn into_iter(self) -> Self::IntoIter {
        self.quests.iter()
    }
}
