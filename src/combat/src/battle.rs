//! Battle engine: turn-based combat between one player and one enemy
use bincode::{Decode, Encode};
use error::GameError;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::{debug, info, warn};

use crate::constants::SKILL_ROUND;
use crate::skill::{self, SkillOutcome};
use crate::{Combatant, Enemy, Looter};

/// Battle state machine
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, Serialize, Deserialize)]
pub enum BattleState {
    #[default]
    Idle,
    InCombat,
    Victory,
    Defeat,
}

impl BattleState {
    pub fn is_finished(self) -> bool {
        matches!(self, BattleState::Victory | BattleState::Defeat)
    }
}

/// Which side acted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// A single thing that happened during a round
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub enum BattleEvent {
    Attack { by: Side, damage: i32 },
    Skill { by: Side, outcome: SkillOutcome },
    EnemyDefeated { loot: Vec<String> },
    PlayerDefeated,
}

/// Result of one round
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub events: Vec<BattleEvent>,
    pub state: BattleState,
}

/// Result of a whole engagement, for the caller to render
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct BattleReport {
    pub enemy_name: String,
    pub outcome: BattleState,
    pub rounds: u32,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub loot: Vec<String>,
    pub exp_reward: u32,
    pub log: Vec<RoundReport>,
}

/// Drives combat rounds and owns the battle state
#[derive(Debug, Clone, Default)]
pub struct BattleEngine {
    state: BattleState,
    round: u32,
}

impl BattleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Rounds fought in the current (or last) engagement
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Return to Idle after a finished battle
    pub fn reset(&mut self) {
        self.state = BattleState::Idle;
        self.round = 0;
    }

    /// Enter combat. Allowed from Idle or from a finished battle.
    pub fn begin(&mut self) -> Result<(), GameError> {
        match self.state {
            BattleState::InCombat => Err(GameError::InvalidState(
                "a battle is already in progress".to_string(),
            )),
            _ => {
                self.state = BattleState::InCombat;
                self.round = 0;
                Ok(())
            }
        }
    }

    /// Fight the enemy at `index` to the end.
    ///
    /// On victory the enemy's loot moves into the player's bag and the enemy is
    /// removed from `enemies`. On defeat nothing moves and the player stays at 0 hp.
    /// Quest completion is never triggered from here.
    pub fn engage<P: Looter>(
        &mut self,
        player: &mut P,
        enemies: &mut Vec<Enemy>,
        index: usize,
    ) -> Result<BattleReport, GameError> {
        if enemies.is_empty() {
            return Err(GameError::EmptyCollection);
        }
        if index >= enemies.len() {
            return Err(GameError::out_of_range(index, enemies.len()));
        }

        self.begin()?;
        let enemy = &mut enemies[index];
        info!(player = player.name(), enemy = enemy.name(), "battle started");

        let mut report = BattleReport {
            enemy_name: enemy.name().to_string(),
            outcome: BattleState::InCombat,
            rounds: 0,
            damage_dealt: 0,
            damage_taken: 0,
            loot: Vec::new(),
            exp_reward: enemy.exp_reward(),
            log: Vec::new(),
        };

        while self.state == BattleState::InCombat {
            let round = self.step(player, enemy)?;
            for event in &round.events {
                match event {
                    BattleEvent::Attack { by: Side::Player, damage }
                    | BattleEvent::Skill {
                        by: Side::Player,
                        outcome: SkillOutcome::Damage { amount: damage, .. },
                    } => report.damage_dealt += damage,
                    BattleEvent::Attack { by: Side::Enemy, damage }
                    | BattleEvent::Skill {
                        by: Side::Enemy,
                        outcome: SkillOutcome::Damage { amount: damage, .. },
                    } => report.damage_taken += damage,
                    BattleEvent::EnemyDefeated { loot } => report.loot = loot.clone(),
                    _ => {}
                }
            }
            report.log.push(round);
        }

        report.outcome = self.state;
        report.rounds = self.round;
        if self.state == BattleState::Victory {
            enemies.remove(index);
        }
        info!(
            outcome = %report.outcome,
            rounds = report.rounds,
            dealt = report.damage_dealt,
            taken = report.damage_taken,
            "battle finished"
        );
        Ok(report)
    }

    /// Run exactly one round: the player always acts before the enemy.
    pub fn step<P: Looter>(
        &mut self,
        player: &mut P,
        enemy: &mut Enemy,
    ) -> Result<RoundReport, GameError> {
        if self.state != BattleState::InCombat {
            return Err(GameError::InvalidState(format!(
                "cannot fight a round while {}",
                self.state
            )));
        }
        self.round += 1;
        let mut events = Vec::new();

        // Player turn
        let dealt = enemy.take_damage(player.attack_power())?;
        events.push(BattleEvent::Attack {
            by: Side::Player,
            damage: dealt,
        });
        let mut player_skill_damage = 0;
        if self.round == SKILL_ROUND && enemy.is_alive() {
            if let Some(active) = player.active_skill() {
                let outcome = skill::cast(active, player, enemy)?;
                if let SkillOutcome::Damage { amount, .. } = outcome {
                    player_skill_damage = amount;
                }
                events.push(BattleEvent::Skill {
                    by: Side::Player,
                    outcome,
                });
            }
        }

        if !enemy.is_alive() {
            let loot = enemy.drop_loot(player.loot_bag());
            events.push(BattleEvent::EnemyDefeated { loot });
            return Ok(self.finish(BattleState::Victory, events));
        }

        // Enemy turn
        let taken = enemy.attack(player)?;
        events.push(BattleEvent::Attack {
            by: Side::Enemy,
            damage: taken,
        });
        let mut enemy_skill_damage = 0;
        if self.round == SKILL_ROUND && player.is_alive() {
            for outcome in enemy.use_ability(player)? {
                if let SkillOutcome::Damage { amount, .. } = outcome {
                    enemy_skill_damage += amount;
                }
                events.push(BattleEvent::Skill {
                    by: Side::Enemy,
                    outcome,
                });
            }
        }

        if !player.is_alive() {
            events.push(BattleEvent::PlayerDefeated);
            return Ok(self.finish(BattleState::Defeat, events));
        }

        debug!(
            round = self.round,
            dealt,
            taken,
            player_hp = player.hp(),
            enemy_hp = enemy.hp(),
            "round complete"
        );

        // Past the skill round every round repeats identically: a round without
        // damage on either side would loop forever, while any damage at all
        // brings one side to 0 eventually.
        let harmless = dealt + player_skill_damage + taken + enemy_skill_damage == 0;
        if self.round > SKILL_ROUND && harmless {
            warn!(round = self.round, "stalemate, leaving combat");
            self.reset();
            return Err(GameError::InvalidState(format!(
                "stalemate: neither {} nor {} can be hurt",
                player.name(),
                enemy.name()
            )));
        }

        Ok(RoundReport {
            round: self.round,
            events,
            state: self.state,
        })
    }

    fn finish(&mut self, state: BattleState, events: Vec<BattleEvent>) -> RoundReport {
        self.state = state;
        RoundReport {
            round: self.round,
            events,
            state,
        }
    }
}
