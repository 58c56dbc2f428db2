//! Shared setup for integration tests: games whose saves land in a temp dir.

#![allow(dead_code)]

use hero::Character;
use quest::QuestLedger;
use tempfile::TempDir;
use terminal_rpg::{Game, GameConfig};
use world::World;

/// A config pointing at a fresh temporary save directory.
/// Keep the returned `TempDir` alive for as long as the game is used.
pub fn temp_config() -> (GameConfig, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = GameConfig {
        save_directory: dir.path().to_path_buf(),
        ..GameConfig::default()
    };
    (config, dir)
}

/// A new game with the default starter content
pub fn new_game() -> (Game, TempDir) {
    let (config, dir) = temp_config();
    (Game::new(config).expect("start game"), dir)
}

/// A game with a custom character, quest ledger and world
pub fn game_with(character: Character, quests: QuestLedger, world: World) -> (Game, TempDir) {
    let (config, dir) = temp_config();
    let game = Game::with_state(config, character, quests, world).expect("start game");
    (game, dir)
}
