//! Save slots and the legacy text format, driven through the `Game` facade.

mod helpers;

use error::GameError;
use items::Skill;
use pretty_assertions::assert_eq;
use terminal_rpg::Game;

use helpers::{new_game, temp_config};

#[test]
fn full_save_restores_inventory_equipment_and_quests() {
    let (mut game, _dir) = new_game();
    game.pick_up(0).expect("sword");
    game.equip_item(0).expect("equip");
    game.select_and_fight(0).expect("goblin");
    game.complete_quest(2).expect("side quest");
    game.travel(2).expect("ruins");
    game.pick_up(0).expect("renewal scroll");

    let before = game.display_stats();
    let meta = game.save(1).expect("save");
    assert_eq!(meta.location, "Ancient Ruins");

    // mess up the live game, then load over it
    game.travel(0).expect("back home");
    game.use_item(1).expect("read scroll");
    game.select_and_fight(0).expect("troll");

    let loaded = game.load(1).expect("load").expect("slot 1 has a save");
    assert_eq!(loaded.player_name, "Hero");
    assert_eq!(game.display_stats(), before);
    assert_eq!(game.current_location().name, "Ancient Ruins");
    assert!(game.list_quests().get(2).expect("quest").is_completed());
    assert!(!game.list_quests().get(0).expect("quest").is_completed());
    assert_eq!(game.list_locations()[0].enemies.len(), 1);

    let names: Vec<&str> = game
        .character()
        .inventory()
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["Health Potion", "Scroll of Renewal"]);
    assert_eq!(
        game.character().inventory().get(1).expect("scroll").skill(),
        Some(Skill::Rejuvenate)
    );
}

#[test]
fn loading_an_empty_slot_keeps_the_current_game() {
    let (mut game, _dir) = new_game();
    game.pick_up(0).expect("sword");

    assert_eq!(game.load(3).expect("load"), None);
    assert_eq!(game.character().inventory().len(), 1);
    assert!(matches!(game.load(99), Err(GameError::InvalidSlot(99))));
}

#[test]
fn saves_survive_a_new_session() {
    let (config, _dir) = temp_config();
    {
        let mut game = Game::new(config.clone()).expect("first session");
        game.complete_quest(0).expect("quest");
        game.save(0).expect("save");
    }

    let mut game = Game::new(config).expect("second session");
    assert_eq!(game.display_stats().level, 1);
    game.load(0).expect("load").expect("save exists");
    assert_eq!(game.display_stats().level, 2);
    assert_eq!(game.list_saves().expect("list").len(), 1);
}

#[test]
fn legacy_export_import_round_trips_six_fields() {
    let (mut game, dir) = new_game();
    game.pick_up(0).expect("sword");
    game.equip_item(0).expect("equip");
    game.complete_quest(2).expect("quest");
    game.select_and_fight(0).expect("goblin");

    let path = dir.path().join("legacy.txt");
    game.export_legacy(&path).expect("export");
    let text = std::fs::read_to_string(&path).expect("read");
    let before = game.display_stats();
    assert_eq!(
        text,
        format!(
            "Hero\n{}\n25\n5\n1\n40\n",
            before.health
        )
    );

    let (mut fresh, _fresh_dir) = new_game();
    let stats = fresh.import_legacy(&path).expect("import");
    assert_eq!(stats.name, "Hero");
    assert_eq!(stats.health, before.health);
    assert_eq!(stats.max_health, 100);
    assert_eq!(stats.attack, 25);
    assert_eq!(stats.defense, 5);
    assert_eq!((stats.level, stats.experience), (1, 40));
    // the flat format carries no gear
    assert_eq!(stats.weapon, None);
    assert_eq!(stats.inventory_size, 0);
}

#[test]
fn importing_a_missing_legacy_file_reports_no_save() {
    let (mut game, dir) = new_game();
    let err = game
        .import_legacy(dir.path().join("nope.txt"))
        .expect_err("missing file");
    assert_eq!(error::handle_error(&err), "No saved game found.");
    assert_eq!(game.display_stats().name, "Hero");
}
