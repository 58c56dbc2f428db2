// src/main.rs
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use combat::{BattleEvent, BattleReport, BattleState, Combatant, Side, SkillOutcome};
use error::{GameError, handle_error};
use hero::ItemEffect;
use terminal_rpg::{Game, GameConfig};

/// 旧格式存档的默认文件名
const LEGACY_FILE: &str = "savegame.txt";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::from_env().context("Failed to load game config")?;
    let mut game = Game::new(config).context("Failed to start a new game")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("{}", "Welcome to the adventure!".bold().cyan());
    loop {
        print_menu();
        let line = prompt(&mut input, "Choose an option: ").context("Failed to read input")?;
        let Some(choice) = line else {
            break;
        };

        let outcome = match choice.as_str() {
            "1" => {
                print_stats(&game);
                Ok(())
            }
            "2" => show_inventory(&mut input, &game),
            "3" => fight(&mut input, &mut game),
            "4" => game.heal().map(|amount| {
                println!("{}", format!("You rest and recover {amount} health.").green());
            }),
            "5" => select(&mut input, "Item to equip: ")
                .and_then(|i| game.equip_item(i))
                .map(|effect| print_effect(&effect)),
            "6" => select(&mut input, "Item to use: ")
                .and_then(|i| game.use_item(i))
                .map(|effect| print_effect(&effect)),
            "7" => quests(&mut input, &mut game),
            "8" => travel(&mut input, &mut game),
            "9" => pick_up(&mut input, &mut game),
            "10" => select(&mut input, "Save slot: ")
                .and_then(|slot| game.save(slot))
                .map(|meta| println!("{}", format!("Game saved ({}).", meta.player_name).green())),
            "11" => select(&mut input, "Load slot: ")
                .and_then(|slot| game.load(slot))
                .map(|loaded| match loaded {
                    Some(meta) => println!(
                        "{}",
                        format!("Loaded {} (level {}) at {}.", meta.player_name, meta.level, meta.location)
                            .green()
                    ),
                    None => println!("{}", "No saved game found.".yellow()),
                }),
            "12" => game
                .export_legacy(LEGACY_FILE)
                .map(|()| println!("Character exported to {LEGACY_FILE}.")),
            "13" => game
                .import_legacy(LEGACY_FILE)
                .map(|stats| println!("Welcome back, {}!", stats.name)),
            "0" => break,
            other => {
                println!("{}", format!("Unknown option '{other}'.").red());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{}", handle_error(&e).red());
        }

        if game.is_over() {
            println!("{}", "You have been defeated. Game over.".red().bold());
            break;
        }
    }

    println!("Farewell!");
    Ok(())
}

fn print_menu() {
    println!();
    println!("{}", "==== Menu ====".bold());
    for line in [
        "1. Display stats",
        "2. Show inventory",
        "3. Fight an enemy",
        "4. Rest",
        "5. Equip item",
        "6. Use item",
        "7. Quests",
        "8. Travel",
        "9. Pick up item",
        "10. Save game",
        "11. Load game",
        "12. Export legacy save",
        "13. Import legacy save",
        "0. Quit",
    ] {
        println!("{line}");
    }
}

/// 读取一行输入；EOF 时返回 `None`
fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    Ok((read > 0).then(|| line.trim().to_string()))
}

/// 读取一个从 1 开始的编号，转换为索引
fn select(input: &mut impl BufRead, message: &str) -> Result<usize, GameError> {
    let line = prompt(input, message)?.unwrap_or_default();
    match line.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(GameError::InvalidArgument(format!("'{line}' is not a valid choice"))),
    }
}

fn print_stats(game: &Game) {
    let s = game.display_stats();
    println!("{}", format!("== {} ==", s.name).bold());
    println!("Health:  {}/{}", s.health, s.max_health);
    println!("Attack:  {}", s.attack);
    println!("Defense: {}", s.defense);
    println!("Level:   {} ({} EXP)", s.level, s.experience);
    println!("Weapon:  {}", s.weapon.as_deref().unwrap_or("-"));
    println!("Armor:   {}", s.armor.as_deref().unwrap_or("-"));
    match s.skill {
        Some(skill) => println!("Skill:   {skill}"),
        None => println!("Skill:   -"),
    }
}

fn show_inventory(input: &mut impl BufRead, game: &Game) -> Result<(), GameError> {
    let mut page = 0;
    loop {
        let view = game.show_inventory(page)?;
        println!(
            "{}",
            format!("== Inventory (page {}/{}) ==", view.page + 1, view.total_pages).bold()
        );
        if view.items.is_empty() {
            println!("(empty)");
        }
        for (offset, item) in view.items.iter().enumerate() {
            println!("{}. {}", view.first_index + offset + 1, item);
        }
        if view.total_pages <= 1 {
            return Ok(());
        }
        let line = prompt(input, "[n]ext, [p]revious, anything else to return: ")?
            .unwrap_or_default();
        match line.as_str() {
            "n" if page + 1 < view.total_pages => page += 1,
            "p" if page > 0 => page -= 1,
            "n" | "p" => {}
            _ => return Ok(()),
        }
    }
}

fn fight(input: &mut impl BufRead, game: &mut Game) -> Result<(), GameError> {
    let enemies = game.list_enemies();
    if enemies.is_empty() {
        return Err(GameError::EmptyCollection);
    }
    for (i, enemy) in enemies.iter().enumerate() {
        println!(
            "{}. {} (HP {}, ATK {})",
            i + 1,
            enemy.name(),
            enemy.hp(),
            enemy.attack_power()
        );
    }
    let index = select(input, "Enemy to fight: ")?;
    let report = game.select_and_fight(index)?;
    print_battle(&report);
    Ok(())
}

fn print_battle(report: &BattleReport) {
    for round in &report.log {
        for event in &round.events {
            match event {
                BattleEvent::Attack { by: Side::Player, damage } => {
                    println!("You attack {} for {damage} damage.", report.enemy_name)
                }
                BattleEvent::Attack { by: Side::Enemy, damage } => {
                    println!("{} attacks you for {damage} damage.", report.enemy_name)
                }
                BattleEvent::Skill { by, outcome } => {
                    let who = match by {
                        Side::Player => "You".to_string(),
                        Side::Enemy => report.enemy_name.clone(),
                    };
                    println!("{who} {}", describe_skill(outcome));
                }
                BattleEvent::EnemyDefeated { .. } | BattleEvent::PlayerDefeated => {}
            }
        }
    }
    match report.outcome {
        BattleState::Victory => {
            println!("{}", format!("You defeated the {}!", report.enemy_name).green().bold());
            for name in &report.loot {
                println!("Loot: {name}");
            }
        }
        BattleState::Defeat => println!("{}", format!("The {} defeated you.", report.enemy_name).red()),
        other => println!("Battle ended: {other}"),
    }
}

fn describe_skill(outcome: &SkillOutcome) -> String {
    match outcome {
        SkillOutcome::Damage { skill, amount } => format!("casts {skill} for {amount} damage."),
        SkillOutcome::Healed { skill, amount } => format!("casts {skill} and recovers {amount} health."),
    }
}

fn print_effect(effect: &ItemEffect) {
    let text = match effect {
        ItemEffect::Healed { item, amount } => format!("{item} restores {amount} health."),
        ItemEffect::SkillCast { item, outcome } => format!("{item}: {}", describe_skill(outcome)),
        ItemEffect::Equipped {
            item,
            slot,
            replaced: Some(old),
        } => format!("Equipped {item} as {slot}, {old} returned to the bag."),
        ItemEffect::Equipped { item, slot, .. } => format!("Equipped {item} as {slot}."),
        ItemEffect::NoEffect { item } => format!("{item} has no use right now."),
    };
    println!("{}", text.green());
}

fn quests(input: &mut impl BufRead, game: &mut Game) -> Result<(), GameError> {
    for (i, quest) in game.list_quests().iter().enumerate() {
        println!("{}. {}", i + 1, quest);
    }
    let line = prompt(input, "Quest to turn in (blank to return): ")?
        .unwrap_or_default();
    if line.is_empty() {
        return Ok(());
    }
    let index = match line.parse::<usize>() {
        Ok(n) if n > 0 => n - 1,
        _ => return Err(GameError::InvalidArgument(format!("'{line}' is not a valid choice"))),
    };
    let reward = game.complete_quest(index)?;
    println!("{}", format!("Quest complete! +{} EXP", reward.exp).green());
    if reward.level_up.levels_gained > 0 {
        println!("{}", format!("Level up! You are now level {}.", reward.level_up.level).yellow().bold());
    }
    Ok(())
}

fn travel(input: &mut impl BufRead, game: &mut Game) -> Result<(), GameError> {
    let current = game.world().current_index();
    for (i, location) in game.list_locations().iter().enumerate() {
        let marker = if i == current { "*" } else { " " };
        println!("{marker}{}. {location}", i + 1);
    }
    let index = select(input, "Travel to: ")?;
    let location = game.travel(index)?;
    println!("{}", format!("You arrive at {}.", location.name).cyan());
    Ok(())
}

fn pick_up(input: &mut impl BufRead, game: &mut Game) -> Result<(), GameError> {
    let items = &game.current_location().items;
    if items.is_empty() {
        println!("There is nothing here to pick up.");
        return Ok(());
    }
    for (i, item) in items.iter().enumerate() {
        println!("{}. {}", i + 1, item);
    }
    let index = select(input, "Item to pick up: ")?;
    let name = game.pick_up(index)?;
    println!("{}", format!("Picked up {name}.").green());
    Ok(())
}
