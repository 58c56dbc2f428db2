// src/world/src/starter.rs
//! 默认开局内容

use combat::Enemy;
use items::{Item, MaterialKind, Rarity, Skill};
use quest::{Quest, QuestLedger};

use crate::{Location, World};

/// 开局世界：第一个地点就是最初的两个敌人
pub fn starter_world() -> World {
    let outskirts = Location::new("Village Outskirts", "Fields where monsters gather at dusk")
        .with_enemies([
            Enemy::new("Goblin", 50, 10)
                .with_exp_reward(30)
                .with_loot([Item::potion("Health Potion", Rarity::Common, 20, 30)]),
            Enemy::new("Troll", 120, 15).with_exp_reward(80).with_loot([
                Item::weapon("Troll Club", Rarity::Uncommon, 40, 8),
                Item::material("Troll Hide", Rarity::Common, 15, MaterialKind::Crafting),
            ]),
        ])
        .with_items([Item::weapon("Iron Sword", Rarity::Common, 50, 5)]);

    let forest = Location::new("Dark Forest", "Old trees and older traps")
        .with_enemies([
            Enemy::new("Wolf", 40, 12).with_exp_reward(25),
            Enemy::new("Goblin Shaman", 60, 8)
                .with_abilities([Skill::Fireball])
                .with_exp_reward(60)
                .with_loot([Item::scroll(
                    "Scroll of Fireball",
                    Rarity::Rare,
                    120,
                    Skill::Fireball,
                )]),
        ])
        .with_items([
            Item::armor("Leather Armor", Rarity::Common, 30, 3),
            Item::material("Snare Wire", Rarity::Common, 5, MaterialKind::Trap),
        ]);

    let ruins = Location::new("Ancient Ruins", "Broken pillars and a sealed crypt")
        .with_enemies([Enemy::new("Stone Golem", 200, 18)
            .with_defense(10)
            .with_abilities([Skill::Lightning])
            .with_exp_reward(150)
            .with_loot([Item::material(
                "Golem Heart",
                Rarity::Legendary,
                500,
                MaterialKind::Artifact,
            )])])
        .with_items([Item::scroll(
            "Scroll of Renewal",
            Rarity::Uncommon,
            60,
            Skill::Rejuvenate,
        )]);

    World {
        locations: vec![outskirts, forest, ruins],
        current: 0,
    }
}

/// 开局任务
pub fn starter_quests() -> QuestLedger {
    [
        Quest::main(
            "Clear the Outskirts",
            "Drive the goblin and the troll away from the village",
            100,
        ),
        Quest::main(
            "Heart of Stone",
            "Defeat the golem guarding the ruins",
            250,
        ),
        Quest::side("Forest Patrol", "Thin out the wolves in the forest", 40),
    ]
    .into_iter()
    .collect()
}
