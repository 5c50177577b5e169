use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::model::{
    Effect, Exit, Guardian, GuardianAi, Hazard, HintRule, Intro, Item, ItemCategory, Puzzle,
    PuzzleMethod, Room, Slow, Stat, Strike, World,
};
use super::validator::validate_world;
use crate::error::WorldError;

/// The tower shipped with the game.
pub const TOWER_TOML: &str = include_str!("../../data/tower.toml");

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
    #[serde(default)]
    item: Vec<ItemConfig>, // [[item]] blocks
}

#[derive(Deserialize)]
struct WorldHeader {
    id: String,
    name: String,
    start_room: String,
    #[serde(default)]
    starting_spells: Vec<String>,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    fallback_hint: String,
    #[serde(default)]
    victory_text: String,
}

#[derive(Deserialize)]
struct RoomConfig {
    id: String,
    name: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    look_hint: Option<String>,

    #[serde(default)]
    exit: Vec<ExitConfig>, // [[room.exit]]
    #[serde(default)]
    hint: Vec<HintConfig>, // [[room.hint]]
    #[serde(default)]
    hazard: Vec<HazardConfig>, // [[room.hazard]]
    #[serde(default)]
    intro: Option<IntroConfig>,
    #[serde(default)]
    guardian: Option<GuardianConfig>,
    #[serde(default)]
    puzzle: Option<PuzzleConfig>,
}

#[derive(Deserialize)]
struct ExitConfig {
    direction: String,
    target: String,
}

#[derive(Deserialize)]
struct HintConfig {
    #[serde(default)]
    conditions: Vec<String>,
    text: String,
}

#[derive(Deserialize)]
struct IntroConfig {
    flag: String,
    lines: Vec<String>,
}

#[derive(Deserialize)]
struct GuardianConfig {
    name: String,
    health: i32,
    #[serde(default)]
    attack: i32,
    #[serde(default)]
    defense: i32,
    #[serde(default)]
    special: Option<String>,
    defeat_flag: String,
    #[serde(default)]
    defeat_text: String,
    #[serde(default)]
    blocks: Vec<String>,
    #[serde(default)]
    drops: Vec<String>,
    #[serde(default)]
    ai: Option<AiConfig>,
    #[serde(default)]
    victory: bool,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum AiConfig {
    Pursuit { range: usize },
}

#[derive(Deserialize)]
struct PuzzleConfig {
    kind: String,
    #[serde(default)]
    requires: Vec<String>,
    #[serde(default)]
    alternate_flag: Option<String>,
    reward: String,
    solved_flag: String,
    #[serde(default)]
    method: Vec<MethodConfig>, // [[room.puzzle.method]]
}

#[derive(Deserialize)]
struct MethodConfig {
    name: String,
    #[serde(default)]
    flag: Option<String>,
    text: String,
}

#[derive(Deserialize)]
struct HazardConfig {
    kind: String,
    damage: i32,
    #[serde(default)]
    interval_secs: Option<u64>,
    message: String,
    #[serde(default)]
    hurt_text: String,
    #[serde(default)]
    safe_text: String,
    #[serde(default)]
    bypass: Vec<String>,
}

#[derive(Deserialize)]
struct ItemConfig {
    id: String,
    name: String,
    category: CategoryConfig,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    mana_cost: Option<i32>,
    #[serde(default)]
    effect: Option<EffectConfig>,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum CategoryConfig {
    Spell,
    Potion,
    Key,
    Tome,
    Scroll,
    Reagent,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EffectConfig {
    Strike {
        #[serde(default)]
        damage: i32,
        #[serde(default)]
        slow: Option<SlowConfig>,
        #[serde(default)]
        drain: i32,
        #[serde(default)]
        freeze_secs: Option<u64>,
    },
    Ward {
        flag: String,
        text: String,
    },
    Teleport,
    Restore {
        stat: StatConfig,
        amount: i32,
        text: String,
    },
    Learn {
        spell: String,
    },
    Attune {
        flag: String,
        text: String,
    },
    Unlock {
        target: String,
        #[serde(default)]
        requires: Option<String>,
        grants: String,
        text: String,
    },
}

#[derive(Deserialize)]
struct SlowConfig {
    defense: i32,
    secs: u64,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum StatConfig {
    Health,
    Mana,
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Load and validate the built-in tower.
pub fn tower_world() -> Result<World, WorldError> {
    load_world_from_str(TOWER_TOML)
}

/// Parse a world from TOML text, convert it into the runtime model and run
/// the validator over it.
pub fn load_world_from_str(contents: &str) -> Result<World, WorldError> {
    let world_file: WorldFile = toml::from_str(contents)?;

    if world_file.world.id.trim().is_empty() {
        return Err(WorldError::Empty { field: "world.id" });
    }
    if world_file.world.start_room.trim().is_empty() {
        return Err(WorldError::Empty {
            field: "world.start_room",
        });
    }

    let mut rooms_map: HashMap<String, Room> = HashMap::new();

    for room_cfg in world_file.room {
        if rooms_map.contains_key(&room_cfg.id) {
            return Err(WorldError::Duplicate {
                kind: "room",
                id: room_cfg.id,
            });
        }

        let exits = room_cfg
            .exit
            .into_iter()
            .map(|e| Exit {
                direction: e.direction.to_lowercase(),
                target: e.target,
            })
            .collect();

        let hints = room_cfg
            .hint
            .into_iter()
            .map(|h| HintRule {
                conditions: h.conditions,
                text: normalize_multiline_desc(&h.text),
            })
            .collect();

        let hazards = room_cfg.hazard.into_iter().map(build_hazard).collect();

        let intro = room_cfg.intro.map(|i| Intro {
            flag: i.flag,
            lines: i.lines.iter().map(|l| normalize_multiline_desc(l)).collect(),
        });

        rooms_map.insert(
            room_cfg.id.clone(),
            Room {
                id: room_cfg.id,
                name: room_cfg.name,
                desc: normalize_multiline_desc(&room_cfg.desc),
                exits,
                items: room_cfg.items,
                guardian: room_cfg.guardian.map(build_guardian),
                puzzle: room_cfg.puzzle.map(build_puzzle),
                hazards,
                intro,
                look_hint: room_cfg.look_hint.map(|s| normalize_multiline_desc(&s)),
                hints,
            },
        );
    }

    if !rooms_map.contains_key(&world_file.world.start_room) {
        return Err(WorldError::MissingStartRoom(world_file.world.start_room));
    }

    let mut items_map: HashMap<String, Item> = HashMap::new();

    for ic in world_file.item {
        if items_map.contains_key(&ic.id) {
            return Err(WorldError::Duplicate {
                kind: "item",
                id: ic.id,
            });
        }
        if ic.name.trim().is_empty() {
            return Err(WorldError::InvalidItem {
                id: ic.id,
                reason: "empty name".to_string(),
            });
        }

        let item = build_item(ic);
        items_map.insert(item.id.clone(), item);
    }

    let world = World {
        id: world_file.world.id,
        name: world_file.world.name,
        desc: normalize_multiline_desc(&world_file.world.desc),
        start_room: world_file.world.start_room,
        starting_spells: world_file.world.starting_spells,
        fallback_hint: normalize_multiline_desc(&world_file.world.fallback_hint),
        victory_text: normalize_multiline_desc(&world_file.world.victory_text),
        rooms: rooms_map,
        items: items_map,
    };

    let errors = validate_world(&world);
    if !errors.is_empty() {
        return Err(WorldError::Invalid(
            errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    log::debug!(
        "loaded world '{}' with {} rooms and {} items",
        world.id,
        world.rooms.len(),
        world.items.len()
    );

    Ok(world)
}

fn build_guardian(gc: GuardianConfig) -> Guardian {
    Guardian {
        name: gc.name,
        health: gc.health,
        attack: gc.attack,
        defense: gc.defense,
        special: gc.special,
        defeat_flag: gc.defeat_flag,
        defeat_text: normalize_multiline_desc(&gc.defeat_text),
        blocks: gc.blocks.iter().map(|b| b.to_lowercase()).collect(),
        drops: gc.drops,
        ai: gc.ai.map(|ai| match ai {
            AiConfig::Pursuit { range } => GuardianAi::Pursuit { range },
        }),
        victory: gc.victory,
    }
}

fn build_puzzle(pc: PuzzleConfig) -> Puzzle {
    Puzzle {
        kind: pc.kind,
        requires: pc.requires,
        alternate_flag: pc.alternate_flag,
        reward: pc.reward,
        solved_flag: pc.solved_flag,
        methods: pc
            .method
            .into_iter()
            .map(|m| PuzzleMethod {
                name: m.name,
                flag: m.flag,
                text: normalize_multiline_desc(&m.text),
            })
            .collect(),
    }
}

fn build_hazard(hc: HazardConfig) -> Hazard {
    Hazard {
        kind: hc.kind,
        damage: hc.damage,
        interval: hc.interval_secs.map(Duration::from_secs),
        message: normalize_multiline_desc(&hc.message),
        hurt_text: normalize_multiline_desc(&hc.hurt_text),
        safe_text: normalize_multiline_desc(&hc.safe_text),
        bypass: hc.bypass,
    }
}

fn build_item(ic: ItemConfig) -> Item {
    let category = match ic.category {
        CategoryConfig::Spell => ItemCategory::Spell,
        CategoryConfig::Potion => ItemCategory::Potion,
        CategoryConfig::Key => ItemCategory::Key,
        CategoryConfig::Tome => ItemCategory::Tome,
        CategoryConfig::Scroll => ItemCategory::Scroll,
        CategoryConfig::Reagent => ItemCategory::Reagent,
    };

    let effect = match ic.effect {
        None => Effect::Inert,
        Some(EffectConfig::Strike {
            damage,
            slow,
            drain,
            freeze_secs,
        }) => Effect::Strike(Strike {
            damage,
            slow: slow.map(|s| Slow {
                defense: s.defense,
                duration: Duration::from_secs(s.secs),
            }),
            drain,
            freeze: freeze_secs.map(Duration::from_secs),
        }),
        Some(EffectConfig::Ward { flag, text }) => Effect::Ward { flag, text },
        Some(EffectConfig::Teleport) => Effect::Teleport,
        Some(EffectConfig::Restore { stat, amount, text }) => Effect::Restore {
            stat: match stat {
                StatConfig::Health => Stat::Health,
                StatConfig::Mana => Stat::Mana,
            },
            amount,
            text,
        },
        Some(EffectConfig::Learn { spell }) => Effect::Learn { spell },
        Some(EffectConfig::Attune { flag, text }) => Effect::Attune { flag, text },
        Some(EffectConfig::Unlock {
            target,
            requires,
            grants,
            text,
        }) => Effect::Unlock {
            target,
            requires,
            grants,
            text,
        },
    };

    Item {
        id: ic.id,
        name: ic.name.trim().to_string(),
        desc: normalize_multiline_desc(&ic.desc),
        category,
        mana_cost: ic.mana_cost,
        effect,
    }
}

/// Collapse TOML multi-line strings: a single newline becomes a space, one
/// blank line becomes a newline, two or more become a paragraph break.
fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if !result.is_empty() {
            match pending_blank_lines {
                0 => result.push(' '),
                1 => result.push('\n'),
                _ => result.push_str("\n\n"),
            }
        }
        result.push_str(trimmed);
        pending_blank_lines = 0;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
        [world]
        id = "small"
        name = "Small"
        start_room = "a"

        [[room]]
        id = "a"
        name = "Room A"
        desc = """
        First line
        continues here.

        New line.
        """
        items = ["potion"]

        [[room.exit]]
        direction = "North"
        target = "b"

        [[room]]
        id = "b"
        name = "Room B"

        [[item]]
        id = "potion"
        name = "Potion"
        category = "potion"
        effect = { kind = "restore", stat = "health", amount = 10, text = "Better." }
    "#;

    #[test]
    fn normalizes_wrapped_lines_and_blank_lines() {
        assert_eq!(
            normalize_multiline_desc("  one\n  two\n\n  three\n\n\n four "),
            "one two\nthree\n\nfour"
        );
    }

    #[test]
    fn loads_small_world() {
        let world = load_world_from_str(SMALL).expect("small world loads");
        let a = world.room("a").expect("room a");
        assert_eq!(a.desc, "First line continues here.\nNew line.");
        assert_eq!(a.exits[0].direction, "north");
        assert!(matches!(
            world.item("potion").map(|i| &i.effect),
            Some(Effect::Restore {
                stat: Stat::Health,
                amount: 10,
                ..
            })
        ));
    }

    #[test]
    fn rejects_duplicate_rooms() {
        let toml = r#"
            [world]
            id = "dup"
            name = "Dup"
            start_room = "a"

            [[room]]
            id = "a"
            name = "A"

            [[room]]
            id = "a"
            name = "A again"
        "#;
        assert!(matches!(
            load_world_from_str(toml),
            Err(WorldError::Duplicate { kind: "room", .. })
        ));
    }

    #[test]
    fn rejects_missing_start_room() {
        let toml = r#"
            [world]
            id = "w"
            name = "W"
            start_room = "nowhere"

            [[room]]
            id = "a"
            name = "A"
        "#;
        assert!(matches!(
            load_world_from_str(toml),
            Err(WorldError::MissingStartRoom(_))
        ));
    }

    #[test]
    fn tower_loads_and_validates() {
        let world = tower_world().expect("built-in tower is valid");
        assert_eq!(world.start_room, "entrance");
        assert_eq!(world.starting_spells, vec!["fireball"]);
        assert_eq!(world.rooms.len(), 20);

        let frost = world.room("frost_chamber").expect("frost chamber");
        let dirs: Vec<&str> = frost.exits.iter().map(|e| e.direction.as_str()).collect();
        assert_eq!(dirs, vec!["down", "east", "up"]);

        let fireball = world.item("fireball").expect("fireball");
        assert_eq!(fireball.mana_cost, Some(20));
        assert!(matches!(&fireball.effect, Effect::Strike(s) if s.damage == 30));
    }
}
