use super::model::{Effect, World};
use crate::engine::conditions::{Condition, parse_condition};

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if world.rooms.is_empty() {
        errors.push(ValidationError::new("world has no rooms"));
    }

    if !world.rooms.contains_key(&world.start_room) {
        errors.push(ValidationError::new(format!(
            "start_room '{}' not found among rooms",
            world.start_room
        )));
    }

    for spell in &world.starting_spells {
        if !world.items.get(spell).is_some_and(|s| s.is_spell()) {
            errors.push(ValidationError::new(format!(
                "starting spell '{}' is not a spell",
                spell
            )));
        }
    }

    let mut room_ids: Vec<&String> = world.rooms.keys().collect();
    room_ids.sort();

    for room_id in room_ids {
        let room = &world.rooms[room_id];

        for exit in &room.exits {
            if !world.rooms.contains_key(&exit.target) {
                errors.push(ValidationError::new(format!(
                    "room '{}' exit '{}' targets missing room '{}'",
                    room_id, exit.direction, exit.target
                )));
            }
        }

        for item_id in &room.items {
            if !world.items.contains_key(item_id) {
                errors.push(ValidationError::new(format!(
                    "room '{}' holds unknown item '{}'",
                    room_id, item_id
                )));
            }
        }

        if let Some(guardian) = &room.guardian {
            for dir in &guardian.blocks {
                if room.exit(dir).is_none() {
                    errors.push(ValidationError::new(format!(
                        "guardian '{}' in '{}' blocks '{}' but the room has no such exit",
                        guardian.name, room_id, dir
                    )));
                }
            }
            for drop in &guardian.drops {
                if !world.items.contains_key(drop) {
                    errors.push(ValidationError::new(format!(
                        "guardian '{}' drops unknown item '{}'",
                        guardian.name, drop
                    )));
                }
            }
            if guardian.defeat_flag.trim().is_empty() {
                errors.push(ValidationError::new(format!(
                    "guardian '{}' has an empty defeat_flag",
                    guardian.name
                )));
            }
        }

        if let Some(puzzle) = &room.puzzle {
            for needed in &puzzle.requires {
                if !world.items.contains_key(needed) {
                    errors.push(ValidationError::new(format!(
                        "puzzle '{}' in '{}' requires unknown item '{}'",
                        puzzle.kind, room_id, needed
                    )));
                }
            }
            if !world.items.contains_key(&puzzle.reward) {
                errors.push(ValidationError::new(format!(
                    "puzzle '{}' in '{}' rewards unknown item '{}'",
                    puzzle.kind, room_id, puzzle.reward
                )));
            }
            if puzzle.methods.is_empty() {
                errors.push(ValidationError::new(format!(
                    "puzzle '{}' in '{}' has no methods",
                    puzzle.kind, room_id
                )));
            }
            if puzzle.alternate_flag.is_some() && puzzle.methods.len() < 2 {
                errors.push(ValidationError::new(format!(
                    "puzzle '{}' in '{}' has an alternate_flag but no mastery method",
                    puzzle.kind, room_id
                )));
            }
        }

        for rule in &room.hints {
            for cond in &rule.conditions {
                check_condition(world, room_id, cond, &mut errors);
            }
        }
    }

    let mut item_ids: Vec<&String> = world.items.keys().collect();
    item_ids.sort();

    for item_id in item_ids {
        let item = &world.items[item_id];

        if item.is_spell() && item.mana_cost.is_none() {
            errors.push(ValidationError::new(format!(
                "spell '{}' has no mana_cost",
                item_id
            )));
        }

        if let Effect::Learn { spell } = &item.effect {
            match world.items.get(spell) {
                Some(s) if s.is_spell() => {}
                _ => errors.push(ValidationError::new(format!(
                    "item '{}' teaches unknown spell '{}'",
                    item_id, spell
                ))),
            }
        }
    }

    errors
}

fn check_condition(world: &World, room_id: &str, cond: &str, errors: &mut Vec<ValidationError>) {
    let (_, parsed) = parse_condition(cond);
    let known = match parsed {
        Condition::Flag(name) => !name.is_empty(),
        Condition::Item(id) => world.items.contains_key(id),
        Condition::Spell(id) => world.items.get(id).is_some_and(|i| i.is_spell()),
    };
    if !known {
        errors.push(ValidationError::new(format!(
            "hint in room '{}' has bad condition '{}'",
            room_id, cond
        )));
    }
}
