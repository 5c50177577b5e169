use crate::engine::feedback::Outcome;
use crate::engine::helpers::{item_name, spell_label};
use crate::engine::output::Output;
use crate::engine::puzzles::{self, Attempt};
use crate::engine::render::render_room;
use crate::world::{Effect, GameState, Item, Stat, World};

/// `look [target]`. With a target, any item in the world can be described,
/// not just ones the player can see.
pub fn handle_look(out: &mut Output, world: &World, state: &GameState, target: &str) {
    let target = target.trim();
    let target = target.strip_prefix("at ").unwrap_or(target).trim();

    if target.is_empty() {
        render_room(out, world, state);
        return;
    }

    match world.item(target) {
        Some(item) => {
            out.title(item.name.clone());
            out.say(item.desc.clone());
        }
        None => out.say("You don't see that here."),
    }
}

pub fn handle_take(out: &mut Output, world: &World, state: &mut GameState, item_id: &str) -> Outcome {
    let item_id = item_id.trim();
    if item_id.is_empty() {
        out.say("Take what?");
        return Outcome::Nothing;
    }

    let room_id = state.player.current_room.as_str();
    let Some(room) = state.rooms.get_mut(room_id) else {
        out.say("You can't take that.");
        return Outcome::Nothing;
    };

    match room.items.iter().position(|i| i == item_id) {
        Some(idx) => {
            room.items.remove(idx);
            state.player.add_item(item_id);
            out.say(format!("You take the {}.", item_name(world, item_id)));
            Outcome::Took(item_id.to_string())
        }
        None => {
            out.say("You can't take that.");
            Outcome::Nothing
        }
    }
}

pub fn handle_inventory(out: &mut Output, world: &World, state: &GameState) {
    let inventory = state.player.inventory();
    if inventory.is_empty() {
        out.say("Your inventory is empty.");
        return;
    }

    let names: Vec<&str> = inventory.iter().map(|id| item_name(world, id)).collect();
    out.say(format!("Inventory:\n{}", names.join("\n")));
}

/// `use <item> [on <target>]`. The item has to be carried. If the room's
/// unsolved puzzle wants this item, the puzzle gets first go.
pub fn handle_use(
    out: &mut Output,
    world: &World,
    state: &mut GameState,
    item_id: &str,
    target: &str,
) -> Outcome {
    if item_id.is_empty() {
        out.say("Use what?");
        return Outcome::Nothing;
    }

    let Some(item) = world.item(item_id).filter(|_| state.player.has_item(item_id)) else {
        out.say("You don't have that item.");
        return Outcome::Nothing;
    };

    let puzzle_wants_it = world
        .room(&state.player.current_room)
        .and_then(|r| r.puzzle.as_ref())
        .is_some_and(|p| p.requires.iter().any(|r| r == item_id));

    if puzzle_wants_it {
        match puzzles::attempt(out, world, state, "") {
            Attempt::Solved(outcome) => return outcome,
            Attempt::Missing(missing) if matches!(item.effect, Effect::Inert) => {
                let names: Vec<&str> = missing.iter().map(|id| item_name(world, id)).collect();
                out.say(format!(
                    "The {} stirs, but something is missing: {}.",
                    item.name,
                    names.join(", ")
                ));
                return Outcome::Nothing;
            }
            _ => {}
        }
    }

    apply_item_effect(out, world, state, item, target)
}

fn apply_item_effect(
    out: &mut Output,
    world: &World,
    state: &mut GameState,
    item: &Item,
    target: &str,
) -> Outcome {
    match &item.effect {
        Effect::Restore { stat, amount, text } => {
            match stat {
                Stat::Health => state.player.adjust_health(*amount),
                Stat::Mana => state.player.adjust_mana(*amount),
            }
            state.player.remove_item(&item.id);
            out.say(text.clone());
            if *stat == Stat::Health {
                Outcome::Healed
            } else {
                Outcome::Nothing
            }
        }
        Effect::Learn { spell } => {
            if state.player.knows_spell(spell) {
                out.say("You already know the spells in this tome.");
                return Outcome::Nothing;
            }
            state.player.learn_spell(spell.clone());
            let label = world.item(spell).map(spell_label).unwrap_or(spell);
            out.say(format!("You learn the {label} spell!"));
            Outcome::Learned(spell.clone())
        }
        Effect::Attune { flag, text } => {
            if state.player.set_flag(flag.clone()) {
                out.say(text.clone());
            } else {
                out.say("You have already learned all this can teach you.");
            }
            Outcome::Nothing
        }
        Effect::Unlock {
            target: lock,
            requires,
            grants,
            text,
        } => {
            let ready = requires.as_deref().is_none_or(|f| state.player.has_flag(f));
            if target == lock && ready {
                state.player.set_flag(grants.clone());
                out.say(text.clone());
            } else {
                out.say("This key doesn't fit here.");
            }
            Outcome::Nothing
        }
        Effect::Inert | Effect::Strike(_) | Effect::Ward { .. } | Effect::Teleport => {
            out.say("You can't use that item.");
            Outcome::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tower_world;

    #[test]
    fn use_requires_the_item_in_hand() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);

        let mut out = Output::new();
        // lying in the room is not enough
        let outcome = handle_use(&mut out, &world, &mut state, "tome_basic", "");
        assert_eq!(outcome, Outcome::Nothing);
        assert!(out.contains("You don't have that item."));
        assert!(!state.player.has_item("tome_basic"));
        assert_eq!(state.room_items("entrance"), ["tome_basic".to_string()]);
    }

    #[test]
    fn potions_are_consumed() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.adjust_health(-50);
        state.player.add_item("health_potion");

        let mut out = Output::new();
        let outcome = handle_use(&mut out, &world, &mut state, "health_potion", "");
        assert_eq!(outcome, Outcome::Healed);
        assert_eq!(state.player.health(), 80);
        assert!(!state.player.has_item("health_potion"));
    }

    #[test]
    fn tomes_teach_once() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.add_item("tome_advanced");

        let mut out = Output::new();
        assert_eq!(
            handle_use(&mut out, &world, &mut state, "tome_advanced", ""),
            Outcome::Learned("shield".into())
        );
        assert!(out.contains("You learn the Shield spell!"));

        let mut out = Output::new();
        handle_use(&mut out, &world, &mut state, "tome_advanced", "");
        assert!(out.contains("You already know the spells in this tome."));
    }

    #[test]
    fn tower_key_needs_the_library_solved() {
        let world = tower_world().expect("tower");
        let mut state = GameState::new(&world);
        state.player.add_item("tower_key");

        let mut out = Output::new();
        handle_use(&mut out, &world, &mut state, "tower_key", "sanctum_door");
        assert!(out.contains("This key doesn't fit here."));

        state.player.set_flag("library_puzzle_solved");
        let mut out = Output::new();
        handle_use(&mut out, &world, &mut state, "tower_key", "sanctum_door");
        assert!(state.player.has_flag("sanctum_unlocked"));
    }

    #[test]
    fn look_uses_the_global_item_table() {
        let world = tower_world().expect("tower");
        let state = GameState::new(&world);

        let mut out = Output::new();
        handle_look(&mut out, &world, &state, "crown_of_magic");
        assert!(out.contains("Crown of Magic"));

        let mut out = Output::new();
        handle_look(&mut out, &world, &state, "unicorn");
        assert!(out.contains("You don't see that here."));
    }
}
